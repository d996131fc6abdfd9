use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Flattened notification payload: dotted keys to stringified values.
pub type NotificationPayload = HashMap<String, String>;

/// Identifier the OS sends for the plain tap on a notification body.
pub const DEFAULT_ACTION_IDENTIFIER: &str = "com.apple.UNNotificationDefaultActionIdentifier";

/// Device-token rendering strategy
///
/// Selected once at construction instead of branching on an OS version at
/// every call site. Both strategies produce the same string for well-formed
/// tokens; `LegacyDescription` exists for hosts that still hand back the
/// pre-iOS-13 description form.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum TokenFormat {
    /// Raw token bytes rendered as lowercase hex
    Hex,
    /// Debug-description string with angle brackets and spaces stripped
    LegacyDescription,
}

impl Default for TokenFormat {
    fn default() -> Self {
        TokenFormat::Hex
    }
}

impl TokenFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenFormat::Hex => "hex",
            TokenFormat::LegacyDescription => "legacy-description",
        }
    }
}

/// Behavior attached to an interactive notification action
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum NotificationActionKind {
    /// No special behavior
    Default,
    /// Device must be unlocked before the action runs
    AuthenticationRequired,
    /// Rendered as destructive (red) by the OS
    Destructive,
    /// Launches the app into the foreground
    Foreground,
}

impl NotificationActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationActionKind::Default => "default",
            NotificationActionKind::AuthenticationRequired => "authentication_required",
            NotificationActionKind::Destructive => "destructive",
            NotificationActionKind::Foreground => "foreground",
        }
    }
}

/// Interactive notification action (a button on the notification)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationAction {
    pub id: String,
    pub title: String,
    pub kind: NotificationActionKind,
}

/// Category kind controlling dismiss-action delivery
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum CategoryKind {
    /// Standard category
    Default,
    /// Category requesting the custom dismiss action callback
    Dismiss,
}

impl CategoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryKind::Default => "default",
            CategoryKind::Dismiss => "dismiss",
        }
    }
}

/// Named set of interactive actions registered with the OS at startup
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationUserCategory {
    /// Category identifier matched against the payload's category key
    pub category: String,
    pub actions: Vec<NotificationAction>,
    pub kind: CategoryKind,
}

/// How the user interacted with a delivered notification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResponseKind {
    /// Plain tap on the notification body
    Default,
    /// One of the registered custom actions
    Custom,
    /// Explicit dismissal (dismiss-capable categories only)
    Dismiss,
}

impl ResponseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseKind::Default => "default",
            ResponseKind::Custom => "custom",
            ResponseKind::Dismiss => "dismiss",
        }
    }
}

/// Structured user response forwarded to the application handler
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationResponse {
    /// Flattened notification payload
    pub data: NotificationPayload,

    /// Action identifier; empty string for the default tap action
    pub identifier: String,

    /// Response classification
    pub kind: ResponseKind,
}

/// OS presentation policy returned when a notification arrives while the
/// app is foregrounded
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PresentationOptions {
    pub alert: bool,
    pub badge: bool,
    pub sound: bool,
}

impl PresentationOptions {
    /// Suppress all OS presentation; the app displays the notification itself.
    pub const NONE: PresentationOptions = PresentationOptions {
        alert: false,
        badge: false,
        sound: false,
    };

    /// Full OS presentation
    pub const ALL: PresentationOptions = PresentationOptions {
        alert: true,
        badge: true,
        sound: true,
    };
}

impl Default for PresentationOptions {
    fn default() -> Self {
        PresentationOptions::NONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_kind_as_str() {
        assert_eq!(ResponseKind::Default.as_str(), "default");
        assert_eq!(ResponseKind::Custom.as_str(), "custom");
        assert_eq!(ResponseKind::Dismiss.as_str(), "dismiss");
    }

    #[test]
    fn test_token_format_default_is_hex() {
        assert_eq!(TokenFormat::default(), TokenFormat::Hex);
    }

    #[test]
    fn test_presentation_options_default_suppresses_all() {
        let opts = PresentationOptions::default();
        assert!(!opts.alert && !opts.badge && !opts.sound);
    }

    #[test]
    fn test_category_serialization_round_trip() {
        let category = NotificationUserCategory {
            category: "message".to_string(),
            actions: vec![NotificationAction {
                id: "reply".to_string(),
                title: "Reply".to_string(),
                kind: NotificationActionKind::Foreground,
            }],
            kind: CategoryKind::Default,
        };

        let json = serde_json::to_string(&category).unwrap();
        let deserialized: NotificationUserCategory = serde_json::from_str(&json).unwrap();
        assert_eq!(category, deserialized);
    }
}
