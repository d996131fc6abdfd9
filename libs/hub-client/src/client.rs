use std::sync::Arc;

use thiserror::Error;

/// Error type for hub operations
#[derive(Error, Debug, Clone)]
pub enum HubError {
    #[error("Hub configuration error: {0}")]
    Config(String),

    #[error("Hub registration failed: {0}")]
    Registration(String),

    #[error("Hub unregistration failed: {0}")]
    Unregistration(String),
}

/// Trait for notification-hub backends
///
/// The backend SDK owns the wire protocol; callers only see the two
/// operations the registration flow needs. Token and tags always travel
/// together: a registration call binds the given tag set to the device
/// token, replacing whatever the hub held for it before.
#[async_trait::async_trait]
pub trait NotificationHub: Send + Sync {
    /// Registers the device token with the given tag set.
    ///
    /// # Arguments
    /// * `token` - Device token rendered as a lowercase hex string
    /// * `tags` - Topic labels to bind; an empty slice registers with no tags
    async fn register_native(&self, token: &str, tags: &[String]) -> Result<(), HubError>;

    /// Removes every registration the hub holds for the token.
    ///
    /// Must succeed when the hub has nothing registered for the token.
    async fn unregister_all(&self, token: &str) -> Result<(), HubError>;
}

// Re-export trait-object type for services that hold a hub by reference
pub type DynNotificationHub = Arc<dyn NotificationHub>;
