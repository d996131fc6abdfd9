use thiserror::Error;

/// Adapter Error Types
///
/// Every failure the adapter can report to the application. These are
/// non-fatal: they are delivered through the error event and never cross
/// the public API as a panic. Persisted state stays intact except for the
/// flags tied to the failing step.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdapterError {
    #[error("Push notification permission denied: {0}")]
    PermissionDenied(String),

    #[error("Remote notification registration failed: {0}")]
    RegistrationFailed(String),

    #[error("Notification hub registration failed: {0}")]
    NotificationHubRegistrationFailed(String),

    #[error("Notification hub unregistration failed: {0}")]
    NotificationHubUnregistrationFailed(String),
}

impl AdapterError {
    pub fn kind(&self) -> &'static str {
        match self {
            AdapterError::PermissionDenied(_) => "permission_denied",
            AdapterError::RegistrationFailed(_) => "registration_failed",
            AdapterError::NotificationHubRegistrationFailed(_) => "hub_registration_failed",
            AdapterError::NotificationHubUnregistrationFailed(_) => "hub_unregistration_failed",
        }
    }
}
