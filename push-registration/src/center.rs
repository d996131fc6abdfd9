use crate::models::NotificationUserCategory;

/// Trait for the host notification center
///
/// The OS side of the bridge: authorization prompts, remote-notification
/// enrollment, and interactive-category registration. Token delivery and
/// user responses flow back through `RegistrationService`'s callback
/// methods, not through this trait.
#[async_trait::async_trait]
pub trait NotificationCenter: Send + Sync {
    /// Prompts for alert/badge/sound permission.
    ///
    /// # Returns
    /// `Ok(true)` if granted, `Ok(false)` if denied, `Err` with the host's
    /// reason when the prompt itself fails
    async fn request_authorization(&self) -> Result<bool, String>;

    /// Asks the OS to begin remote registration. The device token (or a
    /// failure) is delivered asynchronously through the host callbacks.
    fn register_for_remote_notifications(&self);

    /// Stops remote-notification delivery for this installation.
    fn unregister_for_remote_notifications(&self);

    /// Replaces the OS-registered interactive categories.
    fn set_notification_categories(&self, categories: &[NotificationUserCategory]);
}
