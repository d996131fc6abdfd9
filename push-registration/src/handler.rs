use tracing::info;

use crate::models::{NotificationPayload, NotificationResponse};

/// Application-supplied notification handler
///
/// Receives the structured form of every notification after the event
/// slots have fired.
pub trait NotificationHandler: Send + Sync {
    fn on_received(&self, payload: &NotificationPayload);
    fn on_opened(&self, response: &NotificationResponse);
}

/// Default handler used when the application does not supply one.
#[derive(Debug, Default)]
pub struct LoggingHandler;

impl NotificationHandler for LoggingHandler {
    fn on_received(&self, payload: &NotificationPayload) {
        info!(keys = payload.len(), "Notification received");
    }

    fn on_opened(&self, response: &NotificationResponse) {
        info!(
            identifier = %response.identifier,
            kind = response.kind.as_str(),
            "Notification opened"
        );
    }
}
