use std::sync::RwLock;

use uuid::Uuid;

use crate::error::AdapterError;
use crate::models::{NotificationPayload, NotificationResponse};

/// Handle returned by `subscribe`, used to remove the listener again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

type Callback<T> = Box<dyn Fn(&T) + Send + Sync>;

/// Ordered multicast listener list for one event slot.
///
/// Listeners fire synchronously, in subscription order, on the thread that
/// emits. Emission takes no callback re-entrancy precautions; subscribing
/// from inside a callback deadlocks by construction and is unsupported.
pub struct Listeners<T> {
    inner: RwLock<Vec<(SubscriptionId, Callback<T>)>>,
}

impl<T> Default for Listeners<T> {
    fn default() -> Self {
        Self {
            inner: RwLock::new(Vec::new()),
        }
    }
}

impl<T> Listeners<T> {
    pub fn subscribe(&self, callback: impl Fn(&T) + Send + Sync + 'static) -> SubscriptionId {
        let id = SubscriptionId(Uuid::new_v4());
        self.inner
            .write()
            .expect("listener lock poisoned")
            .push((id, Box::new(callback)));
        id
    }

    /// Removes a listener; unknown ids are ignored.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.inner
            .write()
            .expect("listener lock poisoned")
            .retain(|(listener_id, _)| *listener_id != id);
    }

    pub fn emit(&self, event: &T) {
        for (_, callback) in self.inner.read().expect("listener lock poisoned").iter() {
            callback(event);
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().expect("listener lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The adapter's five observable event slots.
#[derive(Default)]
pub struct Events {
    /// Fired with the formatted token whenever the OS hands over a fresh one
    pub token_refresh: Listeners<String>,
    /// Fired for every non-fatal failure in the registration flow
    pub error: Listeners<AdapterError>,
    /// Fired when a notification payload arrives (foreground or data-only)
    pub received: Listeners<NotificationPayload>,
    /// Fired when the user taps or actions a notification
    pub opened: Listeners<NotificationResponse>,
    /// Fired when notifications are removed; no internal trigger on this
    /// platform, the slot exists for host integrations that provide one
    pub deleted: Listeners<NotificationPayload>,
}
