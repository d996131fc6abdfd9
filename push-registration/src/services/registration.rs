/// Device Registration Service
///
/// Bridges the host notification center (token delivery, notification
/// callbacks) to the notification hub (tag-scoped registration) and
/// dispatches the observable events the application subscribes to.
///
/// All collaborators are injected once at construction; there is no
/// process-global state.
use std::sync::{Arc, RwLock};

use hub_client::{DynNotificationHub, HubError};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::center::NotificationCenter;
use crate::config::AdapterConfig;
use crate::error::AdapterError;
use crate::events::Events;
use crate::handler::{LoggingHandler, NotificationHandler};
use crate::models::{
    NotificationResponse, NotificationUserCategory, PresentationOptions, ResponseKind, TokenFormat,
    DEFAULT_ACTION_IDENTIFIER,
};
use crate::payload;
use crate::store::{StateStore, StoreError};
use crate::token::format_token;

/// Registration adapter instance, shared via `Arc` with the host callbacks.
pub struct RegistrationService {
    hub: Option<DynNotificationHub>,
    center: Arc<dyn NotificationCenter>,
    store: Arc<dyn StateStore>,
    events: Events,
    handler: RwLock<Arc<dyn NotificationHandler>>,
    categories: RwLock<Vec<NotificationUserCategory>>,
    presentation: RwLock<PresentationOptions>,
    token_format: TokenFormat,
}

impl RegistrationService {
    /// Event slots for application subscriptions.
    pub fn events(&self) -> &Events {
        &self.events
    }

    /// Formatted device token, empty when none has been delivered yet.
    pub fn token(&self) -> String {
        self.store
            .token()
            .map(|bytes| format_token(&bytes, self.token_format))
            .unwrap_or_default()
    }

    /// Currently persisted tag set.
    pub fn tags(&self) -> Vec<String> {
        self.store.tags()
    }

    pub fn is_enabled(&self) -> bool {
        self.store.is_enabled()
    }

    pub fn is_registered(&self) -> bool {
        self.store.is_registered()
    }

    pub fn user_categories(&self) -> Vec<NotificationUserCategory> {
        self.categories.read().expect("category lock poisoned").clone()
    }

    pub fn set_handler(&self, handler: Arc<dyn NotificationHandler>) {
        *self.handler.write().expect("handler lock poisoned") = handler;
    }

    pub fn set_presentation_options(&self, options: PresentationOptions) {
        *self.presentation.write().expect("presentation lock poisoned") = options;
    }

    /// Requests notification permission and, if granted, starts remote
    /// registration. The device token arrives later through
    /// `device_token_received` / `remote_registration_failed`.
    pub async fn request_authorization_and_register(&self) {
        match self.center.request_authorization().await {
            Ok(true) => {
                debug!("Push permission granted, requesting remote registration");
                self.center.register_for_remote_notifications();
            }
            Ok(false) => {
                self.events.error.emit(&AdapterError::PermissionDenied(
                    "Push notification permission not granted".to_string(),
                ));
            }
            Err(reason) => {
                self.events.error.emit(&AdapterError::PermissionDenied(reason));
            }
        }
    }

    /// Host callback: the OS delivered a fresh device token.
    pub async fn device_token_received(&self, token: &[u8]) {
        self.persist(self.store.set_token(Some(token)));
        self.persist(self.store.set_enabled(true));

        let formatted = format_token(token, self.token_format);
        info!(token = %formatted, "Device token received");
        self.events.token_refresh.emit(&formatted);

        let tags = self.store.tags();
        self.register(&tags).await;
    }

    /// Host callback: the OS could not obtain a device token.
    pub fn remote_registration_failed(&self, reason: &str) {
        warn!(%reason, "Remote notification registration failed");
        self.persist(self.store.set_enabled(false));
        self.events
            .error
            .emit(&AdapterError::RegistrationFailed(reason.to_string()));
    }

    /// Replaces the hub registration for the current token with the given
    /// tag set.
    ///
    /// Silent no-op when no hub is configured or no token is present; the
    /// token either has not arrived yet (registration re-runs when it does)
    /// or the host never completed enrollment. The hub calls run on a
    /// background task; existing registrations are removed first so stale
    /// tag bindings cannot accumulate. Persisted tags change only on
    /// success.
    pub async fn register(&self, tags: &[String]) {
        let Some(hub) = self.hub.clone() else {
            debug!("Register skipped: no hub configured");
            return;
        };
        let Some(token_bytes) = self.store.token() else {
            debug!("Register skipped: no device token");
            return;
        };

        let token = format_token(&token_bytes, self.token_format);
        let tags = tags.to_vec();
        info!(?tags, "Registering device with notification hub");

        let task = tokio::spawn({
            let tags = tags.clone();
            async move {
                hub.unregister_all(&token)
                    .await
                    .map_err(RegisterStep::Unregister)?;
                hub.register_native(&token, &tags)
                    .await
                    .map_err(RegisterStep::Register)
            }
        });

        match task.await {
            Ok(Ok(())) => {
                self.persist(self.store.set_registered(true));
                self.persist(self.store.set_tags(&tags));
                info!(?tags, "Device registered with notification hub");
            }
            Ok(Err(RegisterStep::Unregister(e))) => {
                warn!(error = %e, "Hub unregistration step failed");
                self.events
                    .error
                    .emit(&AdapterError::NotificationHubUnregistrationFailed(
                        e.to_string(),
                    ));
            }
            Ok(Err(RegisterStep::Register(e))) => {
                warn!(error = %e, "Hub registration failed");
                self.events
                    .error
                    .emit(&AdapterError::NotificationHubRegistrationFailed(
                        e.to_string(),
                    ));
            }
            Err(join_error) => {
                warn!(error = %join_error, "Hub registration task failed");
                self.events
                    .error
                    .emit(&AdapterError::NotificationHubRegistrationFailed(
                        join_error.to_string(),
                    ));
            }
        }
    }

    /// Removes every hub registration for the current token.
    ///
    /// Success clears the persisted tag set and the registered flag; the
    /// token itself is untouched, so a later `register` re-enrolls. Any
    /// failure, including a panicked task, is reported as an
    /// unregistration error and leaves state unchanged.
    pub async fn unregister(&self) {
        let Some(hub) = self.hub.clone() else {
            return;
        };
        let Some(token_bytes) = self.store.token() else {
            return;
        };

        let token = format_token(&token_bytes, self.token_format);
        let task = tokio::spawn(async move { hub.unregister_all(&token).await });

        let outcome = match task.await {
            Ok(result) => result,
            Err(join_error) => Err(HubError::Unregistration(join_error.to_string())),
        };

        match outcome {
            Ok(()) => {
                self.persist(self.store.set_tags(&[]));
                self.persist(self.store.set_registered(false));
                info!("Device unregistered from notification hub");
            }
            Err(e) => {
                warn!(error = %e, "Hub unregistration failed");
                self.events
                    .error
                    .emit(&AdapterError::NotificationHubUnregistrationFailed(
                        e.to_string(),
                    ));
            }
        }
    }

    /// OS-level counterpart to `unregister`: stops remote delivery for this
    /// installation and drops the local token. Invoked by the caller as a
    /// separate step, independent of the hub outcome.
    pub fn unregister_remote_notifications(&self) {
        self.center.unregister_for_remote_notifications();
        self.persist(self.store.set_token(None));
    }

    /// Replaces the cached interactive categories and re-registers them
    /// with the notification center. Idempotent; an empty list is a no-op.
    pub fn register_user_categories(&self, categories: &[NotificationUserCategory]) {
        if categories.is_empty() {
            return;
        }

        {
            let mut cached = self.categories.write().expect("category lock poisoned");
            cached.clear();
            cached.extend_from_slice(categories);
        }

        self.center.set_notification_categories(categories);
        debug!(count = categories.len(), "Registered notification categories");
    }

    /// Host callback: a notification arrived while the app is foregrounded.
    /// Returns the presentation policy the host should apply.
    pub fn will_present(&self, user_info: &Value) -> PresentationOptions {
        let parameters = payload::flatten(user_info);
        self.events.received.emit(&parameters);
        *self.presentation.read().expect("presentation lock poisoned")
    }

    /// Host callback: the user tapped, actioned, or dismissed a
    /// notification.
    pub fn user_responded(
        &self,
        user_info: &Value,
        action_identifier: &str,
        is_custom_action: bool,
        is_dismiss_action: bool,
    ) {
        let parameters = payload::flatten(user_info);

        let kind = if is_custom_action {
            ResponseKind::Custom
        } else if is_dismiss_action {
            ResponseKind::Dismiss
        } else {
            ResponseKind::Default
        };

        let identifier = if action_identifier.eq_ignore_ascii_case(DEFAULT_ACTION_IDENTIFIER) {
            String::new()
        } else {
            action_identifier.to_string()
        };

        let response = NotificationResponse {
            data: parameters,
            identifier,
            kind,
        };

        self.events.opened.emit(&response);
        self.handler
            .read()
            .expect("handler lock poisoned")
            .on_opened(&response);
    }

    /// Host callback: data-only/background message path.
    pub fn message_received(&self, user_info: &Value) {
        let parameters = payload::flatten(user_info);
        self.events.received.emit(&parameters);
        self.handler
            .read()
            .expect("handler lock poisoned")
            .on_received(&parameters);
    }

    /// Persistence cannot veto the triggering operation; failures are
    /// logged and the in-flight flow continues.
    fn persist(&self, result: Result<(), StoreError>) {
        if let Err(e) = result {
            warn!(error = %e, "Failed to persist registration state");
        }
    }
}

/// Which half of the register sequence failed.
enum RegisterStep {
    Unregister(HubError),
    Register(HubError),
}

/// Builder wiring the adapter's collaborators, mirroring the plugin's
/// initialization entry points.
pub struct RegistrationServiceBuilder {
    hub: Option<DynNotificationHub>,
    center: Arc<dyn NotificationCenter>,
    store: Arc<dyn StateStore>,
    handler: Arc<dyn NotificationHandler>,
    categories: Vec<NotificationUserCategory>,
    config: AdapterConfig,
}

impl RegistrationServiceBuilder {
    pub fn new(center: Arc<dyn NotificationCenter>, store: Arc<dyn StateStore>) -> Self {
        Self {
            hub: None,
            center,
            store,
            handler: Arc::new(LoggingHandler),
            categories: Vec::new(),
            config: AdapterConfig::default(),
        }
    }

    pub fn with_hub(mut self, hub: DynNotificationHub) -> Self {
        self.hub = Some(hub);
        self
    }

    pub fn with_handler(mut self, handler: Arc<dyn NotificationHandler>) -> Self {
        self.handler = handler;
        self
    }

    pub fn with_categories(mut self, categories: Vec<NotificationUserCategory>) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_config(mut self, config: AdapterConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds the service without touching the host or the hub.
    pub fn build(self) -> Arc<RegistrationService> {
        Arc::new(RegistrationService {
            hub: self.hub,
            center: self.center,
            store: self.store,
            events: Events::default(),
            handler: RwLock::new(self.handler),
            categories: RwLock::new(self.categories),
            presentation: RwLock::new(self.config.presentation),
            token_format: self.config.token_format,
        })
    }

    /// Builds the service, registers any supplied categories with the host,
    /// and, when auto-registration is on, starts the authorization flow.
    pub async fn initialize(self) -> Arc<RegistrationService> {
        let auto_register = self.config.auto_register;
        let categories = self.categories.clone();
        let service = self.build();

        service.register_user_categories(&categories);

        if auto_register {
            service.request_authorization_and_register().await;
        }

        service
    }
}
