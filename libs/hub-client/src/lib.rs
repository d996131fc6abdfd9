/// Notification Hub Shared Library
///
/// This library provides the client-side abstraction over an Azure
/// Notification Hub for tag-scoped device registration.
///
/// It handles:
/// - Connection-string and hub-path configuration
/// - The `NotificationHub` trait used by the registration adapter
/// - Error types for registration/unregistration failures
pub mod client;
pub mod config;

pub use client::{DynNotificationHub, HubError, NotificationHub};
pub use config::{ConnectionString, HubConfig};
