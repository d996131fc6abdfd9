pub mod center;
pub mod config;
pub mod error;
pub mod events;
pub mod handler;
pub mod models;
pub mod payload;
pub mod services;
pub mod store;
pub mod token;

pub use center::NotificationCenter;
pub use config::{AdapterConfig, Config};
pub use error::AdapterError;
pub use events::{Events, SubscriptionId};
pub use handler::{LoggingHandler, NotificationHandler};
pub use models::{
    CategoryKind, NotificationAction, NotificationActionKind, NotificationPayload,
    NotificationResponse,
    NotificationUserCategory, PresentationOptions, ResponseKind, TokenFormat,
};
pub use services::{RegistrationService, RegistrationServiceBuilder};
pub use store::{JsonFileStore, MemoryStore, StateStore};
