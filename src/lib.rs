pub mod application;
pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use application::services::{DeletionRequestService, NotificationService};
pub use config::{Config, ConfigError};
pub use domain::errors::{DomainError, DomainResult};
