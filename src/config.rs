use std::env;

use crate::domain::entities::TransitionPolicy;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    /// HS256 secret shared with the token issuer.
    pub jwt_secret: String,
    pub transition_policy: TransitionPolicy,
    /// Buffered deletion events before slow listeners start lagging.
    pub deletion_queue_capacity: usize,
    pub otel_exporter_endpoint: Option<String>,
    pub service_name: String,
    pub metrics_port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .unwrap_or_else(|| "sqlite://notifications.db?mode=rwc".to_string());

        let server_host = lookup("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string());

        let server_port = lookup("SERVER_PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidPort)?;

        let jwt_secret = lookup("JWT_SECRET")
            .filter(|secret| !secret.trim().is_empty())
            .ok_or(ConfigError::MissingJwtSecret)?;

        let transition_policy = match lookup("DELETION_TRANSITION_POLICY") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidTransitionPolicy(value))?,
            None => TransitionPolicy::default(),
        };

        let deletion_queue_capacity = lookup("DELETION_QUEUE_CAPACITY")
            .unwrap_or_else(|| "100".to_string())
            .parse()
            .ok()
            .filter(|capacity: &usize| *capacity > 0)
            .ok_or(ConfigError::InvalidQueueCapacity)?;

        let otel_exporter_endpoint = lookup("OTEL_EXPORTER_OTLP_ENDPOINT");

        let service_name =
            lookup("SERVICE_NAME").unwrap_or_else(|| "notification-service".to_string());

        let metrics_port = lookup("METRICS_PORT")
            .unwrap_or_else(|| "9000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidMetricsPort)?;

        Ok(Config {
            database_url,
            server_host,
            server_port,
            jwt_secret,
            transition_policy,
            deletion_queue_capacity,
            otel_exporter_endpoint,
            service_name,
            metrics_port,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("JWT_SECRET environment variable not set")]
    MissingJwtSecret,

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid metrics port number")]
    InvalidMetricsPort,

    #[error("DELETION_QUEUE_CAPACITY must be a positive integer")]
    InvalidQueueCapacity,

    #[error("Invalid deletion transition policy: {0}")]
    InvalidTransitionPolicy(String),
}
