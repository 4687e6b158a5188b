//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Pool bounds are invalid (max must be positive and at least min)")]
    InvalidPoolSize,

    #[error("Secret {0} must be at least 32 bytes in production")]
    SecretTooShort(&'static str),

    #[error("Token validity must be positive")]
    InvalidTokenValidity,

    #[error("Invalid from email address")]
    InvalidFromEmail,

    #[error("Invalid email domain: {0}")]
    InvalidEmailDomain(String),

    #[error("Public base URL must start with http:// or https://")]
    InvalidBaseUrl,
}
