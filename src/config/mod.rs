//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables with the
//! `config` and `dotenvy` crates. Variables use the `FAKING` prefix and `__`
//! between nested keys.
//!
//! # Example
//!
//! ```no_run
//! use faking::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod auth;
mod database;
mod email;
mod error;
mod registration;
mod server;

pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use email::EmailConfig;
pub use error::{ConfigError, ValidationError};
pub use registration::RegistrationConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL connection)
    pub database: DatabaseConfig,

    /// Token secrets and lifetimes
    pub auth: AuthConfig,

    /// Outbound mail
    #[serde(default)]
    pub email: EmailConfig,

    /// Registration policy
    #[serde(default)]
    pub registration: RegistrationConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// - `FAKING__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `FAKING__DATABASE__URL=...` -> `database.url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or a value
    /// cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("FAKING")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate(&self.server.environment)?;
        self.email.validate()?;
        self.registration.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const REQUIRED: [(&str, &str); 3] = [
        ("FAKING__DATABASE__URL", "postgresql://faking@localhost/faking"),
        ("FAKING__AUTH__SESSION_SECRET", "session-secret"),
        ("FAKING__AUTH__DELETION_TOKEN_SECRET", "deletion-secret"),
    ];

    /// Loads with the required variables plus `extra`, then clears them all.
    fn load_with(extra: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let _guard = ENV_MUTEX.lock().unwrap();
        for (key, value) in REQUIRED.iter().chain(extra) {
            env::set_var(key, value);
        }
        let result = AppConfig::load();
        for (key, _) in REQUIRED.iter().chain(extra) {
            env::remove_var(key);
        }
        result
    }

    #[test]
    fn test_minimal_environment_is_valid() {
        let config = load_with(&[]).unwrap();

        assert_eq!(config.database.url, "postgresql://faking@localhost/faking");
        assert_eq!(config.server.port, 8080);
        assert!(!config.email.enabled);
        assert_eq!(config.registration.allowed_email_domain, "st.ovgu.de");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_nested_overrides() {
        let config = load_with(&[
            ("FAKING__SERVER__PORT", "3000"),
            ("FAKING__REGISTRATION__ALLOWED_EMAIL_DOMAIN", "ovgu.de"),
        ])
        .unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.registration.allowed_email_domain, "ovgu.de");
    }

    #[test]
    fn test_production_demands_long_secrets() {
        let config = load_with(&[("FAKING__SERVER__ENVIRONMENT", "production")]).unwrap();

        assert!(config.is_production());
        assert!(matches!(
            config.validate(),
            Err(ValidationError::SecretTooShort(_))
        ));
    }

    #[test]
    fn test_database_section_is_required() {
        let _guard = ENV_MUTEX.lock().unwrap();
        for (key, _) in REQUIRED {
            env::remove_var(key);
        }
        assert!(AppConfig::load().is_err());
    }
}
