//! Session and deletion-token configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

const MIN_PRODUCTION_SECRET_LEN: usize = 32;

/// Secrets and lifetimes for the HS256 tokens the service signs.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Key for bearer session tokens
    pub session_secret: String,

    /// Session lifetime in hours
    #[serde(default = "default_session_ttl_hours")]
    pub session_ttl_hours: u64,

    /// Key for mentor self-deletion links
    pub deletion_token_secret: String,

    /// Days a deletion link stays valid
    #[serde(default = "default_deletion_token_validity_days")]
    pub deletion_token_validity_days: i64,
}

impl AuthConfig {
    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_hours * 3600)
    }

    /// Production requires secrets long enough for HS256.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.session_secret.is_empty() {
            return Err(ValidationError::MissingRequired("FAKING__AUTH__SESSION_SECRET"));
        }
        if self.deletion_token_secret.is_empty() {
            return Err(ValidationError::MissingRequired(
                "FAKING__AUTH__DELETION_TOKEN_SECRET",
            ));
        }
        if self.session_ttl_hours == 0 || self.deletion_token_validity_days <= 0 {
            return Err(ValidationError::InvalidTokenValidity);
        }
        if *environment == Environment::Production {
            if self.session_secret.len() < MIN_PRODUCTION_SECRET_LEN {
                return Err(ValidationError::SecretTooShort("session_secret"));
            }
            if self.deletion_token_secret.len() < MIN_PRODUCTION_SECRET_LEN {
                return Err(ValidationError::SecretTooShort("deletion_token_secret"));
            }
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_secret: String::new(),
            session_ttl_hours: default_session_ttl_hours(),
            deletion_token_secret: String::new(),
            deletion_token_validity_days: default_deletion_token_validity_days(),
        }
    }
}

fn default_session_ttl_hours() -> u64 {
    12
}

fn default_deletion_token_validity_days() -> i64 {
    30
}
