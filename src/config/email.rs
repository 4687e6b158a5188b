//! Email configuration (SMTP)

use serde::Deserialize;

use super::error::ValidationError;

/// Outbound mail settings.
///
/// With `enabled = false` messages are only logged.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,

    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    pub smtp_username: Option<String>,

    pub smtp_password: Option<String>,

    /// Upgrade the connection with STARTTLS
    #[serde(default = "default_starttls")]
    pub starttls: bool,

    /// From email address
    #[serde(default = "default_from_email")]
    pub from_email: String,

    /// From name
    #[serde(default = "default_from_name")]
    pub from_name: String,
}

impl EmailConfig {
    /// Get formatted "From" header value
    pub fn from_header(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_email)
    }

    /// Validate email configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.from_email.contains('@') {
            return Err(ValidationError::InvalidFromEmail);
        }
        if self.enabled {
            if self.smtp_host.is_empty() {
                return Err(ValidationError::MissingRequired("FAKING__EMAIL__SMTP_HOST"));
            }
            if self.smtp_port == 0 {
                return Err(ValidationError::InvalidPort);
            }
        }
        Ok(())
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            smtp_username: None,
            smtp_password: None,
            starttls: default_starttls(),
            from_email: default_from_email(),
            from_name: default_from_name(),
        }
    }
}

fn default_smtp_host() -> String {
    "localhost".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_starttls() -> bool {
    true
}

fn default_from_email() -> String {
    "noreply@faking.de".to_string()
}

fn default_from_name() -> String {
    "FakIng".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_config_defaults() {
        let config = EmailConfig::default();
        assert!(!config.enabled);
        assert_eq!(config.smtp_port, 587);
        assert!(config.starttls);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_header() {
        let config = EmailConfig::default();
        assert_eq!(config.from_header(), "FakIng <noreply@faking.de>");
    }

    #[test]
    fn test_validation_invalid_from() {
        let config = EmailConfig {
            from_email: "nobody".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidFromEmail)));
    }

    #[test]
    fn test_enabled_requires_host() {
        let config = EmailConfig {
            enabled: true,
            smtp_host: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
