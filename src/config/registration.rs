//! Registration policy

use serde::Deserialize;

use super::error::ValidationError;

/// Email domains accepted by the two registration flows and the base URL
/// used in outbound links.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationConfig {
    /// Domain required for votes accounts
    #[serde(default = "default_allowed_email_domain")]
    pub allowed_email_domain: String,

    /// Domains accepted for mentors and mentees (comma-separated)
    #[serde(default = "default_mentoring_email_domains")]
    pub mentoring_email_domains: String,

    /// Prefix for links in mails, without trailing slash
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
}

impl RegistrationConfig {
    pub fn mentoring_email_domains_list(&self) -> Vec<String> {
        self.mentoring_email_domains
            .split(',')
            .map(|d| d.trim().to_lowercase())
            .filter(|d| !d.is_empty())
            .collect()
    }

    /// Base URL with any trailing slash removed.
    pub fn base_url(&self) -> String {
        self.public_base_url.trim_end_matches('/').to_string()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !is_domain(&self.allowed_email_domain) {
            return Err(ValidationError::InvalidEmailDomain(
                self.allowed_email_domain.clone(),
            ));
        }
        let domains = self.mentoring_email_domains_list();
        if domains.is_empty() {
            return Err(ValidationError::MissingRequired(
                "FAKING__REGISTRATION__MENTORING_EMAIL_DOMAINS",
            ));
        }
        if let Some(bad) = domains.iter().find(|d| !is_domain(d)) {
            return Err(ValidationError::InvalidEmailDomain(bad.clone()));
        }
        if !self.public_base_url.starts_with("http://")
            && !self.public_base_url.starts_with("https://")
        {
            return Err(ValidationError::InvalidBaseUrl);
        }
        Ok(())
    }
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            allowed_email_domain: default_allowed_email_domain(),
            mentoring_email_domains: default_mentoring_email_domains(),
            public_base_url: default_public_base_url(),
        }
    }
}

fn is_domain(value: &str) -> bool {
    value.contains('.') && !value.contains('@') && !value.contains(char::is_whitespace)
}

fn default_allowed_email_domain() -> String {
    "st.ovgu.de".to_string()
}

fn default_mentoring_email_domains() -> String {
    "st.ovgu.de,ovgu.de".to_string()
}

fn default_public_base_url() -> String {
    "http://localhost:8080".to_string()
}
