//! Claims of the mentor self-service deletion link.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

pub const DEFAULT_DELETION_VALIDITY_DAYS: i64 = 30;

/// Signed into the deletion token: issuer is the mentor's email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletionClaims {
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
}

impl DeletionClaims {
    pub fn new(email: impl Into<String>, now: Timestamp, validity_days: i64) -> Self {
        Self {
            iss: email.into(),
            iat: now.as_unix_secs(),
            exp: now.plus_days(validity_days).as_unix_secs(),
        }
    }

    pub fn email(&self) -> &str {
        &self.iss
    }

    /// True once `now` is past `exp`.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        now.as_unix_secs() > self.exp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_expire_after_validity() {
        let now = Timestamp::now();
        let claims = DeletionClaims::new("m@st.ovgu.de", now, DEFAULT_DELETION_VALIDITY_DAYS);

        assert_eq!(claims.email(), "m@st.ovgu.de");
        assert!(!claims.is_expired(now.plus_days(29)));
        assert!(claims.is_expired(now.plus_days(31)));
    }
}
