//! HS256 JWT adapters.
//!
//! `JwtSessions` issues and validates bearer session tokens;
//! `JwtTokenSigner` signs the mentor deletion claims. Both use a shared
//! secret from configuration.

use std::time::Duration;

use async_trait::async_trait;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    AuthError, AuthenticatedUser, DomainError, ErrorCode, Timestamp, UserId,
};
use crate::domain::mentoring::DeletionClaims;
use crate::ports::{SessionIssuer, SessionValidator, TokenError, TokenSigner};

/// Claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User id
    pub sub: String,
    pub username: String,
    /// Superuser flag
    pub admin: bool,
    pub iat: i64,
    pub exp: i64,
}

/// Session tokens signed with a shared secret.
#[derive(Clone)]
pub struct JwtSessions {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: chrono::Duration,
}

impl JwtSessions {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        let ttl = chrono::Duration::from_std(ttl).unwrap_or_else(|_| chrono::Duration::hours(12));
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }
}

impl SessionIssuer for JwtSessions {
    fn issue(&self, user: &AuthenticatedUser, now: Timestamp) -> Result<String, DomainError> {
        let claims = SessionClaims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            admin: user.is_superuser,
            iat: now.as_unix_secs(),
            exp: now.plus(self.ttl).as_unix_secs(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            DomainError::new(ErrorCode::TokenSigningFailed, format!("session token: {}", e))
        })
    }
}

#[async_trait]
impl SessionValidator for JwtSessions {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);

        let data = decode::<SessionClaims>(token, &self.decoding_key, &validation).map_err(|e| {
            use jsonwebtoken::errors::ErrorKind;
            match e.kind() {
                ErrorKind::ExpiredSignature => {
                    tracing::debug!("Session token expired");
                    AuthError::TokenExpired
                }
                _ => {
                    tracing::warn!("Session token rejected: {}", e);
                    AuthError::InvalidToken
                }
            }
        })?;

        let id: UserId = data.claims.sub.parse().map_err(|_| AuthError::InvalidToken)?;
        Ok(AuthenticatedUser::new(id, data.claims.username, data.claims.admin))
    }
}

/// Signs deletion claims.
///
/// Expiry is checked against the caller's clock rather than the library's so
/// that verification stays deterministic.
#[derive(Clone)]
pub struct JwtTokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtTokenSigner {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

impl TokenSigner for JwtTokenSigner {
    fn sign(&self, claims: &DeletionClaims) -> Result<String, DomainError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key).map_err(|e| {
            DomainError::new(ErrorCode::TokenSigningFailed, format!("deletion token: {}", e))
        })
    }

    fn verify(&self, token: &str, now: Timestamp) -> Result<DeletionClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "iss"]);

        let claims = decode::<DeletionClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| {
                tracing::debug!("Deletion token rejected: {}", e);
                TokenError::Malformed
            })?
            .claims;

        if claims.is_expired(now) {
            return Err(TokenError::Expired);
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sessions() -> JwtSessions {
        JwtSessions::new("test-session-secret", Duration::from_secs(12 * 3600))
    }

    #[tokio::test]
    async fn issued_session_round_trips_the_actor() {
        let sessions = sessions();
        let user = AuthenticatedUser::new(UserId::new(), "emuster", true);

        let token = sessions.issue(&user, Timestamp::now()).unwrap();
        let validated = sessions.validate(&token).await.unwrap();

        assert_eq!(validated, user);
    }

    #[tokio::test]
    async fn old_session_is_expired() {
        let sessions = sessions();
        let user = AuthenticatedUser::new(UserId::new(), "emuster", false);

        let token = sessions.issue(&user, Timestamp::now().plus_days(-2)).unwrap();

        assert_eq!(sessions.validate(&token).await, Err(AuthError::TokenExpired));
    }

    #[tokio::test]
    async fn foreign_secret_is_invalid() {
        let user = AuthenticatedUser::new(UserId::new(), "emuster", false);
        let token = JwtSessions::new("other", Duration::from_secs(3600))
            .issue(&user, Timestamp::now())
            .unwrap();

        assert_eq!(sessions().validate(&token).await, Err(AuthError::InvalidToken));
        assert_eq!(sessions().validate("garbage").await, Err(AuthError::InvalidToken));
    }

    #[test]
    fn deletion_token_verifies_until_expiry() {
        let signer = JwtTokenSigner::new("deletion-secret");
        let now = Timestamp::now();
        let claims = DeletionClaims::new("mentor@st.ovgu.de", now, 30);

        let token = signer.sign(&claims).unwrap();

        assert_eq!(signer.verify(&token, now.plus_days(29)).unwrap(), claims);
        assert_eq!(signer.verify(&token, now.plus_days(31)), Err(TokenError::Expired));
    }

    #[test]
    fn tampered_deletion_token_is_malformed() {
        let signer = JwtTokenSigner::new("deletion-secret");
        let now = Timestamp::now();
        let token = JwtTokenSigner::new("guessed")
            .sign(&DeletionClaims::new("mentor@st.ovgu.de", now, 30))
            .unwrap();

        assert_eq!(signer.verify(&token, now), Err(TokenError::Malformed));
        assert_eq!(signer.verify("not.a.token", now), Err(TokenError::Malformed));
    }
}
