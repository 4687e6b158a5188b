//! Signed token port for the mentor deletion link.

use thiserror::Error;

use crate::domain::foundation::{DomainError, Timestamp};
use crate::domain::mentoring::{DeletionClaims, MentoringError};

/// Verification outcome other than success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token is malformed or has an invalid signature")]
    Malformed,
    #[error("token has expired")]
    Expired,
}

impl From<TokenError> for MentoringError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Malformed => MentoringError::TokenMalformed,
            TokenError::Expired => MentoringError::TokenExpired,
        }
    }
}

/// Issues and verifies signed deletion claims.
///
/// Signing is CPU-only, so the trait is synchronous.
pub trait TokenSigner: Send + Sync {
    fn sign(&self, claims: &DeletionClaims) -> Result<String, DomainError>;

    /// Verifies signature and shape first, then expiry against `now`.
    fn verify(&self, token: &str, now: Timestamp) -> Result<DeletionClaims, TokenError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_signer_is_object_safe() {
        fn _accepts_dyn(_signer: &dyn TokenSigner) {}
    }

    #[test]
    fn token_errors_map_to_mentoring_errors() {
        assert_eq!(
            MentoringError::from(TokenError::Expired),
            MentoringError::TokenExpired
        );
        assert_eq!(
            MentoringError::from(TokenError::Malformed),
            MentoringError::TokenMalformed
        );
    }
}
