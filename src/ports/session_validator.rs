//! Session token ports.
//!
//! Bearer tokens are validated by HTTP middleware, which places the
//! resulting `AuthenticatedUser` in the request extensions. Handlers receive
//! the acting user explicitly.
//!
//! # Contract
//!
//! Implementations must:
//! - Validate the token signature
//! - Validate the expiry claim
//! - Return `AuthError::InvalidToken` for malformed tokens or bad signatures
//! - Return `AuthError::TokenExpired` for expired tokens

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, DomainError, Timestamp};

/// Validates access tokens and extracts user identity.
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate a raw token (without "Bearer " prefix).
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}

/// Issues access tokens after a successful login.
pub trait SessionIssuer: Send + Sync {
    fn issue(&self, user: &AuthenticatedUser, now: Timestamp) -> Result<String, DomainError>;
}
