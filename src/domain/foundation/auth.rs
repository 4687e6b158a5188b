//! Authentication types for the domain layer.
//!
//! These types represent the acting user of a request. Every operation takes
//! the acting user as an explicit argument; there is no ambient "current user".

use super::UserId;
use thiserror::Error;

/// The acting user, as carried by a validated session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub username: String,
    /// May invite to any team, pick any voter and fetch exports.
    pub is_superuser: bool,
}

impl AuthenticatedUser {
    pub fn new(id: UserId, username: impl Into<String>, is_superuser: bool) -> Self {
        Self {
            id,
            username: username.into(),
            is_superuser,
        }
    }
}

/// Why a session token was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Malformed, badly signed or naming an unparsable user id.
    #[error("invalid session token")]
    InvalidToken,

    #[error("session token expired")]
    TokenExpired,
}
