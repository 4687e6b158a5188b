//! Teams-specific error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorKind, ValidationErrors};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TeamsError {
    #[error("{0}")]
    Validation(ValidationErrors),

    #[error("invitation not found")]
    InvitationNotFound,

    #[error("invitation expired")]
    InvitationExpired,

    #[error("user not found")]
    UserNotFound,

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

impl TeamsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TeamsError::Validation(_) => ErrorKind::Validation,
            TeamsError::InvitationNotFound | TeamsError::UserNotFound => ErrorKind::NotFound,
            TeamsError::InvitationExpired => ErrorKind::Expired,
            TeamsError::InvalidCredentials => ErrorKind::Unauthenticated,
            TeamsError::Infrastructure(_) => ErrorKind::Infrastructure,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            TeamsError::Validation(_) => "VALIDATION_FAILED",
            TeamsError::InvitationNotFound => "INVITATION_NOT_FOUND",
            TeamsError::InvitationExpired => "INVITATION_EXPIRED",
            TeamsError::UserNotFound => "USER_NOT_FOUND",
            TeamsError::InvalidCredentials => "INVALID_CREDENTIALS",
            TeamsError::Infrastructure(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<ValidationErrors> for TeamsError {
    fn from(errors: ValidationErrors) -> Self {
        TeamsError::Validation(errors)
    }
}

impl From<DomainError> for TeamsError {
    fn from(err: DomainError) -> Self {
        TeamsError::Infrastructure(err.to_string())
    }
}
