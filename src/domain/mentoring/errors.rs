//! Mentoring-specific error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorKind, ValidationErrors};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MentoringError {
    #[error("{0}")]
    Validation(ValidationErrors),

    #[error("faculty not found: {0}")]
    FacultyNotFound(String),

    #[error("mentor not found")]
    MentorNotFound,

    #[error("the registration deadline has passed")]
    RegistrationClosed,

    #[error("deletion link is invalid")]
    TokenMalformed,

    #[error("deletion link has expired")]
    TokenExpired,

    #[error("no free nickname after {attempts} attempts")]
    PseudonymSpaceExhausted { attempts: usize },

    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

impl MentoringError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MentoringError::Validation(_)
            | MentoringError::TokenMalformed
            | MentoringError::PseudonymSpaceExhausted { .. } => ErrorKind::Validation,
            MentoringError::FacultyNotFound(_) | MentoringError::MentorNotFound => {
                ErrorKind::NotFound
            }
            MentoringError::RegistrationClosed => ErrorKind::Permission,
            MentoringError::TokenExpired => ErrorKind::Expired,
            MentoringError::Infrastructure(_) => ErrorKind::Infrastructure,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            MentoringError::Validation(_) => "VALIDATION_FAILED",
            MentoringError::FacultyNotFound(_) => "FACULTY_NOT_FOUND",
            MentoringError::MentorNotFound => "MENTOR_NOT_FOUND",
            MentoringError::RegistrationClosed => "REGISTRATION_CLOSED",
            MentoringError::TokenMalformed => "TOKEN_MALFORMED",
            MentoringError::TokenExpired => "TOKEN_EXPIRED",
            MentoringError::PseudonymSpaceExhausted { .. } => "PSEUDONYM_SPACE_EXHAUSTED",
            MentoringError::Infrastructure(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<ValidationErrors> for MentoringError {
    fn from(errors: ValidationErrors) -> Self {
        MentoringError::Validation(errors)
    }
}

impl From<DomainError> for MentoringError {
    fn from(err: DomainError) -> Self {
        MentoringError::Infrastructure(err.to_string())
    }
}
