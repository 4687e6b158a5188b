//! Votes-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | Kind | HTTP Status |
//! |-------|------|-------------|
//! | Validation | Validation | 422 |
//! | ForeignOption | Validation | 422 |
//! | NotOpen / NotEntitled / AlreadyVoted / ResultsNotAvailable | Permission | 403 |
//! | DecisionNotFound | NotFound | 404 |
//! | Infrastructure | Infrastructure | 500 |

use thiserror::Error;

use crate::domain::foundation::{DecisionId, DomainError, ErrorCode, ErrorKind, ValidationErrors};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VotesError {
    #[error("{0}")]
    Validation(ValidationErrors),

    #[error("voting not currently open")]
    NotOpen,

    #[error("not entitled to vote")]
    NotEntitled,

    #[error("already voted")]
    AlreadyVoted,

    #[error("option does not belong to this decision")]
    ForeignOption,

    #[error("decision not found: {0}")]
    DecisionNotFound(DecisionId),

    #[error("results are only available once the decision is closed")]
    ResultsNotAvailable,

    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

impl VotesError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            VotesError::Validation(_) | VotesError::ForeignOption => ErrorKind::Validation,
            VotesError::NotOpen
            | VotesError::NotEntitled
            | VotesError::AlreadyVoted
            | VotesError::ResultsNotAvailable => ErrorKind::Permission,
            VotesError::DecisionNotFound(_) => ErrorKind::NotFound,
            VotesError::Infrastructure(_) => ErrorKind::Infrastructure,
        }
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            VotesError::Validation(_) => "VALIDATION_FAILED",
            VotesError::NotOpen => "VOTING_NOT_OPEN",
            VotesError::NotEntitled => "NOT_ENTITLED",
            VotesError::AlreadyVoted => "ALREADY_VOTED",
            VotesError::ForeignOption => "FOREIGN_OPTION",
            VotesError::DecisionNotFound(_) => "DECISION_NOT_FOUND",
            VotesError::ResultsNotAvailable => "RESULTS_NOT_AVAILABLE",
            VotesError::Infrastructure(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<ValidationErrors> for VotesError {
    fn from(errors: ValidationErrors) -> Self {
        VotesError::Validation(errors)
    }
}

impl From<DomainError> for VotesError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::AlreadyVoted => VotesError::AlreadyVoted,
            ErrorCode::NotEntitled => VotesError::NotEntitled,
            ErrorCode::Forbidden => VotesError::NotOpen,
            ErrorCode::ValidationFailed => VotesError::ForeignOption,
            _ => VotesError::Infrastructure(err.to_string()),
        }
    }
}

/// Admission failures detected inside a ledger transaction.
impl From<VotesError> for DomainError {
    fn from(err: VotesError) -> Self {
        let code = match &err {
            VotesError::NotOpen => ErrorCode::Forbidden,
            VotesError::NotEntitled => ErrorCode::NotEntitled,
            VotesError::AlreadyVoted => ErrorCode::AlreadyVoted,
            VotesError::ForeignOption | VotesError::Validation(_) => ErrorCode::ValidationFailed,
            VotesError::DecisionNotFound(_) => ErrorCode::NotFound,
            VotesError::ResultsNotAvailable => ErrorCode::Forbidden,
            VotesError::Infrastructure(_) => ErrorCode::InternalError,
        };
        DomainError::new(code, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ledger_conflicts_map_to_admission_errors() {
        let err = DomainError::new(ErrorCode::AlreadyVoted, "duplicate");
        assert_eq!(VotesError::from(err), VotesError::AlreadyVoted);

        let err = DomainError::new(ErrorCode::NotEntitled, "no voter row");
        assert_eq!(VotesError::from(err), VotesError::NotEntitled);

        let err = DomainError::database("connection reset");
        assert_eq!(VotesError::from(err).kind(), ErrorKind::Infrastructure);
    }

    #[test]
    fn admission_errors_survive_the_ledger_boundary() {
        for err in [
            VotesError::NotOpen,
            VotesError::NotEntitled,
            VotesError::AlreadyVoted,
            VotesError::ForeignOption,
        ] {
            let through_port: DomainError = err.clone().into();
            assert_eq!(VotesError::from(through_port), err);
        }
    }

    #[test]
    fn admission_errors_are_permission_errors() {
        for err in [VotesError::NotOpen, VotesError::NotEntitled, VotesError::AlreadyVoted] {
            assert_eq!(err.kind(), ErrorKind::Permission);
        }
        assert_eq!(VotesError::ForeignOption.kind(), ErrorKind::Validation);
    }
}
