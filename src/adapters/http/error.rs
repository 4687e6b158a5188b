//! JSON error responses for all API endpoints.
//!
//! Module errors carry an [`ErrorKind`]; the kind alone decides the status
//! code. Port errors that reach a route directly are mapped by [`ErrorCode`].

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode, ErrorKind, ValidationErrors};
use crate::domain::mentoring::MentoringError;
use crate::domain::teams::TeamsError;
use crate::domain::votes::VotesError;

/// A rejected form field.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldErrorResponse {
    pub field: String,
    pub message: String,
}

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Stable code for programmatic handling.
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FieldErrorResponse>>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            fields: None,
        }
    }

    pub fn with_fields(mut self, errors: &ValidationErrors) -> Self {
        self.fields = Some(
            errors
                .iter()
                .map(|e| FieldErrorResponse {
                    field: e.field().to_string(),
                    message: e.to_string(),
                })
                .collect(),
        );
        self
    }
}

/// Error returned by HTTP handlers.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, body: ErrorResponse) -> Self {
        Self { status, body }
    }

    /// 400 for request data that fails to parse before reaching a handler.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ErrorResponse::new("BAD_REQUEST", message))
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn code(&self) -> &str {
        &self.body.code
    }

    fn from_kind(
        kind: ErrorKind,
        code: &str,
        message: String,
        fields: Option<&ValidationErrors>,
    ) -> Self {
        let status = status_for(kind);
        let message = if status.is_server_error() {
            tracing::error!(code, error = %message, "request failed");
            "internal server error".to_string()
        } else {
            message
        };
        let mut body = ErrorResponse::new(code, message);
        if let Some(errors) = fields {
            body = body.with_fields(errors);
        }
        Self { status, body }
    }
}

/// Maps an error category to its HTTP status.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::Unauthenticated => StatusCode::UNAUTHORIZED,
        ErrorKind::Permission => StatusCode::FORBIDDEN,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Expired => StatusCode::GONE,
        ErrorKind::Infrastructure => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<VotesError> for ApiError {
    fn from(err: VotesError) -> Self {
        let fields = match &err {
            VotesError::Validation(errors) => Some(errors),
            _ => None,
        };
        Self::from_kind(err.kind(), err.code(), err.to_string(), fields)
    }
}

impl From<TeamsError> for ApiError {
    fn from(err: TeamsError) -> Self {
        let fields = match &err {
            TeamsError::Validation(errors) => Some(errors),
            _ => None,
        };
        Self::from_kind(err.kind(), err.code(), err.to_string(), fields)
    }
}

impl From<MentoringError> for ApiError {
    fn from(err: MentoringError) -> Self {
        let fields = match &err {
            MentoringError::Validation(errors) => Some(errors),
            _ => None,
        };
        Self::from_kind(err.kind(), err.code(), err.to_string(), fields)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let kind = match err.code {
            ErrorCode::ValidationFailed => ErrorKind::Validation,
            ErrorCode::NotFound => ErrorKind::NotFound,
            ErrorCode::Unauthorized => ErrorKind::Unauthenticated,
            ErrorCode::Forbidden | ErrorCode::NotEntitled | ErrorCode::AlreadyVoted => {
                ErrorKind::Permission
            }
            _ => ErrorKind::Infrastructure,
        };
        Self::from_kind(kind, &err.code.to_string(), err.message, None)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DecisionId, ValidationError};

    #[test]
    fn kinds_map_to_statuses() {
        assert_eq!(status_for(ErrorKind::Validation), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(status_for(ErrorKind::Unauthenticated), StatusCode::UNAUTHORIZED);
        assert_eq!(status_for(ErrorKind::Permission), StatusCode::FORBIDDEN);
        assert_eq!(status_for(ErrorKind::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_for(ErrorKind::Expired), StatusCode::GONE);
        assert_eq!(status_for(ErrorKind::Infrastructure), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn validation_errors_list_fields() {
        let mut errors = ValidationErrors::new();
        errors.push(ValidationError::empty_field("subject"));
        errors.push(ValidationError::rejected("end", "window too short"));

        let err = ApiError::from(VotesError::Validation(errors));

        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let fields = err.body.fields.expect("fields");
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].field, "subject");
        assert_eq!(fields[1].field, "end");
    }

    #[test]
    fn module_codes_are_kept() {
        let err = ApiError::from(VotesError::AlreadyVoted);
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
        assert_eq!(err.code(), "ALREADY_VOTED");

        let err = ApiError::from(VotesError::DecisionNotFound(DecisionId::new()));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);

        let err = ApiError::from(MentoringError::TokenExpired);
        assert_eq!(err.status(), StatusCode::GONE);

        let err = ApiError::from(TeamsError::InvalidCredentials);
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn infrastructure_messages_are_hidden() {
        let err = ApiError::from(TeamsError::Infrastructure("pool timed out".to_string()));

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.body.message, "internal server error");
    }

    #[test]
    fn port_errors_map_by_code() {
        let err = ApiError::from(DomainError::new(ErrorCode::Forbidden, "superusers only"));
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
        assert_eq!(err.code(), "FORBIDDEN");

        let err = ApiError::from(DomainError::new(ErrorCode::NotFound, "unknown export"));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);

        let err = ApiError::from(DomainError::database("connection reset"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
