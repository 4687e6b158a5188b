//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, errors and field validators
//! that form the vocabulary of both applications.

mod auth;
mod errors;
mod ids;
mod timestamp;
pub mod validators;

pub use auth::{AuthError, AuthenticatedUser};
pub use errors::{DomainError, ErrorCode, ErrorKind, ValidationError, ValidationErrors};
pub use ids::{
    DecisionId, FacultyId, InvitationId, MenteeId, MentorId, OptionId, ProgramId, TeamId, UserId,
    VoteId,
};
pub use timestamp::Timestamp;
