//! Mentoring domain module.
//!
//! Faculties with their programs and registration deadlines, mentors with
//! pseudonymous nicknames, mentees choosing a mentor, and the claims behind
//! the self-service deletion link.
//!
//! # Module Structure
//!
//! - `faculty` - Faculty and Program
//! - `mentor` / `mentee` - Registered participants
//! - `pseudonym` - Unique nickname generation
//! - `registration` - Form validation pipelines
//! - `deletion` - Deletion token claims
//! - `errors` - MentoringError

mod deletion;
mod errors;
mod faculty;
mod mentee;
mod mentor;
mod pseudonym;
mod registration;

pub use deletion::{DeletionClaims, DEFAULT_DELETION_VALIDITY_DAYS};
pub use errors::MentoringError;
pub use faculty::{Faculty, Program};
pub use mentee::Mentee;
pub use mentor::Mentor;
pub use pseudonym::{generate_unique_pseudonym, MAX_PSEUDONYM_ATTEMPTS, PSEUDONYM_PART_LEN};
pub use registration::{
    validate_mentee, validate_mentor, MenteeDetails, MenteeForm, MentorDetails, MentorForm,
};
