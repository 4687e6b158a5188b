//! Mentoring application handlers.

mod delete_mentor;
mod queries;
mod register_mentee;
mod register_mentor;

pub use delete_mentor::{DeleteMentorCommand, DeleteMentorHandler};
pub use queries::{ListFacultiesHandler, ListMentorNicknamesHandler, ListProgramsHandler};
pub use register_mentee::{RegisterMenteeCommand, RegisterMenteeHandler};
pub use register_mentor::{RegisterMentorCommand, RegisterMentorHandler, MAX_SAVE_ATTEMPTS};

use crate::domain::foundation::{ValidationError, ValidationErrors};
use crate::domain::mentoring::{Faculty, MentoringError};
use crate::ports::FacultyRepository;

/// Registration policy shared by the mentoring handlers.
#[derive(Debug, Clone)]
pub struct MentoringSettings {
    pub allowed_email_domains: Vec<String>,
    /// Prefix for links in mails, without trailing slash
    pub public_base_url: String,
    pub deletion_validity_days: i64,
}

impl MentoringSettings {
    pub fn deletion_link(&self, token: &str) -> String {
        format!(
            "{}/mentoring/delete?token={}",
            self.public_base_url.trim_end_matches('/'),
            token
        )
    }
}

async fn faculty_by_slug(
    faculties: &dyn FacultyRepository,
    slug: &str,
) -> Result<Faculty, MentoringError> {
    faculties
        .find_by_slug(slug)
        .await?
        .ok_or_else(|| MentoringError::FacultyNotFound(slug.to_string()))
}

/// Lowercased address for the uniqueness lookup before validation.
fn email_candidate(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn email_taken_error() -> MentoringError {
    let errors: ValidationErrors =
        ValidationError::rejected("email", "this address is already registered").into();
    errors.into()
}
