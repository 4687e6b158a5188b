//! Mentor repository port.

use async_trait::async_trait;
use std::collections::HashSet;

use crate::domain::foundation::{DomainError, FacultyId};
use crate::domain::mentoring::Mentor;

#[async_trait]
pub trait MentorRepository: Send + Sync {
    /// Persists a new mentor.
    ///
    /// # Errors
    ///
    /// - `Conflict` (field `email` or `nickname`) on a uniqueness violation
    /// - `DatabaseError` on persistence failure
    async fn save(&self, mentor: &Mentor) -> Result<(), DomainError>;

    /// Every nickname in use.
    async fn nicknames(&self) -> Result<HashSet<String>, DomainError>;

    async fn find_by_nickname(&self, nickname: &str) -> Result<Option<Mentor>, DomainError>;

    async fn email_exists(&self, email: &str) -> Result<bool, DomainError>;

    /// Removes the mentor with this email. Returns `false` if none existed.
    async fn delete_by_email(&self, email: &str) -> Result<bool, DomainError>;

    /// Mentors of the faculty ordered by nickname.
    async fn list_by_faculty(&self, faculty: &FacultyId) -> Result<Vec<Mentor>, DomainError>;

    async fn list_all(&self) -> Result<Vec<Mentor>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mentor_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn MentorRepository) {}
    }
}
