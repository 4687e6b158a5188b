//! Mentee repository port.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::mentoring::Mentee;

#[async_trait]
pub trait MenteeRepository: Send + Sync {
    /// Persists a new mentee.
    ///
    /// # Errors
    ///
    /// - `Conflict` (field `email`) if the address is registered
    /// - `DatabaseError` on persistence failure
    async fn save(&self, mentee: &Mentee) -> Result<(), DomainError>;

    async fn email_exists(&self, email: &str) -> Result<bool, DomainError>;

    async fn list_all(&self) -> Result<Vec<Mentee>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mentee_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn MenteeRepository) {}
    }
}
