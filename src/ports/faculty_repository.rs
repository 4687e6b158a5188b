//! Faculty and program repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, FacultyId};
use crate::domain::mentoring::{Faculty, Program};

#[async_trait]
pub trait FacultyRepository: Send + Sync {
    async fn save_faculty(&self, faculty: &Faculty) -> Result<(), DomainError>;

    async fn save_program(&self, program: &Program) -> Result<(), DomainError>;

    /// All faculties ordered by name.
    async fn list_faculties(&self) -> Result<Vec<Faculty>, DomainError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Faculty>, DomainError>;

    /// Programs of the faculty ordered by name.
    async fn programs_of(&self, faculty: &FacultyId) -> Result<Vec<Program>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn faculty_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn FacultyRepository) {}
    }
}
