//! Faculty, program and mentor directory queries.

use std::sync::Arc;

use crate::domain::mentoring::{Faculty, MentoringError, Program};
use crate::ports::{FacultyRepository, MentorRepository};

use super::faculty_by_slug;

pub struct ListFacultiesHandler {
    faculties: Arc<dyn FacultyRepository>,
}

impl ListFacultiesHandler {
    pub fn new(faculties: Arc<dyn FacultyRepository>) -> Self {
        Self { faculties }
    }

    pub async fn handle(&self) -> Result<Vec<Faculty>, MentoringError> {
        Ok(self.faculties.list_faculties().await?)
    }
}

/// Programs of a faculty, by name.
pub struct ListProgramsHandler {
    faculties: Arc<dyn FacultyRepository>,
}

impl ListProgramsHandler {
    pub fn new(faculties: Arc<dyn FacultyRepository>) -> Self {
        Self { faculties }
    }

    pub async fn handle(&self, slug: &str) -> Result<Vec<Program>, MentoringError> {
        let faculty = faculty_by_slug(self.faculties.as_ref(), slug).await?;
        Ok(self.faculties.programs_of(&faculty.id).await?)
    }
}

/// Mentors of a faculty, exposed by nickname only.
pub struct ListMentorNicknamesHandler {
    faculties: Arc<dyn FacultyRepository>,
    mentors: Arc<dyn MentorRepository>,
}

impl ListMentorNicknamesHandler {
    pub fn new(faculties: Arc<dyn FacultyRepository>, mentors: Arc<dyn MentorRepository>) -> Self {
        Self { faculties, mentors }
    }

    pub async fn handle(&self, slug: &str) -> Result<Vec<String>, MentoringError> {
        let faculty = faculty_by_slug(self.faculties.as_ref(), slug).await?;
        Ok(self
            .mentors
            .list_by_faculty(&faculty.id)
            .await?
            .into_iter()
            .map(|m| m.nickname)
            .collect())
    }
}
