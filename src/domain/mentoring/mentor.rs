//! Mentor entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{FacultyId, MentorId, ProgramId, Timestamp};

/// A registered mentor, known to mentees only by nickname.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mentor {
    pub id: MentorId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub program_id: ProgramId,
    pub faculty_id: FacultyId,
    pub nickname: String,
    pub created_at: Timestamp,
}

impl Mentor {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
