//! Mentee entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{FacultyId, MenteeId, MentorId, ProgramId, Timestamp};

/// A first-semester student who picked a mentor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mentee {
    pub id: MenteeId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub program_id: ProgramId,
    pub faculty_id: FacultyId,
    pub mentor_id: MentorId,
    pub created_at: Timestamp,
}

impl Mentee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
