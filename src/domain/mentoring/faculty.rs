//! Faculties and their study programs.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{validators, FacultyId, ProgramId, Timestamp, ValidationError};

/// A faculty running its own mentoring sign-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faculty {
    pub id: FacultyId,
    pub name: String,
    pub slug: String,
    /// Six hex digits, without `#`.
    pub color: String,
    pub registration_deadline: Timestamp,
}

impl Faculty {
    pub fn new(
        name: impl Into<String>,
        slug: impl Into<String>,
        color: &str,
        registration_deadline: Timestamp,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: FacultyId::new(),
            name: name.into(),
            slug: slug.into(),
            color: validators::hex_color("color", color)?,
            registration_deadline,
        })
    }

    /// CSS notation of the faculty color.
    pub fn color_as_hex(&self) -> String {
        format!("#{}", self.color)
    }

    /// Registrations are accepted up to and including the deadline.
    pub fn accepts_registrations(&self, now: Timestamp) -> bool {
        !now.is_after(&self.registration_deadline)
    }
}

/// A study program offered by a faculty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub id: ProgramId,
    pub faculty_id: FacultyId,
    pub name: String,
}

impl Program {
    pub fn new(faculty_id: FacultyId, name: impl Into<String>) -> Self {
        Self {
            id: ProgramId::new(),
            faculty_id,
            name: name.into(),
        }
    }
}
