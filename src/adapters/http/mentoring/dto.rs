//! HTTP DTOs for the mentoring sign-up.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ProgramId, Timestamp};
use crate::domain::mentoring::{Faculty, MenteeForm, MentorForm, Program};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Mentor sign-up form.
#[derive(Debug, Clone, Deserialize)]
pub struct MentorSignupRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub program_id: Option<ProgramId>,
    /// Consent to the privacy notice.
    #[serde(default)]
    pub privacy: bool,
}

impl From<MentorSignupRequest> for MentorForm {
    fn from(request: MentorSignupRequest) -> Self {
        Self {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            phone: request.phone,
            program_id: request.program_id,
            privacy: request.privacy,
        }
    }
}

/// Mentee sign-up form.
#[derive(Debug, Clone, Deserialize)]
pub struct MenteeSignupRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub program_id: Option<ProgramId>,
    /// Nickname of the chosen mentor.
    #[serde(default)]
    pub mentor: String,
    #[serde(default)]
    pub privacy: bool,
}

impl From<MenteeSignupRequest> for MenteeForm {
    fn from(request: MenteeSignupRequest) -> Self {
        Self {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            program_id: request.program_id,
            mentor_nickname: request.mentor,
            privacy: request.privacy,
        }
    }
}

/// Token from a mentor's deletion link.
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteMentorRequest {
    pub token: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct FacultyResponse {
    pub name: String,
    pub slug: String,
    /// CSS color, `#RRGGBB`.
    pub color: String,
    pub registration_deadline: Timestamp,
    pub open: bool,
}

impl FacultyResponse {
    pub fn new(faculty: Faculty, now: Timestamp) -> Self {
        Self {
            open: faculty.accepts_registrations(now),
            color: faculty.color_as_hex(),
            name: faculty.name,
            slug: faculty.slug,
            registration_deadline: faculty.registration_deadline,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProgramResponse {
    pub id: ProgramId,
    pub name: String,
}

impl From<Program> for ProgramResponse {
    fn from(program: Program) -> Self {
        Self {
            id: program.id,
            name: program.name,
        }
    }
}

/// Pseudonym assigned to a new mentor.
#[derive(Debug, Clone, Serialize)]
pub struct MentorSignupResponse {
    pub nickname: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MenteeSignupResponse {
    /// Nickname of the mentor the mentee was assigned to.
    pub mentor: String,
}
