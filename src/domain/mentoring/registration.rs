//! Mentor and mentee sign-up validation.
//!
//! Both pipelines check the faculty deadline first, then validate every
//! field independently and report all failures together.

use super::{Faculty, Mentor, MentoringError, Program};
use crate::domain::foundation::{
    validators, MentorId, ProgramId, Timestamp, ValidationError, ValidationErrors,
};

/// Raw mentor sign-up input.
#[derive(Debug, Clone, Default)]
pub struct MentorForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub program_id: Option<ProgramId>,
    pub privacy: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentorDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub program_id: ProgramId,
}

/// Raw mentee sign-up input.
#[derive(Debug, Clone, Default)]
pub struct MenteeForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub program_id: Option<ProgramId>,
    pub mentor_nickname: String,
    pub privacy: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenteeDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub program_id: ProgramId,
    pub mentor_id: MentorId,
    pub mentor_nickname: String,
}

fn program_of(
    faculty: &Faculty,
    programs: &[Program],
    program_id: Option<ProgramId>,
) -> Result<ProgramId, ValidationError> {
    let id = program_id.ok_or_else(|| ValidationError::empty_field("program"))?;
    programs
        .iter()
        .find(|p| p.id == id && p.faculty_id == faculty.id)
        .map(|p| p.id)
        .ok_or_else(|| ValidationError::rejected("program", "not a program of this faculty"))
}

fn privacy(accepted: bool) -> Result<(), ValidationError> {
    if accepted {
        Ok(())
    } else {
        Err(ValidationError::rejected(
            "privacy",
            "the privacy policy must be accepted",
        ))
    }
}

fn unique_email(
    value: &str,
    allowed_domains: &[String],
    email_taken: impl Fn(&str) -> bool,
) -> Result<String, ValidationError> {
    let email = validators::email("email", value, allowed_domains)?;
    if email_taken(&email) {
        return Err(ValidationError::rejected("email", "this address is already registered"));
    }
    Ok(email)
}

fn ensure_open(faculty: &Faculty, now: Timestamp) -> Result<(), MentoringError> {
    if faculty.accepts_registrations(now) {
        Ok(())
    } else {
        Err(MentoringError::RegistrationClosed)
    }
}

/// Validates a mentor sign-up for `faculty`.
///
/// `email_taken` receives the normalized address.
pub fn validate_mentor(
    form: &MentorForm,
    faculty: &Faculty,
    programs: &[Program],
    allowed_domains: &[String],
    email_taken: impl Fn(&str) -> bool,
    now: Timestamp,
) -> Result<MentorDetails, MentoringError> {
    ensure_open(faculty, now)?;

    let mut errors = ValidationErrors::new();
    let first_name = errors.check(validators::person_name("first_name", &form.first_name));
    let last_name = errors.check(validators::person_name("last_name", &form.last_name));
    let email = errors.check(unique_email(&form.email, allowed_domains, email_taken));
    let phone = errors.check(validators::phone("phone", &form.phone));
    let program_id = errors.check(program_of(faculty, programs, form.program_id));
    errors.check(privacy(form.privacy));

    errors.into_result()?;

    match (first_name, last_name, email, phone, program_id) {
        (Some(first_name), Some(last_name), Some(email), Some(phone), Some(program_id)) => {
            Ok(MentorDetails {
                first_name,
                last_name,
                email,
                phone,
                program_id,
            })
        }
        _ => Err(MentoringError::Infrastructure(
            "validation passed without cleaned values".to_string(),
        )),
    }
}

/// Validates a mentee sign-up for `faculty`.
///
/// `mentor` is the result of looking up the nickname; mentors of other
/// faculties are rejected.
pub fn validate_mentee(
    form: &MenteeForm,
    faculty: &Faculty,
    programs: &[Program],
    mentor: Option<&Mentor>,
    allowed_domains: &[String],
    email_taken: impl Fn(&str) -> bool,
    now: Timestamp,
) -> Result<MenteeDetails, MentoringError> {
    ensure_open(faculty, now)?;

    let mut errors = ValidationErrors::new();
    let first_name = errors.check(validators::person_name("first_name", &form.first_name));
    let last_name = errors.check(validators::person_name("last_name", &form.last_name));
    let email = errors.check(unique_email(&form.email, allowed_domains, email_taken));
    let program_id = errors.check(program_of(faculty, programs, form.program_id));
    let mentor = errors.check(
        validators::required("mentor", &form.mentor_nickname).and_then(|_| {
            mentor
                .filter(|m| m.faculty_id == faculty.id)
                .ok_or_else(|| ValidationError::rejected("mentor", "no mentor with this nickname"))
        }),
    );
    errors.check(privacy(form.privacy));

    errors.into_result()?;

    match (first_name, last_name, email, program_id, mentor) {
        (Some(first_name), Some(last_name), Some(email), Some(program_id), Some(mentor)) => {
            Ok(MenteeDetails {
                first_name,
                last_name,
                email,
                program_id,
                mentor_id: mentor.id,
                mentor_nickname: mentor.nickname.clone(),
            })
        }
        _ => Err(MentoringError::Infrastructure(
            "validation passed without cleaned values".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{FacultyId, MentorId};

    fn domains() -> Vec<String> {
        vec!["st.ovgu.de".to_string(), "ovgu.de".to_string()]
    }

    fn faculty(deadline: Timestamp) -> (Faculty, Vec<Program>) {
        let faculty = Faculty::new("Informatik", "fin", "0068B4", deadline).unwrap();
        let programs = vec![
            Program::new(faculty.id, "Informatik"),
            Program::new(FacultyId::new(), "Maschinenbau"),
        ];
        (faculty, programs)
    }

    fn mentor_form(program_id: ProgramId) -> MentorForm {
        MentorForm {
            first_name: "max".to_string(),
            last_name: "mustermann".to_string(),
            email: "Max.Mustermann@OVGU.de".to_string(),
            phone: "0049 171 / 123-456".to_string(),
            program_id: Some(program_id),
            privacy: true,
        }
    }

    fn mentor_of(faculty: &Faculty, program: &Program) -> Mentor {
        Mentor {
            id: MentorId::new(),
            first_name: "Max".to_string(),
            last_name: "Mustermann".to_string(),
            email: "max@st.ovgu.de".to_string(),
            phone: "+49171".to_string(),
            program_id: program.id,
            faculty_id: faculty.id,
            nickname: "MAXMUS".to_string(),
            created_at: Timestamp::now(),
        }
    }

    #[test]
    fn mentor_form_is_cleaned() {
        let now = Timestamp::now();
        let (faculty, programs) = faculty(now.plus_days(1));

        let details =
            validate_mentor(&mentor_form(programs[0].id), &faculty, &programs, &domains(), |_| false, now)
                .unwrap();

        assert_eq!(details.first_name, "Max");
        assert_eq!(details.email, "max.mustermann@ovgu.de");
        assert_eq!(details.phone, "+49171123456");
    }

    #[test]
    fn mentor_errors_are_collected() {
        let now = Timestamp::now();
        let (faculty, programs) = faculty(now.plus_days(1));
        let mut form = mentor_form(programs[1].id);
        form.email = "max@gmail.com".to_string();
        form.phone = "0171 123".to_string();
        form.privacy = false;

        match validate_mentor(&form, &faculty, &programs, &domains(), |_| false, now) {
            Err(MentoringError::Validation(errors)) => {
                assert_eq!(errors.len(), 4);
                for field in ["email", "phone", "program", "privacy"] {
                    assert!(errors.has_field(field), "missing {}", field);
                }
            }
            other => panic!("expected validation errors, got {:?}", other),
        }
    }

    #[test]
    fn taken_email_is_rejected() {
        let now = Timestamp::now();
        let (faculty, programs) = faculty(now.plus_days(1));
        let result = validate_mentor(
            &mentor_form(programs[0].id),
            &faculty,
            &programs,
            &domains(),
            |email| email == "max.mustermann@ovgu.de",
            now,
        );
        assert!(matches!(result, Err(MentoringError::Validation(e)) if e.has_field("email")));
    }

    #[test]
    fn registration_after_deadline_is_closed() {
        let now = Timestamp::now();
        let (faculty, programs) = faculty(now.minus_minutes(1));
        let result =
            validate_mentor(&mentor_form(programs[0].id), &faculty, &programs, &domains(), |_| false, now);
        assert_eq!(result, Err(MentoringError::RegistrationClosed));
    }

    #[test]
    fn mentee_must_pick_mentor_of_same_faculty() {
        let now = Timestamp::now();
        let (faculty, programs) = faculty(now.plus_days(1));
        let mut foreign = mentor_of(&faculty, &programs[0]);
        foreign.faculty_id = FacultyId::new();

        let form = MenteeForm {
            first_name: "Lisa".to_string(),
            last_name: "Neu".to_string(),
            email: "lisa.neu@st.ovgu.de".to_string(),
            program_id: Some(programs[0].id),
            mentor_nickname: "MAXMUS".to_string(),
            privacy: true,
        };

        let result = validate_mentee(&form, &faculty, &programs, Some(&foreign), &domains(), |_| false, now);
        assert!(matches!(result, Err(MentoringError::Validation(e)) if e.has_field("mentor")));

        let own = mentor_of(&faculty, &programs[0]);
        let details =
            validate_mentee(&form, &faculty, &programs, Some(&own), &domains(), |_| false, now).unwrap();
        assert_eq!(details.mentor_id, own.id);
        assert_eq!(details.mentor_nickname, "MAXMUS");
    }
}
