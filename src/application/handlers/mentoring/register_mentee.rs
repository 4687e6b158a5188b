//! RegisterMenteeHandler - Command handler for mentee sign-up.

use std::sync::Arc;

use crate::domain::foundation::{MenteeId, Timestamp};
use crate::domain::mentoring::{validate_mentee, Mentee, MenteeForm, MentoringError};
use crate::ports::{FacultyRepository, MailMessage, Mailer, MenteeRepository, MentorRepository};

use super::super::send_best_effort;
use super::{email_candidate, email_taken_error, faculty_by_slug, MentoringSettings};

#[derive(Debug, Clone)]
pub struct RegisterMenteeCommand {
    pub faculty_slug: String,
    pub form: MenteeForm,
    pub now: Timestamp,
}

/// The chosen mentor is looked up by nickname within the same faculty.
pub struct RegisterMenteeHandler {
    faculties: Arc<dyn FacultyRepository>,
    mentors: Arc<dyn MentorRepository>,
    mentees: Arc<dyn MenteeRepository>,
    mailer: Arc<dyn Mailer>,
    settings: MentoringSettings,
}

impl RegisterMenteeHandler {
    pub fn new(
        faculties: Arc<dyn FacultyRepository>,
        mentors: Arc<dyn MentorRepository>,
        mentees: Arc<dyn MenteeRepository>,
        mailer: Arc<dyn Mailer>,
        settings: MentoringSettings,
    ) -> Self {
        Self {
            faculties,
            mentors,
            mentees,
            mailer,
            settings,
        }
    }

    pub async fn handle(&self, cmd: RegisterMenteeCommand) -> Result<Mentee, MentoringError> {
        let faculty = faculty_by_slug(self.faculties.as_ref(), &cmd.faculty_slug).await?;
        let programs = self.faculties.programs_of(&faculty.id).await?;

        let nickname = cmd.form.mentor_nickname.trim().to_uppercase();
        let mentor = if nickname.is_empty() {
            None
        } else {
            self.mentors.find_by_nickname(&nickname).await?
        };

        let candidate = email_candidate(&cmd.form.email);
        let taken = !candidate.is_empty() && self.mentees.email_exists(&candidate).await?;
        let details = validate_mentee(
            &cmd.form,
            &faculty,
            &programs,
            mentor.as_ref(),
            &self.settings.allowed_email_domains,
            |email| taken && email == candidate,
            cmd.now,
        )?;

        let mentee = Mentee {
            id: MenteeId::new(),
            first_name: details.first_name,
            last_name: details.last_name,
            email: details.email,
            program_id: details.program_id,
            faculty_id: faculty.id,
            mentor_id: details.mentor_id,
            created_at: cmd.now,
        };
        match self.mentees.save(&mentee).await {
            Ok(()) => {}
            Err(e) if e.conflict_field() == Some("email") => return Err(email_taken_error()),
            Err(e) => return Err(e.into()),
        }

        tracing::info!(
            mentee_id = %mentee.id,
            faculty = %faculty.slug,
            mentor = %details.mentor_nickname,
            "Mentee registered"
        );

        let text = format!(
            "Hallo {},\n\n\
             danke für deine Anmeldung beim Mentoring ({}).\n\
             Deine Mentorin bzw. dein Mentor ist: {}\n",
            mentee.first_name, faculty.name, details.mentor_nickname
        );
        send_best_effort(
            self.mailer.as_ref(),
            MailMessage::new(mentee.email.clone(), "Deine Anmeldung beim Mentoring", text),
        )
        .await;

        Ok(mentee)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::email::RecordingMailer;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::foundation::MentorId;
    use crate::domain::mentoring::{Faculty, Mentor, Program};

    struct Fixture {
        store: InMemoryStore,
        mailer: RecordingMailer,
        handler: RegisterMenteeHandler,
        program: Program,
        mentor: Mentor,
    }

    async fn fixture() -> Fixture {
        let store = InMemoryStore::new();
        let now = Timestamp::now();
        let faculty = Faculty::new("Informatik", "fin", "0068B4", now.plus_days(7)).unwrap();
        let other = Faculty::new("Maschinenbau", "fmb", "FF0000", now.plus_days(7)).unwrap();
        let program = Program::new(faculty.id, "Informatik");
        for f in [&faculty, &other] {
            store.save_faculty(f).await.unwrap();
        }
        store.save_program(&program).await.unwrap();

        let mentor = Mentor {
            id: MentorId::new(),
            first_name: "Max".to_string(),
            last_name: "Mustermann".to_string(),
            email: "max@st.ovgu.de".to_string(),
            phone: "+491711234567".to_string(),
            program_id: program.id,
            faculty_id: faculty.id,
            nickname: "MAXMUS".to_string(),
            created_at: now,
        };
        let foreign = Mentor {
            id: MentorId::new(),
            email: "moritz@st.ovgu.de".to_string(),
            faculty_id: other.id,
            nickname: "MORMAS".to_string(),
            ..mentor.clone()
        };
        MentorRepository::save(&store, &mentor).await.unwrap();
        MentorRepository::save(&store, &foreign).await.unwrap();

        let mailer = RecordingMailer::new();
        let handler = RegisterMenteeHandler::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(mailer.clone()),
            MentoringSettings {
                allowed_email_domains: vec!["st.ovgu.de".to_string()],
                public_base_url: "https://faking.de".to_string(),
                deletion_validity_days: 30,
            },
        );
        Fixture {
            store,
            mailer,
            handler,
            program,
            mentor,
        }
    }

    fn form(program: &Program, nickname: &str) -> MenteeForm {
        MenteeForm {
            first_name: "lisa".to_string(),
            last_name: "lernt".to_string(),
            email: "lisa@st.ovgu.de".to_string(),
            program_id: Some(program.id),
            mentor_nickname: nickname.to_string(),
            privacy: true,
        }
    }

    #[tokio::test]
    async fn mentee_is_linked_to_the_chosen_mentor() {
        let f = fixture().await;

        let mentee = f
            .handler
            .handle(RegisterMenteeCommand {
                faculty_slug: "fin".to_string(),
                form: form(&f.program, "maxmus"),
                now: Timestamp::now(),
            })
            .await
            .unwrap();

        assert_eq!(mentee.mentor_id, f.mentor.id);
        assert_eq!(MenteeRepository::list_all(&f.store).await.unwrap(), vec![mentee]);
        assert!(f.mailer.sent()[0].text.contains("MAXMUS"));
    }

    #[tokio::test]
    async fn mentor_of_another_faculty_is_rejected() {
        let f = fixture().await;

        let result = f
            .handler
            .handle(RegisterMenteeCommand {
                faculty_slug: "fin".to_string(),
                form: form(&f.program, "MORMAS"),
                now: Timestamp::now(),
            })
            .await;

        assert!(matches!(result, Err(MentoringError::Validation(e)) if e.has_field("mentor")));
    }

    #[tokio::test]
    async fn field_errors_are_collected() {
        let f = fixture().await;
        let mut bad = form(&f.program, "");
        bad.email = "lisa@gmail.com".to_string();
        bad.privacy = false;

        let result = f
            .handler
            .handle(RegisterMenteeCommand {
                faculty_slug: "fin".to_string(),
                form: bad,
                now: Timestamp::now(),
            })
            .await;

        match result {
            Err(MentoringError::Validation(errors)) => {
                assert!(errors.has_field("email"));
                assert!(errors.has_field("mentor"));
                assert!(errors.has_field("privacy"));
            }
            other => panic!("expected validation errors, got {:?}", other),
        }
    }
}
