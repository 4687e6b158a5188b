//! RegisterMentorHandler - Command handler for mentor sign-up.

use std::sync::Arc;

use crate::domain::foundation::{MentorId, Timestamp};
use crate::domain::mentoring::{
    generate_unique_pseudonym, validate_mentor, DeletionClaims, Mentor, MentorForm,
    MentoringError,
};
use crate::ports::{FacultyRepository, MailMessage, Mailer, MentorRepository, TokenSigner};

use super::super::send_best_effort;
use super::{email_candidate, email_taken_error, faculty_by_slug, MentoringSettings};

/// Nickname races tolerated before giving up.
pub const MAX_SAVE_ATTEMPTS: usize = 3;

#[derive(Debug, Clone)]
pub struct RegisterMentorCommand {
    pub faculty_slug: String,
    pub form: MentorForm,
    pub now: Timestamp,
}

/// Validates the sign-up, assigns a unique nickname and mails the
/// confirmation with a self-service deletion link.
pub struct RegisterMentorHandler {
    faculties: Arc<dyn FacultyRepository>,
    mentors: Arc<dyn MentorRepository>,
    signer: Arc<dyn TokenSigner>,
    mailer: Arc<dyn Mailer>,
    settings: MentoringSettings,
}

impl RegisterMentorHandler {
    pub fn new(
        faculties: Arc<dyn FacultyRepository>,
        mentors: Arc<dyn MentorRepository>,
        signer: Arc<dyn TokenSigner>,
        mailer: Arc<dyn Mailer>,
        settings: MentoringSettings,
    ) -> Self {
        Self {
            faculties,
            mentors,
            signer,
            mailer,
            settings,
        }
    }

    pub async fn handle(&self, cmd: RegisterMentorCommand) -> Result<Mentor, MentoringError> {
        let faculty = faculty_by_slug(self.faculties.as_ref(), &cmd.faculty_slug).await?;
        let programs = self.faculties.programs_of(&faculty.id).await?;

        let candidate = email_candidate(&cmd.form.email);
        let taken = !candidate.is_empty() && self.mentors.email_exists(&candidate).await?;
        let details = validate_mentor(
            &cmd.form,
            &faculty,
            &programs,
            &self.settings.allowed_email_domains,
            |email| taken && email == candidate,
            cmd.now,
        )?;

        let claims = DeletionClaims::new(
            details.email.clone(),
            cmd.now,
            self.settings.deletion_validity_days,
        );
        let token = self.signer.sign(&claims)?;

        let mut mentor = Mentor {
            id: MentorId::new(),
            first_name: details.first_name,
            last_name: details.last_name,
            email: details.email,
            phone: details.phone,
            program_id: details.program_id,
            faculty_id: faculty.id,
            nickname: String::new(),
            created_at: cmd.now,
        };

        let mut saved = false;
        for attempt in 1..=MAX_SAVE_ATTEMPTS {
            let existing = self.mentors.nicknames().await?;
            mentor.nickname = {
                let mut rng = rand::thread_rng();
                generate_unique_pseudonym(&mentor.first_name, &mentor.last_name, &existing, &mut rng)?
            };
            match self.mentors.save(&mentor).await {
                Ok(()) => {
                    saved = true;
                    break;
                }
                Err(e) if e.conflict_field() == Some("nickname") => {
                    tracing::debug!(attempt, "Nickname taken concurrently, drawing again");
                }
                Err(e) if e.conflict_field() == Some("email") => return Err(email_taken_error()),
                Err(e) => return Err(e.into()),
            }
        }
        if !saved {
            return Err(MentoringError::PseudonymSpaceExhausted {
                attempts: MAX_SAVE_ATTEMPTS,
            });
        }

        tracing::info!(
            mentor_id = %mentor.id,
            faculty = %faculty.slug,
            nickname = %mentor.nickname,
            "Mentor registered"
        );

        let link = self.settings.deletion_link(&token);
        let text = format!(
            "Hallo {},\n\n\
             danke für deine Anmeldung als Mentor*in ({}).\n\
             Dein Pseudonym lautet: {}\n\n\
             Du kannst deine Anmeldung jederzeit über diesen Link löschen:\n{}\n",
            mentor.first_name, faculty.name, mentor.nickname, link
        );
        let html = format!(
            "<p>Hallo {},</p>\
             <p>danke für deine Anmeldung als Mentor*in ({}).<br>\
             Dein Pseudonym lautet: <strong>{}</strong></p>\
             <p><a href=\"{}\">Anmeldung löschen</a></p>",
            mentor.first_name, faculty.name, mentor.nickname, link
        );
        let message = MailMessage::new(mentor.email.clone(), "Deine Anmeldung als Mentor*in", text)
            .with_html(html);
        send_best_effort(self.mailer.as_ref(), message).await;

        Ok(mentor)
    }
}
