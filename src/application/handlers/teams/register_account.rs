//! RegisterAccountHandler - Command handler for invitation-based sign-up.

use std::sync::Arc;

use crate::domain::accounts::User;
use crate::domain::foundation::{Timestamp, ValidationError, ValidationErrors};
use crate::domain::teams::{
    normalized_username, random_url_safe_token, validate_registration, Membership,
    RegistrationForm, TeamsError,
};
use crate::ports::{CredentialHasher, InvitationRepository, MailMessage, Mailer, UserRepository};

use super::super::send_best_effort;

#[derive(Debug, Clone)]
pub struct RegisterAccountCommand {
    pub form: RegistrationForm,
    pub now: Timestamp,
}

#[derive(Debug, Clone)]
pub struct RegisterAccountResult {
    pub user: User,
    pub memberships: Vec<Membership>,
}

/// Creates the account with a temporary password, joins the invited teams
/// and mails the credentials.
pub struct RegisterAccountHandler {
    users: Arc<dyn UserRepository>,
    invitations: Arc<dyn InvitationRepository>,
    hasher: Arc<dyn CredentialHasher>,
    mailer: Arc<dyn Mailer>,
    allowed_email_domain: String,
}

impl RegisterAccountHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        invitations: Arc<dyn InvitationRepository>,
        hasher: Arc<dyn CredentialHasher>,
        mailer: Arc<dyn Mailer>,
        allowed_email_domain: impl Into<String>,
    ) -> Self {
        Self {
            users,
            invitations,
            hasher,
            mailer,
            allowed_email_domain: allowed_email_domain.into(),
        }
    }

    pub async fn handle(&self, cmd: RegisterAccountCommand) -> Result<RegisterAccountResult, TeamsError> {
        let invitation = match cmd.form.token.as_deref().map(str::trim) {
            Some(token) if !token.is_empty() => self.invitations.find_by_token(token).await?,
            _ => None,
        };
        let username_taken = self
            .users
            .find_by_username(&normalized_username(&cmd.form.username))
            .await?
            .is_some();

        let valid = validate_registration(
            &cmd.form,
            invitation.as_ref(),
            username_taken,
            &self.allowed_email_domain,
            cmd.now,
        )?;
        let invitation = invitation.ok_or(TeamsError::InvitationNotFound)?;

        let password = random_url_safe_token();
        let hasher = self.hasher.clone();
        let plain = password.clone();
        let hash = tokio::task::spawn_blocking(move || hasher.hash(&plain))
            .await
            .map_err(|e| TeamsError::Infrastructure(format!("hashing task failed: {}", e)))??;

        let user = User::new(
            valid.first_name,
            valid.last_name,
            valid.username,
            valid.email,
            cmd.now,
        );
        let memberships: Vec<Membership> = invitation
            .team_ids
            .iter()
            .map(|team_id| Membership::new(*team_id, user.id, Some(invitation.id), cmd.now))
            .collect();
        let saved = self
            .users
            .save_with_memberships(&user, &hash, &memberships)
            .await;
        if let Err(e) = saved {
            if e.conflict_field() == Some("username") {
                let errors: ValidationErrors =
                    ValidationError::rejected("username", "this username is already taken").into();
                return Err(errors.into());
            }
            return Err(e.into());
        }

        tracing::info!(
            user_id = %user.id,
            username = %user.username,
            invitation_id = %invitation.id,
            "Account registered"
        );

        send_best_effort(self.mailer.as_ref(), account_created_mail(&user, &password)).await;

        Ok(RegisterAccountResult { user, memberships })
    }
}

fn account_created_mail(user: &User, password: &str) -> MailMessage {
    let text = format!(
        "Hallo {},\n\n\
         dein Account wurde angelegt.\n\n\
         Benutzername: {}\n\
         Temporäres Passwort: {}\n\n\
         Bitte ändere das Passwort nach der ersten Anmeldung.\n",
        user.first_name, user.username, password
    );
    MailMessage::new(user.email.clone(), "Dein Account wurde erstellt", text)
}
