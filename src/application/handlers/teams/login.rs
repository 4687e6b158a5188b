//! LoginHandler - Exchanges username and password for a session token.

use std::sync::Arc;

use crate::domain::accounts::User;
use crate::domain::foundation::Timestamp;
use crate::domain::teams::{normalized_username, TeamsError};
use crate::ports::{CredentialHasher, SessionIssuer, UserRepository};

#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub username: String,
    pub password: String,
    pub now: Timestamp,
}

#[derive(Debug, Clone)]
pub struct LoginResult {
    pub token: String,
    pub user: User,
}

pub struct LoginHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn CredentialHasher>,
    sessions: Arc<dyn SessionIssuer>,
}

impl LoginHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn CredentialHasher>,
        sessions: Arc<dyn SessionIssuer>,
    ) -> Self {
        Self {
            users,
            hasher,
            sessions,
        }
    }

    pub async fn handle(&self, cmd: LoginCommand) -> Result<LoginResult, TeamsError> {
        let username = normalized_username(&cmd.username);
        let Some((user, hash)) = self.users.find_credentials(&username).await? else {
            tracing::debug!(username = %username, "Login for unknown user");
            return Err(TeamsError::InvalidCredentials);
        };

        let hasher = self.hasher.clone();
        let password = cmd.password;
        let verified = tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| TeamsError::Infrastructure(format!("verification task failed: {}", e)))?;
        if !verified {
            tracing::debug!(username = %username, "Login with wrong password");
            return Err(TeamsError::InvalidCredentials);
        }

        let token = self.sessions.issue(&user.as_actor(), cmd.now)?;
        tracing::info!(user_id = %user.id, "User logged in");
        Ok(LoginResult { token, user })
    }
}
