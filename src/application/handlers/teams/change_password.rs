//! ChangePasswordHandler - Replaces the caller's password.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, ValidationError, ValidationErrors};
use crate::domain::teams::{validate_new_password, TeamsError};
use crate::ports::{CredentialHasher, UserRepository};

#[derive(Debug, Clone)]
pub struct ChangePasswordCommand {
    pub actor: AuthenticatedUser,
    pub old_password: String,
    pub new_password: String,
}

/// Verifies the current password before storing a hash of the new one.
/// A wrong current password is a field error, not a failed login.
pub struct ChangePasswordHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn CredentialHasher>,
}

impl ChangePasswordHandler {
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self { users, hasher }
    }

    pub async fn handle(&self, cmd: ChangePasswordCommand) -> Result<(), TeamsError> {
        let Some((user, hash)) = self.users.find_credentials(&cmd.actor.username).await? else {
            return Err(TeamsError::InvalidCredentials);
        };

        let hasher = self.hasher.clone();
        let old = cmd.old_password.clone();
        let verified = tokio::task::spawn_blocking(move || hasher.verify(&old, &hash))
            .await
            .map_err(|e| TeamsError::Infrastructure(format!("verification task failed: {}", e)))?;

        let mut errors = ValidationErrors::new();
        if !verified {
            tracing::debug!(user_id = %user.id, "Password change with wrong current password");
            errors.push(ValidationError::rejected("old_password", "the current password is wrong"));
        }
        if let Err(rules) = validate_new_password(&cmd.old_password, &cmd.new_password) {
            for rule in rules {
                errors.push(rule);
            }
        }
        errors.into_result()?;

        let hasher = self.hasher.clone();
        let new = cmd.new_password;
        let new_hash = tokio::task::spawn_blocking(move || hasher.hash(&new))
            .await
            .map_err(|e| TeamsError::Infrastructure(format!("hashing task failed: {}", e)))??;
        self.users.update_password(&user.id, &new_hash).await?;

        tracing::info!(user_id = %user.id, "Password changed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::adapters::auth::Argon2Hasher;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::accounts::User;
    use crate::domain::foundation::{Timestamp, UserId};

    struct Fixture {
        store: InMemoryStore,
        hasher: Argon2Hasher,
        handler: ChangePasswordHandler,
        actor: AuthenticatedUser,
    }

    async fn fixture() -> Fixture {
        let store = InMemoryStore::new();
        let hasher = Argon2Hasher::new();
        let user = User::new("Erika", "Muster", "emuster", "e@st.ovgu.de", Timestamp::now());
        UserRepository::save(&store, &user, &hasher.hash("temporär").unwrap())
            .await
            .unwrap();
        let handler = ChangePasswordHandler::new(Arc::new(store.clone()), Arc::new(hasher.clone()));
        Fixture {
            store,
            hasher,
            handler,
            actor: user.as_actor(),
        }
    }

    fn change(actor: &AuthenticatedUser, old: &str, new: &str) -> ChangePasswordCommand {
        ChangePasswordCommand {
            actor: actor.clone(),
            old_password: old.to_string(),
            new_password: new.to_string(),
        }
    }

    async fn stored_hash(store: &InMemoryStore) -> String {
        store.find_credentials("emuster").await.unwrap().unwrap().1
    }

    #[tokio::test]
    async fn new_password_replaces_the_old_one() {
        let f = fixture().await;

        f.handler
            .handle(change(&f.actor, "temporär", "korrekt pferd batterie"))
            .await
            .unwrap();

        let hash = stored_hash(&f.store).await;
        assert!(f.hasher.verify("korrekt pferd batterie", &hash));
        assert!(!f.hasher.verify("temporär", &hash));
    }

    #[tokio::test]
    async fn wrong_current_password_is_a_field_error() {
        let f = fixture().await;
        let before = stored_hash(&f.store).await;

        let result = f
            .handler
            .handle(change(&f.actor, "geraten", "korrekt pferd batterie"))
            .await;

        assert!(matches!(result, Err(TeamsError::Validation(e)) if e.has_field("old_password")));
        assert_eq!(stored_hash(&f.store).await, before);
    }

    #[tokio::test]
    async fn weak_new_password_is_collected_with_the_old_one() {
        let f = fixture().await;

        let result = f.handler.handle(change(&f.actor, "geraten", "1234")).await;

        match result {
            Err(TeamsError::Validation(e)) => {
                assert!(e.has_field("old_password"));
                assert!(e.has_field("new_password"));
            }
            other => panic!("expected validation errors, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn vanished_account_is_rejected() {
        let f = fixture().await;
        let ghost = AuthenticatedUser::new(UserId::new(), "ghost", false);

        let result = f
            .handler
            .handle(change(&ghost, "temporär", "korrekt pferd batterie"))
            .await;

        assert!(matches!(result, Err(TeamsError::InvalidCredentials)));
    }
}
