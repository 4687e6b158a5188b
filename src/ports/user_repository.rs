//! User repository port.
//!
//! Accounts are created through invitation-based registration. The password
//! hash is stored alongside the user but never leaves the adapter except
//! through `find_credentials`.

use async_trait::async_trait;

use crate::domain::accounts::User;
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::teams::Membership;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persists a new user with its password hash.
    ///
    /// # Errors
    ///
    /// - `Conflict` (field `username`) if the username is taken
    /// - `DatabaseError` on persistence failure
    async fn save(&self, user: &User, password_hash: &str) -> Result<(), DomainError>;

    /// Persists a new user together with its first team memberships.
    /// Either everything is stored or nothing is. Memberships for a
    /// (team, user) pair that already exists are skipped.
    ///
    /// # Errors
    ///
    /// Same as [`UserRepository::save`].
    async fn save_with_memberships(
        &self,
        user: &User,
        password_hash: &str,
        memberships: &[Membership],
    ) -> Result<(), DomainError>;

    /// Replaces the stored password hash.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no user has this id
    async fn update_password(&self, id: &UserId, password_hash: &str) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Lookup by lowercased username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// User and stored password hash, for login.
    async fn find_credentials(&self, username: &str)
        -> Result<Option<(User, String)>, DomainError>;

    /// Users with the given ids; unknown ids are skipped.
    async fn find_many(&self, ids: &[UserId]) -> Result<Vec<User>, DomainError>;

    /// Distinct users sharing at least one team with `user`, the user
    /// included, ordered by first then last name.
    async fn friends_of(&self, user: &UserId) -> Result<Vec<User>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn UserRepository) {}
    }
}
