//! User entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthenticatedUser, Timestamp, UserId};

/// A registered account.
///
/// Team relations live in memberships; see `UserRepository::friends_of`
/// for the users reachable through shared teams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub is_superuser: bool,
    pub created_at: Timestamp,
}

impl User {
    /// Creates a regular (non-privileged) user.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        username: impl Into<String>,
        email: impl Into<String>,
        now: Timestamp,
    ) -> Self {
        Self {
            id: UserId::new(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            username: username.into(),
            email: email.into(),
            is_superuser: false,
            created_at: now,
        }
    }

    /// "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// The acting-user view of this account.
    pub fn as_actor(&self) -> AuthenticatedUser {
        AuthenticatedUser::new(self.id, self.username.clone(), self.is_superuser)
    }
}
