//! HTTP DTOs for teams, invitations and accounts.

use serde::{Deserialize, Serialize};

use crate::domain::accounts::User;
use crate::domain::foundation::{InvitationId, TeamId, Timestamp, UserId};
use crate::domain::teams::{Invitation, Team};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to invite new members into teams.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueInvitationRequest {
    pub team_ids: Vec<TeamId>,
    /// One of 8, 24 or 168.
    pub expiry_hours: u32,
}

/// Request by an existing user to join the teams of an invitation.
#[derive(Debug, Clone, Deserialize)]
pub struct JoinRequest {
    pub token: String,
}

/// Account registration through an invitation.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct TeamResponse {
    pub id: TeamId,
    pub name: String,
    pub slug: String,
}

impl From<Team> for TeamResponse {
    fn from(team: Team) -> Self {
        Self {
            id: team.id,
            name: team.name,
            slug: team.slug,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InvitationResponse {
    pub id: InvitationId,
    pub token: String,
    /// Registration link to hand out.
    pub link: String,
    pub team_ids: Vec<TeamId>,
    pub expires_at: Timestamp,
    pub created_at: Timestamp,
}

impl InvitationResponse {
    pub fn new(invitation: Invitation, link: String) -> Self {
        Self {
            id: invitation.id,
            token: invitation.token,
            link,
            team_ids: invitation.team_ids,
            expires_at: invitation.expires_at,
            created_at: invitation.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct JoinResponse {
    pub team_ids: Vec<TeamId>,
    /// Memberships that did not exist before.
    pub created: usize,
}

/// Public profile of a user.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name(),
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterResponse {
    pub user: UserResponse,
    pub team_ids: Vec<TeamId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
    pub is_superuser: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_request_tolerates_missing_fields() {
        let request: RegisterRequest = serde_json::from_str(r#"{"username": "erika"}"#).unwrap();

        assert_eq!(request.username, "erika");
        assert!(request.first_name.is_empty());
        assert!(request.token.is_none());
    }

    #[test]
    fn user_response_carries_full_name() {
        let user = User::new("Erika", "Mustermann", "erika", "erika@st.ovgu.de", Timestamp::now());

        let response = UserResponse::from(user);

        assert_eq!(response.full_name, "Erika Mustermann");
    }
}
