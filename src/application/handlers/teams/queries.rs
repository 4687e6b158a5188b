//! Team, invitation and friend queries.

use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::accounts::User;
use crate::domain::foundation::{TeamId, UserId};
use crate::domain::teams::{Invitation, Team, TeamsError};
use crate::ports::{InvitationRepository, MembershipRepository, TeamRepository, UserRepository};

pub struct ListTeamsHandler {
    teams: Arc<dyn TeamRepository>,
}

impl ListTeamsHandler {
    pub fn new(teams: Arc<dyn TeamRepository>) -> Self {
        Self { teams }
    }

    pub async fn handle(&self) -> Result<Vec<Team>, TeamsError> {
        Ok(self.teams.list_all().await?)
    }
}

/// Invitations whose every team contains the user, newest first.
pub struct ListVisibleInvitationsHandler {
    invitations: Arc<dyn InvitationRepository>,
    memberships: Arc<dyn MembershipRepository>,
}

impl ListVisibleInvitationsHandler {
    pub fn new(
        invitations: Arc<dyn InvitationRepository>,
        memberships: Arc<dyn MembershipRepository>,
    ) -> Self {
        Self {
            invitations,
            memberships,
        }
    }

    pub async fn handle(&self, user: UserId) -> Result<Vec<Invitation>, TeamsError> {
        let teams: HashSet<TeamId> = self
            .memberships
            .team_ids_of(&user)
            .await?
            .into_iter()
            .collect();
        Ok(self
            .invitations
            .list_all()
            .await?
            .into_iter()
            .filter(|i| i.is_visible_to(&teams))
            .collect())
    }
}

/// Users sharing at least one team with the user.
pub struct ListFriendsHandler {
    users: Arc<dyn UserRepository>,
}

impl ListFriendsHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, user: UserId) -> Result<Vec<User>, TeamsError> {
        Ok(self.users.friends_of(&user).await?)
    }
}
