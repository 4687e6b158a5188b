//! IssueInvitationHandler - Command handler for creating invitation links.

use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::foundation::{
    AuthenticatedUser, ErrorCode, TeamId, Timestamp, ValidationError, ValidationErrors,
};
use crate::domain::teams::{Invitation, TeamsError};
use crate::ports::{InvitationRepository, MembershipRepository, TeamRepository};

/// Token collisions tolerated before giving up.
pub const MAX_TOKEN_ATTEMPTS: usize = 5;

#[derive(Debug, Clone)]
pub struct IssueInvitationCommand {
    pub creator: AuthenticatedUser,
    pub team_ids: Vec<TeamId>,
    pub validity_hours: u32,
    pub now: Timestamp,
}

pub struct IssueInvitationHandler {
    invitations: Arc<dyn InvitationRepository>,
    memberships: Arc<dyn MembershipRepository>,
    teams: Arc<dyn TeamRepository>,
}

impl IssueInvitationHandler {
    pub fn new(
        invitations: Arc<dyn InvitationRepository>,
        memberships: Arc<dyn MembershipRepository>,
        teams: Arc<dyn TeamRepository>,
    ) -> Self {
        Self {
            invitations,
            memberships,
            teams,
        }
    }

    pub async fn handle(&self, cmd: IssueInvitationCommand) -> Result<Invitation, TeamsError> {
        let known: HashSet<TeamId> = self
            .teams
            .find_many(&cmd.team_ids)
            .await?
            .into_iter()
            .map(|t| t.id)
            .collect();
        if cmd.team_ids.iter().any(|t| !known.contains(t)) {
            let errors: ValidationErrors =
                ValidationError::rejected("teams", "unknown team").into();
            return Err(errors.into());
        }

        let creator_teams: HashSet<TeamId> = self
            .memberships
            .team_ids_of(&cmd.creator.id)
            .await?
            .into_iter()
            .collect();

        let mut invitation = Invitation::issue(
            &cmd.creator,
            cmd.team_ids,
            cmd.validity_hours,
            &creator_teams,
            cmd.now,
        )?;

        for attempt in 1..=MAX_TOKEN_ATTEMPTS {
            match self.invitations.save(&invitation).await {
                Ok(()) => {
                    tracing::info!(
                        invitation_id = %invitation.id,
                        creator = %cmd.creator.id,
                        teams = invitation.team_ids.len(),
                        "Invitation issued"
                    );
                    return Ok(invitation);
                }
                Err(e) if e.code == ErrorCode::Conflict && e.conflict_field() == Some("token") => {
                    tracing::debug!(attempt, "Invitation token collided, drawing a new one");
                    invitation.regenerate_token();
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(TeamsError::Infrastructure(format!(
            "no unique invitation token after {} attempts",
            MAX_TOKEN_ATTEMPTS
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use crate::domain::teams::{Membership, Team};

    use crate::adapters::memory::InMemoryStore;

    async fn setup() -> (InMemoryStore, IssueInvitationHandler, Team, Team, UserId) {
        let store = InMemoryStore::new();
        let now = Timestamp::now();
        let own = Team::new("FaRa", now);
        let other = Team::new("StuRa", now);
        TeamRepository::save(&store, &own).await.unwrap();
        TeamRepository::save(&store, &other).await.unwrap();
        let user = UserId::new();
        store
            .add_if_absent(&Membership::new(own.id, user, None, now))
            .await
            .unwrap();
        let handler = IssueInvitationHandler::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store.clone()),
        );
        (store, handler, own, other, user)
    }

    #[tokio::test]
    async fn member_invites_to_own_team() {
        let (store, handler, own, _, user) = setup().await;
        let now = Timestamp::now();

        let invitation = handler
            .handle(IssueInvitationCommand {
                creator: AuthenticatedUser::new(user, "anna", false),
                team_ids: vec![own.id],
                validity_hours: 24,
                now,
            })
            .await
            .unwrap();

        assert_eq!(invitation.expires_at, now.plus_hours(24));
        assert_eq!(invitation.token.len(), 22);
        let stored = store.find_by_token(&invitation.token).await.unwrap();
        assert_eq!(stored, Some(invitation));
    }

    #[tokio::test]
    async fn foreign_team_is_rejected() {
        let (_, handler, _, other, user) = setup().await;

        let result = handler
            .handle(IssueInvitationCommand {
                creator: AuthenticatedUser::new(user, "anna", false),
                team_ids: vec![other.id],
                validity_hours: 8,
                now: Timestamp::now(),
            })
            .await;

        assert!(matches!(result, Err(TeamsError::Validation(e)) if e.has_field("teams")));
    }

    #[tokio::test]
    async fn unsupported_validity_is_rejected() {
        let (_, handler, own, _, user) = setup().await;

        let result = handler
            .handle(IssueInvitationCommand {
                creator: AuthenticatedUser::new(user, "anna", false),
                team_ids: vec![own.id],
                validity_hours: 48,
                now: Timestamp::now(),
            })
            .await;

        assert!(matches!(result, Err(TeamsError::Validation(e)) if e.has_field("expiry_hours")));
    }

    #[tokio::test]
    async fn unknown_team_is_rejected_even_for_superusers() {
        let (_, handler, _, _, user) = setup().await;

        let result = handler
            .handle(IssueInvitationCommand {
                creator: AuthenticatedUser::new(user, "root", true),
                team_ids: vec![TeamId::new()],
                validity_hours: 8,
                now: Timestamp::now(),
            })
            .await;

        assert!(matches!(result, Err(TeamsError::Validation(_))));
    }
}
