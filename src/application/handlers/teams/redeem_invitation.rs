//! RedeemInvitationHandler - Command handler for joining teams by token.

use std::sync::Arc;

use crate::domain::foundation::{TeamId, Timestamp, UserId};
use crate::domain::teams::{Membership, TeamsError};
use crate::ports::{InvitationRepository, MembershipRepository};

#[derive(Debug, Clone)]
pub struct RedeemInvitationCommand {
    pub token: String,
    pub user: UserId,
    pub now: Timestamp,
}

#[derive(Debug, Clone)]
pub struct RedeemInvitationResult {
    /// Every invited team; the user is a member of all of them afterwards
    pub team_ids: Vec<TeamId>,
    /// Memberships created by this redemption
    pub created: Vec<Membership>,
}

/// Redeeming twice is harmless: existing memberships are kept.
pub struct RedeemInvitationHandler {
    invitations: Arc<dyn InvitationRepository>,
    memberships: Arc<dyn MembershipRepository>,
}

impl RedeemInvitationHandler {
    pub fn new(
        invitations: Arc<dyn InvitationRepository>,
        memberships: Arc<dyn MembershipRepository>,
    ) -> Self {
        Self {
            invitations,
            memberships,
        }
    }

    pub async fn handle(&self, cmd: RedeemInvitationCommand) -> Result<RedeemInvitationResult, TeamsError> {
        let invitation = self
            .invitations
            .find_by_token(cmd.token.trim())
            .await?
            .ok_or(TeamsError::InvitationNotFound)?;
        invitation.check_redeemable(cmd.now)?;

        let mut created = Vec::new();
        for team_id in &invitation.team_ids {
            let membership = Membership::new(*team_id, cmd.user, Some(invitation.id), cmd.now);
            if self.memberships.add_if_absent(&membership).await? {
                created.push(membership);
            }
        }

        tracing::info!(
            invitation_id = %invitation.id,
            user = %cmd.user,
            created = created.len(),
            "Invitation redeemed"
        );
        Ok(RedeemInvitationResult {
            team_ids: invitation.team_ids,
            created,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use crate::adapters::memory::InMemoryStore;
    use crate::domain::foundation::AuthenticatedUser;
    use crate::domain::teams::Invitation;

    async fn issued(store: &InMemoryStore, teams: Vec<TeamId>, now: Timestamp) -> Invitation {
        let root = AuthenticatedUser::new(UserId::new(), "root", true);
        let invitation = Invitation::issue(&root, teams, 8, &HashSet::new(), now).unwrap();
        InvitationRepository::save(store, &invitation).await.unwrap();
        invitation
    }

    fn handler(store: &InMemoryStore) -> RedeemInvitationHandler {
        RedeemInvitationHandler::new(Arc::new(store.clone()), Arc::new(store.clone()))
    }

    #[tokio::test]
    async fn redemption_is_idempotent() {
        let store = InMemoryStore::new();
        let now = Timestamp::now();
        let invitation = issued(&store, vec![TeamId::new(), TeamId::new()], now).await;
        let user = UserId::new();
        let cmd = RedeemInvitationCommand {
            token: invitation.token.clone(),
            user,
            now,
        };

        let first = handler(&store).handle(cmd.clone()).await.unwrap();
        let second = handler(&store).handle(cmd).await.unwrap();

        assert_eq!(first.created.len(), 2);
        assert!(second.created.is_empty());
        assert_eq!(second.team_ids, invitation.team_ids);
        assert_eq!(store.team_ids_of(&user).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn existing_membership_keeps_its_origin() {
        let store = InMemoryStore::new();
        let now = Timestamp::now();
        let (kept, added) = (TeamId::new(), TeamId::new());
        let user = UserId::new();
        let earlier = Membership::new(kept, user, None, now.minus_minutes(60));
        store.add_if_absent(&earlier).await.unwrap();
        let invitation = issued(&store, vec![kept, added], now).await;

        let result = handler(&store)
            .handle(RedeemInvitationCommand {
                token: invitation.token.clone(),
                user,
                now,
            })
            .await
            .unwrap();

        assert_eq!(result.created.len(), 1);
        assert_eq!(result.created[0].team_id, added);
        assert_eq!(result.created[0].invitation_id, Some(invitation.id));
        let stored = MembershipRepository::list_for_user(&store, &user).await.unwrap();
        let original = stored.iter().find(|m| m.team_id == kept).unwrap();
        assert_eq!(original.invitation_id, None);
    }

    #[tokio::test]
    async fn expired_invitation_is_refused() {
        let store = InMemoryStore::new();
        let now = Timestamp::now();
        let invitation = issued(&store, vec![TeamId::new()], now).await;

        let result = handler(&store)
            .handle(RedeemInvitationCommand {
                token: invitation.token,
                user: UserId::new(),
                now: now.plus_hours(9),
            })
            .await;

        assert!(matches!(result, Err(TeamsError::InvitationExpired)));
    }

    #[tokio::test]
    async fn unknown_token_is_not_found() {
        let store = InMemoryStore::new();
        let result = handler(&store)
            .handle(RedeemInvitationCommand {
                token: "nope".to_string(),
                user: UserId::new(),
                now: Timestamp::now(),
            })
            .await;

        assert!(matches!(result, Err(TeamsError::InvitationNotFound)));
    }
}
