//! Membership of a user in a team.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{InvitationId, TeamId, Timestamp, UserId};

/// Confirmed (team, user) relation.
///
/// Storage keeps `(team_id, user_id)` unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub team_id: TeamId,
    pub user_id: UserId,
    /// Invitation the membership was created through, if any.
    pub invitation_id: Option<InvitationId>,
    pub created_at: Timestamp,
}

impl Membership {
    pub fn new(
        team_id: TeamId,
        user_id: UserId,
        invitation_id: Option<InvitationId>,
        now: Timestamp,
    ) -> Self {
        Self {
            team_id,
            user_id,
            invitation_id,
            created_at: now,
        }
    }
}
