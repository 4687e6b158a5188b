//! Invitation tokens scoping the teams a user may join.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::TeamsError;
use crate::domain::foundation::{
    AuthenticatedUser, InvitationId, TeamId, Timestamp, UserId, ValidationError, ValidationErrors,
};

/// Number of random bytes behind an invitation token.
const TOKEN_BYTES: usize = 16;

/// Random bytes encoded as URL-safe base64 without padding.
pub fn random_url_safe_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// The offered validity periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvitationValidity {
    EightHours,
    OneDay,
    OneWeek,
}

impl InvitationValidity {
    pub fn hours(&self) -> i64 {
        match self {
            InvitationValidity::EightHours => 8,
            InvitationValidity::OneDay => 24,
            InvitationValidity::OneWeek => 168,
        }
    }
}

impl TryFrom<u32> for InvitationValidity {
    type Error = ValidationError;

    fn try_from(hours: u32) -> Result<Self, Self::Error> {
        match hours {
            8 => Ok(InvitationValidity::EightHours),
            24 => Ok(InvitationValidity::OneDay),
            168 => Ok(InvitationValidity::OneWeek),
            _ => Err(ValidationError::rejected(
                "expiry_hours",
                "only 8, 24 or 168 hours are offered",
            )),
        }
    }
}

/// A time-limited token granting membership in a set of teams.
///
/// Never mutated after issuance; expiry is checked when it is consumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invitation {
    pub id: InvitationId,
    pub token: String,
    pub team_ids: Vec<TeamId>,
    pub expires_at: Timestamp,
    pub created_by: UserId,
    pub created_at: Timestamp,
}

impl Invitation {
    /// Validates the request and builds an invitation with a fresh token.
    ///
    /// `creator_teams` are the teams the creator belongs to; superusers may
    /// invite to any team.
    pub fn issue(
        creator: &AuthenticatedUser,
        team_ids: Vec<TeamId>,
        validity_hours: u32,
        creator_teams: &HashSet<TeamId>,
        now: Timestamp,
    ) -> Result<Self, TeamsError> {
        let mut errors = ValidationErrors::new();

        let validity = errors.check(InvitationValidity::try_from(validity_hours));

        let mut team_ids = team_ids;
        team_ids.sort();
        team_ids.dedup();
        if team_ids.is_empty() {
            errors.push(ValidationError::empty_field("teams"));
        } else if !creator.is_superuser && team_ids.iter().any(|t| !creator_teams.contains(t)) {
            errors.push(ValidationError::rejected(
                "teams",
                "you can only invite to teams you belong to",
            ));
        }

        errors.into_result()?;
        let hours = validity.map(|v| v.hours()).unwrap_or_default();

        Ok(Self {
            id: InvitationId::new(),
            token: random_url_safe_token(),
            team_ids,
            expires_at: now.plus_hours(hours),
            created_by: creator.id,
            created_at: now,
        })
    }

    /// Replaces the token after a storage collision.
    pub fn regenerate_token(&mut self) {
        self.token = random_url_safe_token();
    }

    pub fn is_expired(&self, now: Timestamp) -> bool {
        now.is_after(&self.expires_at)
    }

    pub fn check_redeemable(&self, now: Timestamp) -> Result<(), TeamsError> {
        if self.is_expired(now) {
            return Err(TeamsError::InvitationExpired);
        }
        Ok(())
    }

    /// True when the user belongs to every team of the invitation.
    pub fn is_visible_to(&self, user_teams: &HashSet<TeamId>) -> bool {
        self.team_ids.iter().all(|t| user_teams.contains(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creator(superuser: bool) -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new(), "creator", superuser)
    }

    #[test]
    fn token_is_url_safe_without_padding() {
        let token = random_url_safe_token();
        assert_eq!(token.len(), 22);
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn only_offered_validities_are_accepted() {
        assert_eq!(InvitationValidity::try_from(24).unwrap().hours(), 24);
        assert!(InvitationValidity::try_from(12).is_err());
    }

    #[test]
    fn issue_sets_expiry_from_validity() {
        let now = Timestamp::now();
        let team = TeamId::new();
        let teams: HashSet<TeamId> = [team].into_iter().collect();

        let invitation = Invitation::issue(&creator(false), vec![team], 168, &teams, now).unwrap();
        assert_eq!(invitation.expires_at, now.plus_days(7));
        assert_eq!(invitation.team_ids, vec![team]);
    }

    #[test]
    fn issue_collects_validity_and_team_errors() {
        let now = Timestamp::now();
        let result = Invitation::issue(&creator(false), vec![TeamId::new()], 5, &HashSet::new(), now);

        match result {
            Err(TeamsError::Validation(errors)) => {
                assert!(errors.has_field("expiry_hours"));
                assert!(errors.has_field("teams"));
            }
            other => panic!("expected validation errors, got {:?}", other),
        }
    }

    #[test]
    fn superuser_may_invite_to_foreign_teams() {
        let now = Timestamp::now();
        let result = Invitation::issue(&creator(true), vec![TeamId::new()], 8, &HashSet::new(), now);
        assert!(result.is_ok());
    }

    #[test]
    fn at_least_one_team_is_required() {
        let result = Invitation::issue(&creator(true), vec![], 8, &HashSet::new(), Timestamp::now());
        assert!(matches!(result, Err(TeamsError::Validation(e)) if e.has_field("teams")));
    }

    #[test]
    fn expiry_is_exclusive() {
        let now = Timestamp::now();
        let invitation = Invitation::issue(&creator(true), vec![TeamId::new()], 8, &HashSet::new(), now).unwrap();

        assert!(invitation.check_redeemable(invitation.expires_at).is_ok());
        assert_eq!(
            invitation.check_redeemable(invitation.expires_at.plus_minutes(1)),
            Err(TeamsError::InvitationExpired)
        );
    }

    #[test]
    fn visible_only_when_member_of_all_teams() {
        let (a, b) = (TeamId::new(), TeamId::new());
        let invitation = Invitation::issue(&creator(true), vec![a, b], 8, &HashSet::new(), Timestamp::now()).unwrap();

        assert!(!invitation.is_visible_to(&[a].into_iter().collect()));
        assert!(invitation.is_visible_to(&[a, b, TeamId::new()].into_iter().collect()));
    }
}
