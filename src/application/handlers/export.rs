//! ExportHandler - Tabular exports for superusers.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::domain::export::export_rows;
use crate::domain::foundation::{AuthenticatedUser, DomainError, ErrorCode, Timestamp};
use crate::ports::{
    DecisionRepository, MembershipRepository, MenteeRepository, MentorRepository, VoteLedger,
};

/// Record families that can be exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Mentors,
    Mentees,
    Memberships,
    /// Tallies of all closed decisions
    Results,
}

impl FromStr for ExportKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mentors" => Ok(ExportKind::Mentors),
            "mentees" => Ok(ExportKind::Mentees),
            "memberships" => Ok(ExportKind::Memberships),
            "results" => Ok(ExportKind::Results),
            other => Err(DomainError::new(
                ErrorCode::NotFound,
                format!("unknown export: {}", other),
            )),
        }
    }
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExportKind::Mentors => "mentors",
            ExportKind::Mentees => "mentees",
            ExportKind::Memberships => "memberships",
            ExportKind::Results => "results",
        };
        write!(f, "{}", s)
    }
}

pub struct ExportHandler {
    mentors: Arc<dyn MentorRepository>,
    mentees: Arc<dyn MenteeRepository>,
    memberships: Arc<dyn MembershipRepository>,
    decisions: Arc<dyn DecisionRepository>,
    ledger: Arc<dyn VoteLedger>,
}

impl ExportHandler {
    pub fn new(
        mentors: Arc<dyn MentorRepository>,
        mentees: Arc<dyn MenteeRepository>,
        memberships: Arc<dyn MembershipRepository>,
        decisions: Arc<dyn DecisionRepository>,
        ledger: Arc<dyn VoteLedger>,
    ) -> Self {
        Self {
            mentors,
            mentees,
            memberships,
            decisions,
            ledger,
        }
    }

    /// Header row followed by one row per record.
    pub async fn handle(
        &self,
        kind: ExportKind,
        actor: &AuthenticatedUser,
        now: Timestamp,
    ) -> Result<Vec<Vec<String>>, DomainError> {
        if !actor.is_superuser {
            return Err(DomainError::new(ErrorCode::Forbidden, "exports are restricted to superusers"));
        }

        let rows = match kind {
            ExportKind::Mentors => export_rows(&self.mentors.list_all().await?),
            ExportKind::Mentees => export_rows(&self.mentees.list_all().await?),
            ExportKind::Memberships => export_rows(&self.memberships.list_all().await?),
            ExportKind::Results => {
                let mut results = Vec::new();
                for decision in self.decisions.list_all().await? {
                    let votes = self.ledger.votes_for_decision(&decision.id).await?;
                    if decision.state(&votes, now).is_closed() {
                        results.push(decision.tally(&votes));
                    }
                }
                export_rows(&results)
            }
        };

        tracing::info!(kind = %kind, rows = rows.len() - 1, actor = %actor.id, "Export generated");
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::foundation::{TeamId, UserId};
    use crate::domain::teams::Membership;
    use crate::domain::votes::{Decision, DecisionDraft, VoterScope};

    fn handler(store: &InMemoryStore) -> ExportHandler {
        ExportHandler::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store.clone()),
        )
    }

    #[test]
    fn kinds_parse_from_path_segments() {
        assert_eq!("results".parse::<ExportKind>().unwrap(), ExportKind::Results);
        assert_eq!(ExportKind::Mentees.to_string(), "mentees");
        assert!("users".parse::<ExportKind>().is_err());
    }

    #[tokio::test]
    async fn regular_users_are_forbidden() {
        let store = InMemoryStore::new();
        let actor = AuthenticatedUser::new(UserId::new(), "anna", false);

        let err = handler(&store)
            .handle(ExportKind::Mentors, &actor, Timestamp::now())
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn memberships_export_has_header_and_rows() {
        let store = InMemoryStore::new();
        let now = Timestamp::now();
        store
            .add_if_absent(&Membership::new(TeamId::new(), UserId::new(), None, now))
            .await
            .unwrap();
        let root = AuthenticatedUser::new(UserId::new(), "root", true);

        let rows = handler(&store)
            .handle(ExportKind::Memberships, &root, now)
            .await
            .unwrap();

        assert_eq!(rows.len(), 2);
    }

    #[tokio::test]
    async fn results_export_skips_running_decisions() {
        let store = InMemoryStore::new();
        let now = Timestamp::now();
        for minutes in [20, 60] {
            let draft = DecisionDraft {
                subject: format!("Decision {}", minutes),
                voters: vec![UserId::new()],
                start: now,
                end: now.plus_minutes(minutes),
            };
            let decision = Decision::create(draft, UserId::new(), &VoterScope::Any, now).unwrap();
            DecisionRepository::save(&store, &decision).await.unwrap();
        }
        let root = AuthenticatedUser::new(UserId::new(), "root", true);

        let rows = handler(&store)
            .handle(ExportKind::Results, &root, now.plus_minutes(30))
            .await
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][1], "Decision 20");
    }
}
