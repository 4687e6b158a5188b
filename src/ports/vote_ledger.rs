//! Vote ledger port.
//!
//! # Contract
//!
//! `record` re-runs the admission checks against the stored votes and
//! inserts the vote as one atomic step. Concurrent attempts by the same user
//! on the same decision must yield exactly one row; the loser receives
//! `AlreadyVoted`.
//!
//! Admission failures use these codes:
//!
//! | Failure | ErrorCode |
//! |---------|-----------|
//! | voting not open | `Forbidden` |
//! | not an eligible voter | `NotEntitled` |
//! | prior vote on the decision | `AlreadyVoted` |
//! | option of another decision | `ValidationFailed` |

use async_trait::async_trait;

use crate::domain::foundation::{DecisionId, DomainError, OptionId, Timestamp, UserId};
use crate::domain::votes::{Decision, Vote};

#[async_trait]
pub trait VoteLedger: Send + Sync {
    /// Votes cast on any option of the decision.
    async fn votes_for_decision(&self, decision: &DecisionId) -> Result<Vec<Vote>, DomainError>;

    /// Admits and stores a vote atomically.
    async fn record(
        &self,
        decision: &Decision,
        user: &UserId,
        option: OptionId,
        now: Timestamp,
    ) -> Result<Vote, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vote_ledger_is_object_safe() {
        fn _accepts_dyn(_ledger: &dyn VoteLedger) {}
    }
}
