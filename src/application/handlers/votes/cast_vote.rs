//! CastVoteHandler - Command handler for recording a vote.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DecisionId, OptionId, Timestamp};
use crate::domain::votes::{Vote, VotesError};
use crate::ports::{DecisionRepository, VoteLedger};

/// Command to vote for one option of a decision.
#[derive(Debug, Clone)]
pub struct CastVoteCommand {
    pub decision_id: DecisionId,
    pub voter: AuthenticatedUser,
    pub option_id: OptionId,
    pub now: Timestamp,
}

/// Admission runs inside the ledger so concurrent attempts by the same user
/// yield exactly one vote.
pub struct CastVoteHandler {
    decisions: Arc<dyn DecisionRepository>,
    ledger: Arc<dyn VoteLedger>,
}

impl CastVoteHandler {
    pub fn new(decisions: Arc<dyn DecisionRepository>, ledger: Arc<dyn VoteLedger>) -> Self {
        Self { decisions, ledger }
    }

    pub async fn handle(&self, cmd: CastVoteCommand) -> Result<Vote, VotesError> {
        let decision = self
            .decisions
            .find_by_id(&cmd.decision_id)
            .await?
            .ok_or(VotesError::DecisionNotFound(cmd.decision_id))?;

        let vote = self
            .ledger
            .record(&decision, &cmd.voter.id, cmd.option_id, cmd.now)
            .await
            .map_err(VotesError::from)?;

        tracing::info!(decision_id = %decision.id, voter = %cmd.voter.id, "Vote recorded");
        Ok(vote)
    }
}
