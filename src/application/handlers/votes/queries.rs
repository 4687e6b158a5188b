//! Decision queries.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::foundation::{DecisionId, Timestamp, UserId};
use crate::domain::votes::{Decision, DecisionResults, DecisionState, VotesError};
use crate::ports::{DecisionRepository, VoteLedger};

/// A decision as seen by one user at one point in time.
#[derive(Debug, Clone, Serialize)]
pub struct DecisionSummary {
    pub decision: Decision,
    pub state: DecisionState,
    pub entitled: bool,
    pub has_voted: bool,
    pub pending_voters: usize,
}

async fn summarize(
    ledger: &dyn VoteLedger,
    decision: Decision,
    viewer: &UserId,
    now: Timestamp,
) -> Result<DecisionSummary, VotesError> {
    let votes = ledger.votes_for_decision(&decision.id).await?;
    Ok(DecisionSummary {
        state: decision.state(&votes, now),
        entitled: decision.is_eligible(viewer),
        has_voted: decision.has_voted(viewer, &votes),
        pending_voters: decision.pending_voters(&votes).len(),
        decision,
    })
}

async fn summarize_all(
    ledger: &dyn VoteLedger,
    decisions: Vec<Decision>,
    viewer: &UserId,
    now: Timestamp,
) -> Result<Vec<DecisionSummary>, VotesError> {
    let mut summaries = Vec::with_capacity(decisions.len());
    for decision in decisions {
        summaries.push(summarize(ledger, decision, viewer, now).await?);
    }
    Ok(summaries)
}

/// Decisions the user may vote on whose window has not ended, by start.
pub struct ListOpenDecisionsHandler {
    decisions: Arc<dyn DecisionRepository>,
    ledger: Arc<dyn VoteLedger>,
}

impl ListOpenDecisionsHandler {
    pub fn new(decisions: Arc<dyn DecisionRepository>, ledger: Arc<dyn VoteLedger>) -> Self {
        Self { decisions, ledger }
    }

    pub async fn handle(&self, user: UserId, now: Timestamp) -> Result<Vec<DecisionSummary>, VotesError> {
        let decisions = self.decisions.list_open_for(&user, now).await?;
        summarize_all(self.ledger.as_ref(), decisions, &user, now).await
    }
}

/// Decisions authored by the user, latest end first.
pub struct ListOwnedDecisionsHandler {
    decisions: Arc<dyn DecisionRepository>,
    ledger: Arc<dyn VoteLedger>,
}

impl ListOwnedDecisionsHandler {
    pub fn new(decisions: Arc<dyn DecisionRepository>, ledger: Arc<dyn VoteLedger>) -> Self {
        Self { decisions, ledger }
    }

    pub async fn handle(&self, user: UserId, now: Timestamp) -> Result<Vec<DecisionSummary>, VotesError> {
        let decisions = self.decisions.list_authored_by(&user).await?;
        summarize_all(self.ledger.as_ref(), decisions, &user, now).await
    }
}

/// Decisions whose window has ended, latest end first.
pub struct ListClosedDecisionsHandler {
    decisions: Arc<dyn DecisionRepository>,
    ledger: Arc<dyn VoteLedger>,
}

impl ListClosedDecisionsHandler {
    pub fn new(decisions: Arc<dyn DecisionRepository>, ledger: Arc<dyn VoteLedger>) -> Self {
        Self { decisions, ledger }
    }

    pub async fn handle(&self, user: UserId, now: Timestamp) -> Result<Vec<DecisionSummary>, VotesError> {
        let decisions = self.decisions.list_closed(now).await?;
        summarize_all(self.ledger.as_ref(), decisions, &user, now).await
    }
}

pub struct GetDecisionHandler {
    decisions: Arc<dyn DecisionRepository>,
    ledger: Arc<dyn VoteLedger>,
}

impl GetDecisionHandler {
    pub fn new(decisions: Arc<dyn DecisionRepository>, ledger: Arc<dyn VoteLedger>) -> Self {
        Self { decisions, ledger }
    }

    pub async fn handle(
        &self,
        id: DecisionId,
        viewer: UserId,
        now: Timestamp,
    ) -> Result<DecisionSummary, VotesError> {
        let decision = self
            .decisions
            .find_by_id(&id)
            .await?
            .ok_or(VotesError::DecisionNotFound(id))?;
        summarize(self.ledger.as_ref(), decision, &viewer, now).await
    }
}

/// Per-option tally, available once the decision is closed.
pub struct GetResultsHandler {
    decisions: Arc<dyn DecisionRepository>,
    ledger: Arc<dyn VoteLedger>,
}

impl GetResultsHandler {
    pub fn new(decisions: Arc<dyn DecisionRepository>, ledger: Arc<dyn VoteLedger>) -> Self {
        Self { decisions, ledger }
    }

    pub async fn handle(&self, id: DecisionId, now: Timestamp) -> Result<DecisionResults, VotesError> {
        let decision = self
            .decisions
            .find_by_id(&id)
            .await?
            .ok_or(VotesError::DecisionNotFound(id))?;
        let votes = self.ledger.votes_for_decision(&decision.id).await?;

        if !decision.state(&votes, now).is_closed() {
            return Err(VotesError::ResultsNotAvailable);
        }
        Ok(decision.tally(&votes))
    }
}
