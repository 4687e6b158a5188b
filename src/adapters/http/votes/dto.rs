//! HTTP DTOs for the votes endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::votes::DecisionSummary;
use crate::domain::foundation::{DecisionId, OptionId, Timestamp, UserId, VoteId};
use crate::domain::votes::{DecisionOption, Vote};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to create a decision.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDecisionRequest {
    pub subject: String,
    #[serde(default)]
    pub voters: Vec<UserId>,
    pub start: Timestamp,
    pub end: Timestamp,
}

/// Request to vote for one option.
#[derive(Debug, Clone, Deserialize)]
pub struct CastVoteRequest {
    pub option_id: OptionId,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct OptionResponse {
    pub id: OptionId,
    pub text: String,
}

impl From<&DecisionOption> for OptionResponse {
    fn from(option: &DecisionOption) -> Self {
        Self {
            id: option.id,
            text: option.text.clone(),
        }
    }
}

/// Badge shown next to a decision in the frontend.
#[derive(Debug, Clone, Serialize)]
pub struct StateBadge {
    pub code: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
}

/// Decision as seen by one user.
#[derive(Debug, Clone, Serialize)]
pub struct DecisionResponse {
    pub id: DecisionId,
    pub subject: String,
    pub author: UserId,
    pub start: Timestamp,
    pub end: Timestamp,
    pub options: Vec<OptionResponse>,
    pub voter_count: usize,
    pub pending_voters: usize,
    pub state: StateBadge,
    /// The viewer is on the voter list.
    pub entitled: bool,
    pub has_voted: bool,
}

impl From<DecisionSummary> for DecisionResponse {
    fn from(summary: DecisionSummary) -> Self {
        let decision = summary.decision;
        Self {
            id: decision.id,
            options: decision.options.iter().map(OptionResponse::from).collect(),
            subject: decision.subject,
            author: decision.author,
            start: decision.start,
            end: decision.end,
            voter_count: decision.voters.len(),
            pending_voters: summary.pending_voters,
            state: StateBadge {
                code: summary.state.code(),
                color: summary.state.color(),
                icon: summary.state.icon(),
            },
            entitled: summary.entitled,
            has_voted: summary.has_voted,
        }
    }
}

/// Response after a decision was created.
#[derive(Debug, Clone, Serialize)]
pub struct CreatedDecisionResponse {
    pub id: DecisionId,
    pub subject: String,
    pub start: Timestamp,
    pub end: Timestamp,
    pub voters: Vec<UserId>,
    pub options: Vec<OptionResponse>,
}

/// Receipt for a recorded vote.
#[derive(Debug, Clone, Serialize)]
pub struct VoteResponse {
    pub id: VoteId,
    pub option_id: OptionId,
    pub created_at: Timestamp,
}

impl From<Vote> for VoteResponse {
    fn from(vote: Vote) -> Self {
        Self {
            id: vote.id,
            option_id: vote.option_id,
            created_at: vote.created_at,
        }
    }
}
