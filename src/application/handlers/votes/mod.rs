//! Votes application handlers.

mod cast_vote;
mod create_decision;
mod queries;

pub use cast_vote::{CastVoteCommand, CastVoteHandler};
pub use create_decision::{CreateDecisionCommand, CreateDecisionHandler};
pub use queries::{
    DecisionSummary, GetDecisionHandler, GetResultsHandler, ListClosedDecisionsHandler,
    ListOpenDecisionsHandler, ListOwnedDecisionsHandler,
};
