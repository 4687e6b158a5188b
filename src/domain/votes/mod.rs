//! Votes domain module.
//!
//! Decisions with a fixed voter list and time window, their options, the
//! vote ledger entries and the classifier deriving a decision's phase.
//!
//! # Module Structure
//!
//! - `decision` - Decision aggregate, creation rules, admission and tally
//! - `state` - DecisionState phases
//! - `vote` - Vote ledger entry
//! - `errors` - VotesError

mod decision;
mod errors;
mod state;
mod vote;

pub use decision::{
    Decision, DecisionDraft, DecisionOption, DecisionResults, OptionTally, VoterScope,
    DEFAULT_OPTION_LABELS, GRACE_MINUTES, MIN_DURATION_MINUTES, SUBJECT_MAX_LEN,
};
pub use errors::VotesError;
pub use state::DecisionState;
pub use vote::Vote;
