//! Decision phase derived from wall-clock time and ledger contents.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Phase of a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionState {
    /// Voting has not started yet.
    Pending,
    /// Voting is possible.
    Open,
    /// Window elapsed or every eligible voter has voted.
    Closed,
}

impl DecisionState {
    pub fn code(&self) -> &'static str {
        match self {
            DecisionState::Pending => "pending",
            DecisionState::Open => "open",
            DecisionState::Closed => "closed",
        }
    }

    /// Bulma color class used by the frontend badge.
    pub fn color(&self) -> &'static str {
        match self {
            DecisionState::Pending => "warning",
            DecisionState::Open => "success",
            DecisionState::Closed => "danger",
        }
    }

    /// Font Awesome icon used by the frontend badge.
    pub fn icon(&self) -> &'static str {
        match self {
            DecisionState::Pending => "fas fa-clock",
            DecisionState::Open => "fas fa-vote-yea",
            DecisionState::Closed => "fas fa-lock",
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, DecisionState::Open)
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, DecisionState::Closed)
    }
}

impl fmt::Display for DecisionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
