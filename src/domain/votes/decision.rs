//! Decision aggregate.
//!
//! A decision owns its three options and its eligible-voter set. Everything
//! that depends on votes takes the ledger contents as a slice, so the state
//! classifier and the admission rules stay pure.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{DecisionState, Vote, VotesError};
use crate::domain::foundation::{
    validators, DecisionId, OptionId, Timestamp, UserId, ValidationError,
    ValidationErrors,
};

/// Minimum length of the voting window.
pub const MIN_DURATION_MINUTES: i64 = 15;

/// Tolerance for start/end relative to the creation time.
pub const GRACE_MINUTES: i64 = 5;

pub const SUBJECT_MAX_LEN: usize = 255;

/// Options every decision is created with, in display order.
pub const DEFAULT_OPTION_LABELS: [&str; 3] = ["For", "Against", "Abstain"];

/// One of the fixed choices of a decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionOption {
    pub id: OptionId,
    pub decision_id: DecisionId,
    pub text: String,
    pub position: i32,
}

/// A votable proposal with a fixed voter list and time window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub id: DecisionId,
    pub subject: String,
    pub author: UserId,
    /// Sorted and free of duplicates.
    pub voters: Vec<UserId>,
    pub start: Timestamp,
    pub end: Timestamp,
    pub options: Vec<DecisionOption>,
    pub created_at: Timestamp,
}

/// Raw creation input as submitted by the author.
#[derive(Debug, Clone)]
pub struct DecisionDraft {
    pub subject: String,
    pub voters: Vec<UserId>,
    pub start: Timestamp,
    pub end: Timestamp,
}

/// Users an author may list as voters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoterScope {
    /// No restriction. Only for decisions built outside a request.
    Any,
    /// Users sharing at least one team with the author.
    Restricted(HashSet<UserId>),
    /// Superusers may pick any stored user.
    Existing(HashSet<UserId>),
}

impl VoterScope {
    pub fn allows(&self, user: &UserId) -> bool {
        match self {
            VoterScope::Any => true,
            VoterScope::Restricted(allowed) | VoterScope::Existing(allowed) => {
                allowed.contains(user)
            }
        }
    }

    fn rejection(&self) -> &'static str {
        match self {
            VoterScope::Existing(_) => "unknown user among the voters",
            VoterScope::Any | VoterScope::Restricted(_) => "voters must share a team with you",
        }
    }
}

/// Vote count of a single option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionTally {
    pub option_id: OptionId,
    pub text: String,
    pub votes: usize,
}

/// Tally of a decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecisionResults {
    pub decision_id: DecisionId,
    pub subject: String,
    pub options: Vec<OptionTally>,
    pub eligible_voters: usize,
    pub votes_cast: usize,
}

impl Decision {
    /// Validates a draft and builds the decision with its default options.
    ///
    /// All rule violations are collected into one error.
    pub fn create(
        draft: DecisionDraft,
        author: UserId,
        scope: &VoterScope,
        now: Timestamp,
    ) -> Result<Self, VotesError> {
        let mut errors = ValidationErrors::new();

        let subject = errors.check(
            validators::required("subject", &draft.subject).and_then(|s| {
                validators::max_chars("subject", &s, SUBJECT_MAX_LEN)?;
                Ok(s)
            }),
        );

        let mut voters = draft.voters;
        voters.sort();
        voters.dedup();
        if voters.is_empty() {
            errors.push(ValidationError::empty_field("voters"));
        } else if voters.iter().any(|v| !scope.allows(v)) {
            errors.push(ValidationError::rejected("voters", scope.rejection()));
        }

        if draft.start.is_before(&now.minus_minutes(GRACE_MINUTES)) {
            errors.push(ValidationError::rejected(
                "start",
                format!("may be at most {} minutes in the past", GRACE_MINUTES),
            ));
        }
        if draft.end.is_before(&now.plus_minutes(GRACE_MINUTES)) {
            errors.push(ValidationError::rejected(
                "end",
                format!("must be at least {} minutes in the future", GRACE_MINUTES),
            ));
        }
        if draft.end.duration_since(&draft.start) < chrono::Duration::minutes(MIN_DURATION_MINUTES) {
            errors.push(ValidationError::rejected(
                "end",
                format!("voting must stay open for at least {} minutes", MIN_DURATION_MINUTES),
            ));
        }

        errors.into_result()?;
        let subject = subject.unwrap_or_default();

        let id = DecisionId::new();
        let options = DEFAULT_OPTION_LABELS
            .iter()
            .enumerate()
            .map(|(position, text)| DecisionOption {
                id: OptionId::new(),
                decision_id: id,
                text: (*text).to_string(),
                position: position as i32,
            })
            .collect();

        Ok(Self {
            id,
            subject,
            author,
            voters,
            start: draft.start,
            end: draft.end,
            options,
            created_at: now,
        })
    }

    pub fn option(&self, option_id: &OptionId) -> Option<&DecisionOption> {
        self.options.iter().find(|o| &o.id == option_id)
    }

    pub fn is_eligible(&self, user: &UserId) -> bool {
        self.voters.binary_search(user).is_ok()
    }

    /// Votes of the ledger slice that were cast on this decision's options.
    fn own_votes<'a>(&'a self, votes: &'a [Vote]) -> impl Iterator<Item = &'a Vote> + 'a {
        votes.iter().filter(move |v| self.option(&v.option_id).is_some())
    }

    pub fn has_voted(&self, user: &UserId, votes: &[Vote]) -> bool {
        self.own_votes(votes).any(|v| &v.user_id == user)
    }

    /// Eligible voters without a vote on any option of this decision.
    pub fn pending_voters(&self, votes: &[Vote]) -> Vec<UserId> {
        let voted: HashSet<UserId> = self.own_votes(votes).map(|v| v.user_id).collect();
        self.voters
            .iter()
            .filter(|v| !voted.contains(v))
            .copied()
            .collect()
    }

    /// Derives the phase from the clock and the ledger.
    ///
    /// A decision everyone voted on is closed even before `end`.
    pub fn state(&self, votes: &[Vote], now: Timestamp) -> DecisionState {
        if self.pending_voters(votes).is_empty() {
            DecisionState::Closed
        } else if now.is_before(&self.start) {
            DecisionState::Pending
        } else if now.is_before(&self.end) {
            DecisionState::Open
        } else {
            DecisionState::Closed
        }
    }

    /// Checks whether `user` may vote for `option_id` right now.
    ///
    /// Checks run in a fixed order: window, eligibility, prior vote, option.
    pub fn admit_vote(
        &self,
        user: &UserId,
        option_id: OptionId,
        votes: &[Vote],
        now: Timestamp,
    ) -> Result<Vote, VotesError> {
        if !self.state(votes, now).is_open() {
            return Err(VotesError::NotOpen);
        }
        if !self.is_eligible(user) {
            return Err(VotesError::NotEntitled);
        }
        if self.has_voted(user, votes) {
            return Err(VotesError::AlreadyVoted);
        }
        if self.option(&option_id).is_none() {
            return Err(VotesError::ForeignOption);
        }
        Ok(Vote::new(*user, option_id, now))
    }

    pub fn tally(&self, votes: &[Vote]) -> DecisionResults {
        let options: Vec<OptionTally> = self
            .options
            .iter()
            .map(|option| OptionTally {
                option_id: option.id,
                text: option.text.clone(),
                votes: votes.iter().filter(|v| v.option_id == option.id).count(),
            })
            .collect();
        let votes_cast = options.iter().map(|o| o.votes).sum();

        DecisionResults {
            decision_id: self.id,
            subject: self.subject.clone(),
            options,
            eligible_voters: self.voters.len(),
            votes_cast,
        }
    }
}
