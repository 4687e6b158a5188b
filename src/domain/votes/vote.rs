//! Vote ledger entry.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{OptionId, Timestamp, UserId, VoteId};

/// A user's choice of one option.
///
/// Storage keeps `(user_id, option_id)` unique; one vote per decision is
/// enforced by the admission transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub id: VoteId,
    pub user_id: UserId,
    pub option_id: OptionId,
    pub created_at: Timestamp,
}

impl Vote {
    pub fn new(user_id: UserId, option_id: OptionId, now: Timestamp) -> Self {
        Self {
            id: VoteId::new(),
            user_id,
            option_id,
            created_at: now,
        }
    }
}
