//! Decision repository port.
//!
//! Decisions are written once together with their options and voters and
//! never updated afterwards.

use async_trait::async_trait;

use crate::domain::foundation::{DecisionId, DomainError, Timestamp, UserId};
use crate::domain::votes::Decision;

#[async_trait]
pub trait DecisionRepository: Send + Sync {
    /// Persists the decision, its voters and its options atomically.
    async fn save(&self, decision: &Decision) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &DecisionId) -> Result<Option<Decision>, DomainError>;

    /// Decisions listing `user` as voter with `end > now`, ordered by start.
    async fn list_open_for(&self, user: &UserId, now: Timestamp)
        -> Result<Vec<Decision>, DomainError>;

    /// Decisions authored by `user`, latest end first.
    async fn list_authored_by(&self, user: &UserId) -> Result<Vec<Decision>, DomainError>;

    /// Decisions with `end < now`, latest end first.
    async fn list_closed(&self, now: Timestamp) -> Result<Vec<Decision>, DomainError>;

    /// Every decision, newest first.
    async fn list_all(&self) -> Result<Vec<Decision>, DomainError>;
}
