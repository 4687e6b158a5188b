//! PostgreSQL implementation of VoteLedger.
//!
//! Recording a vote runs in one transaction: the voter row of the decision
//! is locked, the decision's votes are re-read, admission is re-checked and
//! the vote inserted. The `votes_user_option_key` constraint backstops any
//! race the lock does not cover.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{db_error, violated_constraint};
use crate::domain::foundation::{
    DecisionId, DomainError, ErrorCode, OptionId, Timestamp, UserId, VoteId,
};
use crate::domain::votes::{Decision, Vote};
use crate::ports::VoteLedger;

#[derive(Clone)]
pub struct PostgresVoteLedger {
    pool: PgPool,
}

impl PostgresVoteLedger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct VoteRow {
    id: Uuid,
    user_id: Uuid,
    option_id: Uuid,
    created_at: DateTime<Utc>,
}

impl From<VoteRow> for Vote {
    fn from(row: VoteRow) -> Self {
        Vote {
            id: VoteId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            option_id: OptionId::from_uuid(row.option_id),
            created_at: Timestamp::from_datetime(row.created_at),
        }
    }
}

const SELECT_DECISION_VOTES: &str = r#"
    SELECT v.id, v.user_id, v.option_id, v.created_at
    FROM votes v
    JOIN options o ON o.id = v.option_id
    WHERE o.decision_id = $1
"#;

#[async_trait]
impl VoteLedger for PostgresVoteLedger {
    async fn votes_for_decision(&self, decision: &DecisionId) -> Result<Vec<Vote>, DomainError> {
        let rows: Vec<VoteRow> = sqlx::query_as(SELECT_DECISION_VOTES)
            .bind(decision.as_uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to fetch votes", e))?;

        Ok(rows.into_iter().map(Vote::from).collect())
    }

    async fn record(
        &self,
        decision: &Decision,
        user: &UserId,
        option: OptionId,
        now: Timestamp,
    ) -> Result<Vote, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;

        let locked: Option<Uuid> = sqlx::query_scalar(
            r#"
            SELECT user_id FROM decision_voters
            WHERE decision_id = $1 AND user_id = $2
            FOR UPDATE
            "#,
        )
        .bind(decision.id.as_uuid())
        .bind(user.as_uuid())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to lock voter", e))?;

        let rows: Vec<VoteRow> = sqlx::query_as(SELECT_DECISION_VOTES)
            .bind(decision.id.as_uuid())
            .fetch_all(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to fetch votes", e))?;
        let votes: Vec<Vote> = rows.into_iter().map(Vote::from).collect();

        let vote = decision.admit_vote(user, option, &votes, now)?;
        if locked.is_none() {
            return Err(DomainError::new(
                ErrorCode::NotEntitled,
                "user is not a voter of this decision",
            ));
        }

        sqlx::query(
            "INSERT INTO votes (id, user_id, option_id, created_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(vote.id.as_uuid())
        .bind(vote.user_id.as_uuid())
        .bind(vote.option_id.as_uuid())
        .bind(vote.created_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if violated_constraint(&e).as_deref() == Some("votes_user_option_key") {
                return DomainError::new(ErrorCode::AlreadyVoted, "vote already recorded");
            }
            db_error("Failed to record vote", e)
        })?;

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit vote", e))?;

        tracing::debug!(decision_id = %decision.id, user_id = %user, "Vote recorded");
        Ok(vote)
    }
}
