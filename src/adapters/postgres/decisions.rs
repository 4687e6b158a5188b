//! PostgreSQL implementation of DecisionRepository.
//!
//! A decision spans three tables: `decisions`, `decision_voters` and
//! `options`. Writes go through one transaction; reads load the parent rows
//! first and attach voters and options with two batched queries.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use super::db_error;
use crate::domain::foundation::{DecisionId, DomainError, OptionId, Timestamp, UserId};
use crate::domain::votes::{Decision, DecisionOption};
use crate::ports::DecisionRepository;

#[derive(Clone)]
pub struct PostgresDecisionRepository {
    pool: PgPool,
}

impl PostgresDecisionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn assemble(&self, rows: Vec<DecisionRow>) -> Result<Vec<Decision>, DomainError> {
        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();

        let voter_rows: Vec<(Uuid, Uuid)> = sqlx::query_as(
            "SELECT decision_id, user_id FROM decision_voters WHERE decision_id = ANY($1)",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch voters", e))?;

        let option_rows: Vec<OptionRow> = sqlx::query_as(
            r#"
            SELECT id, decision_id, text, position
            FROM options WHERE decision_id = ANY($1)
            ORDER BY position
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch options", e))?;

        let mut voters: HashMap<Uuid, Vec<UserId>> = HashMap::new();
        for (decision_id, user_id) in voter_rows {
            voters
                .entry(decision_id)
                .or_default()
                .push(UserId::from_uuid(user_id));
        }

        let mut options: HashMap<Uuid, Vec<DecisionOption>> = HashMap::new();
        for row in option_rows {
            options.entry(row.decision_id).or_default().push(DecisionOption {
                id: OptionId::from_uuid(row.id),
                decision_id: DecisionId::from_uuid(row.decision_id),
                text: row.text,
                position: row.position,
            });
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let mut decision_voters = voters.remove(&row.id).unwrap_or_default();
                decision_voters.sort();
                Decision {
                    id: DecisionId::from_uuid(row.id),
                    subject: row.subject,
                    author: UserId::from_uuid(row.author_id),
                    voters: decision_voters,
                    start: Timestamp::from_datetime(row.start_at),
                    end: Timestamp::from_datetime(row.end_at),
                    options: options.remove(&row.id).unwrap_or_default(),
                    created_at: Timestamp::from_datetime(row.created_at),
                }
            })
            .collect())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct DecisionRow {
    id: Uuid,
    subject: String,
    author_id: Uuid,
    start_at: DateTime<Utc>,
    end_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct OptionRow {
    id: Uuid,
    decision_id: Uuid,
    text: String,
    position: i32,
}

const SELECT_DECISIONS: &str =
    "SELECT id, subject, author_id, start_at, end_at, created_at FROM decisions";

#[async_trait]
impl DecisionRepository for PostgresDecisionRepository {
    async fn save(&self, decision: &Decision) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;

        sqlx::query(
            r#"
            INSERT INTO decisions (id, subject, author_id, start_at, end_at, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(decision.id.as_uuid())
        .bind(&decision.subject)
        .bind(decision.author.as_uuid())
        .bind(decision.start.as_datetime())
        .bind(decision.end.as_datetime())
        .bind(decision.created_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to save decision", e))?;

        for voter in &decision.voters {
            sqlx::query("INSERT INTO decision_voters (decision_id, user_id) VALUES ($1, $2)")
                .bind(decision.id.as_uuid())
                .bind(voter.as_uuid())
                .execute(&mut *tx)
                .await
                .map_err(|e| db_error("Failed to save voter", e))?;
        }

        for option in &decision.options {
            sqlx::query(
                "INSERT INTO options (id, decision_id, text, position) VALUES ($1, $2, $3, $4)",
            )
            .bind(option.id.as_uuid())
            .bind(decision.id.as_uuid())
            .bind(&option.text)
            .bind(option.position)
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to save option", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit decision", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &DecisionId) -> Result<Option<Decision>, DomainError> {
        let row: Option<DecisionRow> =
            sqlx::query_as(&format!("{} WHERE id = $1", SELECT_DECISIONS))
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("Failed to fetch decision", e))?;

        match row {
            Some(row) => Ok(self.assemble(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn list_open_for(
        &self,
        user: &UserId,
        now: Timestamp,
    ) -> Result<Vec<Decision>, DomainError> {
        let rows: Vec<DecisionRow> = sqlx::query_as(&format!(
            r#"{} WHERE end_at > $2 AND id IN (
                SELECT decision_id FROM decision_voters WHERE user_id = $1
            )
            ORDER BY start_at"#,
            SELECT_DECISIONS
        ))
        .bind(user.as_uuid())
        .bind(now.as_datetime())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list open decisions", e))?;

        self.assemble(rows).await
    }

    async fn list_authored_by(&self, user: &UserId) -> Result<Vec<Decision>, DomainError> {
        let rows: Vec<DecisionRow> = sqlx::query_as(&format!(
            "{} WHERE author_id = $1 ORDER BY end_at DESC",
            SELECT_DECISIONS
        ))
        .bind(user.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list owned decisions", e))?;

        self.assemble(rows).await
    }

    async fn list_closed(&self, now: Timestamp) -> Result<Vec<Decision>, DomainError> {
        let rows: Vec<DecisionRow> = sqlx::query_as(&format!(
            "{} WHERE end_at < $1 ORDER BY end_at DESC",
            SELECT_DECISIONS
        ))
        .bind(now.as_datetime())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list closed decisions", e))?;

        self.assemble(rows).await
    }

    async fn list_all(&self) -> Result<Vec<Decision>, DomainError> {
        let rows: Vec<DecisionRow> =
            sqlx::query_as(&format!("{} ORDER BY created_at DESC", SELECT_DECISIONS))
                .fetch_all(&self.pool)
                .await
                .map_err(|e| db_error("Failed to list decisions", e))?;

        self.assemble(rows).await
    }
}
