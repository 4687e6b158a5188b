//! PostgreSQL implementation of UserRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{db_error, violated_constraint};
use crate::domain::accounts::User;
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::teams::Membership;
use crate::ports::UserRepository;

#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    first_name: String,
    last_name: String,
    username: String,
    email: String,
    is_superuser: bool,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: UserId::from_uuid(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            username: row.username,
            email: row.email,
            is_superuser: row.is_superuser,
            created_at: Timestamp::from_datetime(row.created_at),
        }
    }
}

const SELECT_USERS: &str = r#"
    SELECT id, first_name, last_name, username, email, is_superuser, password_hash, created_at
    FROM users
"#;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn save(&self, user: &User, password_hash: &str) -> Result<(), DomainError> {
        self.save_with_memberships(user, password_hash, &[]).await
    }

    async fn save_with_memberships(
        &self,
        user: &User,
        password_hash: &str,
        memberships: &[Membership],
    ) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;

        sqlx::query(
            r#"
            INSERT INTO users (
                id, first_name, last_name, username, email, is_superuser, password_hash, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.username)
        .bind(&user.email)
        .bind(user.is_superuser)
        .bind(password_hash)
        .bind(user.created_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if violated_constraint(&e).as_deref() == Some("users_username_key") {
                return DomainError::conflict("username", "username already taken");
            }
            db_error("Failed to save user", e)
        })?;

        for membership in memberships {
            sqlx::query(
                r#"
                INSERT INTO memberships (team_id, user_id, invitation_id, created_at)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT ON CONSTRAINT memberships_team_user_key DO NOTHING
                "#,
            )
            .bind(membership.team_id.as_uuid())
            .bind(membership.user_id.as_uuid())
            .bind(membership.invitation_id.map(|id| *id.as_uuid()))
            .bind(membership.created_at.as_datetime())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to add membership", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit user", e))?;

        Ok(())
    }

    async fn update_password(&self, id: &UserId, password_hash: &str) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE users SET password_hash = $1 WHERE id = $2")
            .bind(password_hash)
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to update password", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::NotFound, "User not found"));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(&format!("{} WHERE id = $1", SELECT_USERS))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to fetch user", e))?;

        Ok(row.map(User::from))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        Ok(self.find_credentials(username).await?.map(|(user, _)| user))
    }

    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<(User, String)>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(&format!("{} WHERE username = $1", SELECT_USERS))
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to fetch user", e))?;

        Ok(row.map(|row| {
            let hash = row.password_hash.clone();
            (User::from(row), hash)
        }))
    }

    async fn find_many(&self, ids: &[UserId]) -> Result<Vec<User>, DomainError> {
        let ids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let rows: Vec<UserRow> = sqlx::query_as(&format!(
            "{} WHERE id = ANY($1) ORDER BY first_name, last_name",
            SELECT_USERS
        ))
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch users", e))?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn friends_of(&self, user: &UserId) -> Result<Vec<User>, DomainError> {
        let rows: Vec<UserRow> = sqlx::query_as(&format!(
            r#"{} WHERE id IN (
                SELECT peer.user_id
                FROM memberships own
                JOIN memberships peer ON peer.team_id = own.team_id
                WHERE own.user_id = $1
            )
            ORDER BY first_name, last_name"#,
            SELECT_USERS
        ))
        .bind(user.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch friends", e))?;

        Ok(rows.into_iter().map(User::from).collect())
    }
}
