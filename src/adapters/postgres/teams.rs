//! PostgreSQL implementations of the team, membership and invitation ports.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use super::{db_error, violated_constraint};
use crate::domain::foundation::{DomainError, InvitationId, TeamId, Timestamp, UserId};
use crate::domain::teams::{Invitation, Membership, Team};
use crate::ports::{InvitationRepository, MembershipRepository, TeamRepository};

#[derive(Clone)]
pub struct PostgresTeamRepository {
    pool: PgPool,
}

impl PostgresTeamRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TeamRow {
    id: Uuid,
    name: String,
    slug: String,
    created_at: DateTime<Utc>,
}

impl From<TeamRow> for Team {
    fn from(row: TeamRow) -> Self {
        Team {
            id: TeamId::from_uuid(row.id),
            name: row.name,
            slug: row.slug,
            created_at: Timestamp::from_datetime(row.created_at),
        }
    }
}

#[async_trait]
impl TeamRepository for PostgresTeamRepository {
    async fn save(&self, team: &Team) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO teams (id, name, slug, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE SET name = EXCLUDED.name, slug = EXCLUDED.slug
            "#,
        )
        .bind(team.id.as_uuid())
        .bind(&team.name)
        .bind(&team.slug)
        .bind(team.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to save team", e))?;

        Ok(())
    }

    async fn find_many(&self, ids: &[TeamId]) -> Result<Vec<Team>, DomainError> {
        let ids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let rows: Vec<TeamRow> = sqlx::query_as(
            "SELECT id, name, slug, created_at FROM teams WHERE id = ANY($1) ORDER BY name",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch teams", e))?;

        Ok(rows.into_iter().map(Team::from).collect())
    }

    async fn list_all(&self) -> Result<Vec<Team>, DomainError> {
        let rows: Vec<TeamRow> =
            sqlx::query_as("SELECT id, name, slug, created_at FROM teams ORDER BY name")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| db_error("Failed to list teams", e))?;

        Ok(rows.into_iter().map(Team::from).collect())
    }
}

#[derive(Clone)]
pub struct PostgresMembershipRepository {
    pool: PgPool,
}

impl PostgresMembershipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MembershipRow {
    team_id: Uuid,
    user_id: Uuid,
    invitation_id: Option<Uuid>,
    created_at: DateTime<Utc>,
}

impl From<MembershipRow> for Membership {
    fn from(row: MembershipRow) -> Self {
        Membership {
            team_id: TeamId::from_uuid(row.team_id),
            user_id: UserId::from_uuid(row.user_id),
            invitation_id: row.invitation_id.map(InvitationId::from_uuid),
            created_at: Timestamp::from_datetime(row.created_at),
        }
    }
}

#[async_trait]
impl MembershipRepository for PostgresMembershipRepository {
    async fn add_if_absent(&self, membership: &Membership) -> Result<bool, DomainError> {
        let result = sqlx::query(
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
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to add membership", e))?;

        Ok(result.rows_affected() == 1)
    }

    async fn team_ids_of(&self, user: &UserId) -> Result<Vec<TeamId>, DomainError> {
        let ids: Vec<Uuid> = sqlx::query_scalar("SELECT team_id FROM memberships WHERE user_id = $1")
            .bind(user.as_uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to fetch team ids", e))?;

        Ok(ids.into_iter().map(TeamId::from_uuid).collect())
    }

    async fn list_for_user(&self, user: &UserId) -> Result<Vec<Membership>, DomainError> {
        let rows: Vec<MembershipRow> = sqlx::query_as(
            r#"
            SELECT team_id, user_id, invitation_id, created_at
            FROM memberships WHERE user_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(user.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch memberships", e))?;

        Ok(rows.into_iter().map(Membership::from).collect())
    }

    async fn list_all(&self) -> Result<Vec<Membership>, DomainError> {
        let rows: Vec<MembershipRow> = sqlx::query_as(
            "SELECT team_id, user_id, invitation_id, created_at FROM memberships ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list memberships", e))?;

        Ok(rows.into_iter().map(Membership::from).collect())
    }
}

#[derive(Clone)]
pub struct PostgresInvitationRepository {
    pool: PgPool,
}

impl PostgresInvitationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Attaches team ids to invitation rows.
    async fn with_teams(&self, rows: Vec<InvitationRow>) -> Result<Vec<Invitation>, DomainError> {
        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let links: Vec<(Uuid, Uuid)> = sqlx::query_as(
            "SELECT invitation_id, team_id FROM invitation_teams WHERE invitation_id = ANY($1)",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch invitation teams", e))?;

        let mut teams: HashMap<Uuid, Vec<TeamId>> = HashMap::new();
        for (invitation_id, team_id) in links {
            teams
                .entry(invitation_id)
                .or_default()
                .push(TeamId::from_uuid(team_id));
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let mut team_ids = teams.remove(&row.id).unwrap_or_default();
                team_ids.sort();
                Invitation {
                    id: InvitationId::from_uuid(row.id),
                    token: row.token,
                    team_ids,
                    expires_at: Timestamp::from_datetime(row.expires_at),
                    created_by: UserId::from_uuid(row.created_by),
                    created_at: Timestamp::from_datetime(row.created_at),
                }
            })
            .collect())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct InvitationRow {
    id: Uuid,
    token: String,
    expires_at: DateTime<Utc>,
    created_by: Uuid,
    created_at: DateTime<Utc>,
}

#[async_trait]
impl InvitationRepository for PostgresInvitationRepository {
    async fn save(&self, invitation: &Invitation) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;

        sqlx::query(
            r#"
            INSERT INTO invitations (id, token, expires_at, created_by, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(invitation.id.as_uuid())
        .bind(&invitation.token)
        .bind(invitation.expires_at.as_datetime())
        .bind(invitation.created_by.as_uuid())
        .bind(invitation.created_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if violated_constraint(&e).as_deref() == Some("invitations_token_key") {
                return DomainError::conflict("token", "invitation token already exists");
            }
            db_error("Failed to save invitation", e)
        })?;

        for team_id in &invitation.team_ids {
            sqlx::query("INSERT INTO invitation_teams (invitation_id, team_id) VALUES ($1, $2)")
                .bind(invitation.id.as_uuid())
                .bind(team_id.as_uuid())
                .execute(&mut *tx)
                .await
                .map_err(|e| db_error("Failed to link invitation team", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit invitation", e))?;

        Ok(())
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<Invitation>, DomainError> {
        let row: Option<InvitationRow> = sqlx::query_as(
            "SELECT id, token, expires_at, created_by, created_at FROM invitations WHERE token = $1",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch invitation", e))?;

        match row {
            Some(row) => Ok(self.with_teams(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn list_all(&self) -> Result<Vec<Invitation>, DomainError> {
        let rows: Vec<InvitationRow> = sqlx::query_as(
            r#"
            SELECT id, token, expires_at, created_by, created_at
            FROM invitations ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list invitations", e))?;

        self.with_teams(rows).await
    }
}
