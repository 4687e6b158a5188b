//! PostgreSQL implementations of the mentoring ports.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::collections::HashSet;
use uuid::Uuid;

use super::{db_error, violated_constraint};
use crate::domain::foundation::{
    DomainError, FacultyId, MenteeId, MentorId, ProgramId, Timestamp,
};
use crate::domain::mentoring::{Faculty, Mentee, Mentor, Program};
use crate::ports::{FacultyRepository, MenteeRepository, MentorRepository};

#[derive(Clone)]
pub struct PostgresFacultyRepository {
    pool: PgPool,
}

impl PostgresFacultyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct FacultyRow {
    id: Uuid,
    name: String,
    slug: String,
    color: String,
    registration_deadline: DateTime<Utc>,
}

impl From<FacultyRow> for Faculty {
    fn from(row: FacultyRow) -> Self {
        Faculty {
            id: FacultyId::from_uuid(row.id),
            name: row.name,
            slug: row.slug,
            color: row.color,
            registration_deadline: Timestamp::from_datetime(row.registration_deadline),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProgramRow {
    id: Uuid,
    faculty_id: Uuid,
    name: String,
}

impl From<ProgramRow> for Program {
    fn from(row: ProgramRow) -> Self {
        Program {
            id: ProgramId::from_uuid(row.id),
            faculty_id: FacultyId::from_uuid(row.faculty_id),
            name: row.name,
        }
    }
}

#[async_trait]
impl FacultyRepository for PostgresFacultyRepository {
    async fn save_faculty(&self, faculty: &Faculty) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO faculties (id, name, slug, color, registration_deadline)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                slug = EXCLUDED.slug,
                color = EXCLUDED.color,
                registration_deadline = EXCLUDED.registration_deadline
            "#,
        )
        .bind(faculty.id.as_uuid())
        .bind(&faculty.name)
        .bind(&faculty.slug)
        .bind(&faculty.color)
        .bind(faculty.registration_deadline.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if violated_constraint(&e).as_deref() == Some("faculties_slug_key") {
                return DomainError::conflict("slug", "faculty slug already exists");
            }
            db_error("Failed to save faculty", e)
        })?;

        Ok(())
    }

    async fn save_program(&self, program: &Program) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO programs (id, faculty_id, name) VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE SET name = EXCLUDED.name
            "#,
        )
        .bind(program.id.as_uuid())
        .bind(program.faculty_id.as_uuid())
        .bind(&program.name)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to save program", e))?;

        Ok(())
    }

    async fn list_faculties(&self) -> Result<Vec<Faculty>, DomainError> {
        let rows: Vec<FacultyRow> = sqlx::query_as(
            "SELECT id, name, slug, color, registration_deadline FROM faculties ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list faculties", e))?;

        Ok(rows.into_iter().map(Faculty::from).collect())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Faculty>, DomainError> {
        let row: Option<FacultyRow> = sqlx::query_as(
            "SELECT id, name, slug, color, registration_deadline FROM faculties WHERE slug = $1",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch faculty", e))?;

        Ok(row.map(Faculty::from))
    }

    async fn programs_of(&self, faculty: &FacultyId) -> Result<Vec<Program>, DomainError> {
        let rows: Vec<ProgramRow> = sqlx::query_as(
            "SELECT id, faculty_id, name FROM programs WHERE faculty_id = $1 ORDER BY name",
        )
        .bind(faculty.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch programs", e))?;

        Ok(rows.into_iter().map(Program::from).collect())
    }
}

#[derive(Clone)]
pub struct PostgresMentorRepository {
    pool: PgPool,
}

impl PostgresMentorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MentorRow {
    id: Uuid,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    program_id: Uuid,
    faculty_id: Uuid,
    nickname: String,
    created_at: DateTime<Utc>,
}

impl From<MentorRow> for Mentor {
    fn from(row: MentorRow) -> Self {
        Mentor {
            id: MentorId::from_uuid(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            program_id: ProgramId::from_uuid(row.program_id),
            faculty_id: FacultyId::from_uuid(row.faculty_id),
            nickname: row.nickname,
            created_at: Timestamp::from_datetime(row.created_at),
        }
    }
}

const SELECT_MENTORS: &str = r#"
    SELECT id, first_name, last_name, email, phone, program_id, faculty_id, nickname, created_at
    FROM mentors
"#;

#[async_trait]
impl MentorRepository for PostgresMentorRepository {
    async fn save(&self, mentor: &Mentor) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO mentors (
                id, first_name, last_name, email, phone, program_id, faculty_id, nickname, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(mentor.id.as_uuid())
        .bind(&mentor.first_name)
        .bind(&mentor.last_name)
        .bind(&mentor.email)
        .bind(&mentor.phone)
        .bind(mentor.program_id.as_uuid())
        .bind(mentor.faculty_id.as_uuid())
        .bind(&mentor.nickname)
        .bind(mentor.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| match violated_constraint(&e).as_deref() {
            Some("mentors_email_key") => DomainError::conflict("email", "email already registered"),
            Some("mentors_nickname_key") => DomainError::conflict("nickname", "nickname already taken"),
            _ => db_error("Failed to save mentor", e),
        })?;

        Ok(())
    }

    async fn nicknames(&self) -> Result<HashSet<String>, DomainError> {
        let nicknames: Vec<String> = sqlx::query_scalar("SELECT nickname FROM mentors")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to fetch nicknames", e))?;

        Ok(nicknames.into_iter().collect())
    }

    async fn find_by_nickname(&self, nickname: &str) -> Result<Option<Mentor>, DomainError> {
        let row: Option<MentorRow> =
            sqlx::query_as(&format!("{} WHERE nickname = $1", SELECT_MENTORS))
                .bind(nickname)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("Failed to fetch mentor", e))?;

        Ok(row.map(Mentor::from))
    }

    async fn email_exists(&self, email: &str) -> Result<bool, DomainError> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM mentors WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("Failed to check mentor email", e))
    }

    async fn delete_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM mentors WHERE email = $1")
            .bind(email)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete mentor", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_by_faculty(&self, faculty: &FacultyId) -> Result<Vec<Mentor>, DomainError> {
        let rows: Vec<MentorRow> = sqlx::query_as(&format!(
            "{} WHERE faculty_id = $1 ORDER BY nickname",
            SELECT_MENTORS
        ))
        .bind(faculty.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list mentors", e))?;

        Ok(rows.into_iter().map(Mentor::from).collect())
    }

    async fn list_all(&self) -> Result<Vec<Mentor>, DomainError> {
        let rows: Vec<MentorRow> =
            sqlx::query_as(&format!("{} ORDER BY created_at", SELECT_MENTORS))
                .fetch_all(&self.pool)
                .await
                .map_err(|e| db_error("Failed to list mentors", e))?;

        Ok(rows.into_iter().map(Mentor::from).collect())
    }
}

#[derive(Clone)]
pub struct PostgresMenteeRepository {
    pool: PgPool,
}

impl PostgresMenteeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MenteeRow {
    id: Uuid,
    first_name: String,
    last_name: String,
    email: String,
    program_id: Uuid,
    faculty_id: Uuid,
    mentor_id: Uuid,
    created_at: DateTime<Utc>,
}

impl From<MenteeRow> for Mentee {
    fn from(row: MenteeRow) -> Self {
        Mentee {
            id: MenteeId::from_uuid(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            program_id: ProgramId::from_uuid(row.program_id),
            faculty_id: FacultyId::from_uuid(row.faculty_id),
            mentor_id: MentorId::from_uuid(row.mentor_id),
            created_at: Timestamp::from_datetime(row.created_at),
        }
    }
}

#[async_trait]
impl MenteeRepository for PostgresMenteeRepository {
    async fn save(&self, mentee: &Mentee) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO mentees (
                id, first_name, last_name, email, program_id, faculty_id, mentor_id, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(mentee.id.as_uuid())
        .bind(&mentee.first_name)
        .bind(&mentee.last_name)
        .bind(&mentee.email)
        .bind(mentee.program_id.as_uuid())
        .bind(mentee.faculty_id.as_uuid())
        .bind(mentee.mentor_id.as_uuid())
        .bind(mentee.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if violated_constraint(&e).as_deref() == Some("mentees_email_key") {
                return DomainError::conflict("email", "email already registered");
            }
            db_error("Failed to save mentee", e)
        })?;

        Ok(())
    }

    async fn email_exists(&self, email: &str) -> Result<bool, DomainError> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM mentees WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("Failed to check mentee email", e))
    }

    async fn list_all(&self) -> Result<Vec<Mentee>, DomainError> {
        let rows: Vec<MenteeRow> = sqlx::query_as(
            r#"
            SELECT id, first_name, last_name, email, program_id, faculty_id, mentor_id, created_at
            FROM mentees ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list mentees", e))?;

        Ok(rows.into_iter().map(Mentee::from).collect())
    }
}
