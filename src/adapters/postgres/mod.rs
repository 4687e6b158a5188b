//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresUserRepository` - accounts and the `friends_of` query
//! - `PostgresTeamRepository`, `PostgresMembershipRepository`,
//!   `PostgresInvitationRepository` - teams and invitations
//! - `PostgresDecisionRepository` - decisions with voters and options
//! - `PostgresVoteLedger` - transactional vote admission
//! - `PostgresFacultyRepository`, `PostgresMentorRepository`,
//!   `PostgresMenteeRepository` - mentoring

mod decisions;
mod mentoring;
mod teams;
mod users;
mod vote_ledger;

pub use decisions::PostgresDecisionRepository;
pub use mentoring::{PostgresFacultyRepository, PostgresMenteeRepository, PostgresMentorRepository};
pub use teams::{PostgresInvitationRepository, PostgresMembershipRepository, PostgresTeamRepository};
pub use users::PostgresUserRepository;
pub use vote_ledger::PostgresVoteLedger;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseConfig;
use crate::domain::foundation::{DomainError, ErrorCode};

/// Opens a connection pool sized from configuration.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .connect(&config.url)
        .await
}

/// Applies the embedded schema migrations.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Name of the violated unique constraint, if `e` is a unique violation.
fn violated_constraint(e: &sqlx::Error) -> Option<String> {
    if let sqlx::Error::Database(db_err) = e {
        if db_err.is_unique_violation() {
            return db_err.constraint().map(str::to_string);
        }
    }
    None
}

fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, e))
}
