//! HTTP adapter - JSON API over axum.
//!
//! - `votes` - Decisions and votes
//! - `teams` - Teams, invitations, registration and login
//! - `mentoring` - Mentor and mentee sign-up
//! - `admin` - Superuser exports
//! - `middleware` - Session authentication
//!
//! Handlers translate requests into application commands and map module
//! errors onto [`ApiError`].

pub mod admin;
pub mod error;
pub mod mentoring;
pub mod middleware;
pub mod router;
pub mod state;
pub mod teams;
pub mod votes;

pub use error::{ApiError, ErrorResponse};
pub use router::api_router;
pub use state::AppState;
