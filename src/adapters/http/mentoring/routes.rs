//! Route configuration for the mentoring sign-up.

use axum::routing::{get, post};
use axum::Router;

use super::super::state::AppState;
use super::handlers::{
    delete_mentor, list_faculties, list_mentors, list_programs, register_mentee, register_mentor,
};

/// Mentoring routes, mounted at `/api/mentoring`.
///
/// - `GET /faculties` - Faculties
/// - `GET /faculties/:slug/programs` - Programs of a faculty
/// - `GET /faculties/:slug/mentors` - Mentor nicknames
/// - `POST /faculties/:slug/mentors` - Mentor sign-up
/// - `POST /faculties/:slug/mentees` - Mentee sign-up
/// - `POST /mentors/delete` - Self-service deletion
pub fn mentoring_routes() -> Router<AppState> {
    Router::new()
        .route("/faculties", get(list_faculties))
        .route("/faculties/:slug/programs", get(list_programs))
        .route("/faculties/:slug/mentors", get(list_mentors).post(register_mentor))
        .route("/faculties/:slug/mentees", post(register_mentee))
        .route("/mentors/delete", post(delete_mentor))
}
