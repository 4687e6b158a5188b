//! Route configuration for decision endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::super::state::AppState;
use super::handlers::{
    cast_vote, create_decision, get_decision, get_results, list_closed_decisions,
    list_open_decisions, list_owned_decisions,
};

/// Decision routes, mounted at `/api/votes`.
///
/// - `GET /decisions` - Open decisions the caller may vote in
/// - `POST /decisions` - Create a decision
/// - `GET /decisions/owned` - Decisions authored by the caller
/// - `GET /decisions/closed` - Decisions whose window has ended
/// - `GET /decisions/:id` - Decision detail
/// - `POST /decisions/:id/vote` - Cast a vote
/// - `GET /decisions/:id/results` - Tally once closed
pub fn decision_routes() -> Router<AppState> {
    Router::new()
        .route("/decisions", get(list_open_decisions).post(create_decision))
        .route("/decisions/owned", get(list_owned_decisions))
        .route("/decisions/closed", get(list_closed_decisions))
        .route("/decisions/:id", get(get_decision))
        .route("/decisions/:id/vote", post(cast_vote))
        .route("/decisions/:id/results", get(get_results))
}
