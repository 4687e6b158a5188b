//! Top-level API router.

use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use super::admin::admin_routes;
use super::mentoring::mentoring_routes;
use super::middleware::auth_middleware;
use super::state::AppState;
use super::teams::{auth_routes, team_routes};
use super::votes::decision_routes;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// GET /health - Liveness probe
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Builds the complete application router.
///
/// Every `/api` route sits behind the session middleware; routes that
/// need a user enforce it through their extractors. Transport layers
/// (tracing, CORS, timeouts) are added by the binary.
pub fn api_router(state: AppState) -> Router {
    let api = Router::new()
        .nest("/votes", decision_routes().merge(team_routes()))
        .nest("/auth", auth_routes())
        .nest("/mentoring", mentoring_routes())
        .nest("/admin", admin_routes())
        .layer(from_fn_with_state(state.session_validator.clone(), auth_middleware));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .with_state(state)
}
