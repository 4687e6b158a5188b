//! Route configuration for admin endpoints.

use axum::routing::get;
use axum::Router;

use super::super::state::AppState;
use super::handlers::export;

/// Admin routes, mounted at `/api/admin`.
pub fn admin_routes() -> Router<AppState> {
    Router::new().route("/export/:kind", get(export))
}
