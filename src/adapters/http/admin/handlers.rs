//! HTTP handlers for admin endpoints.

use axum::extract::{Json, Path, State};
use axum::response::IntoResponse;

use crate::application::handlers::export::ExportKind;
use crate::domain::foundation::Timestamp;

use super::super::error::ApiError;
use super::super::middleware::RequireSuperuser;
use super::super::state::AppState;

/// GET /api/admin/export/:kind - Rows of an export, header first
pub async fn export(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    RequireSuperuser(user): RequireSuperuser,
) -> Result<impl IntoResponse, ApiError> {
    let kind: ExportKind = kind.parse()?;

    let rows = state.export_handler().handle(kind, &user, Timestamp::now()).await?;

    tracing::info!(user_id = %user.id, %kind, rows = rows.len(), "Export fetched");
    Ok(Json(rows))
}
