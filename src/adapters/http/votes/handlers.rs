//! HTTP handlers for decision endpoints.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::votes::{CastVoteCommand, CreateDecisionCommand};
use crate::domain::foundation::{DecisionId, Timestamp};

use super::super::error::ApiError;
use super::super::middleware::RequireAuth;
use super::super::state::AppState;
use super::dto::{
    CastVoteRequest, CreateDecisionRequest, CreatedDecisionResponse, DecisionResponse,
    OptionResponse, VoteResponse,
};

fn parse_decision_id(raw: &str) -> Result<DecisionId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::bad_request("Invalid decision ID format"))
}

/// POST /api/votes/decisions - Create a decision
pub async fn create_decision(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<CreateDecisionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = CreateDecisionCommand {
        author: user,
        subject: request.subject,
        voters: request.voters,
        start: request.start,
        end: request.end,
        now: Timestamp::now(),
    };

    let decision = state.create_decision_handler().handle(cmd).await?;

    let response = CreatedDecisionResponse {
        id: decision.id,
        options: decision.options.iter().map(OptionResponse::from).collect(),
        subject: decision.subject,
        start: decision.start,
        end: decision.end,
        voters: decision.voters,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/votes/decisions - Open decisions the caller may vote in
pub async fn list_open_decisions(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let summaries = state
        .list_open_decisions_handler()
        .handle(user.id, Timestamp::now())
        .await?;
    let response: Vec<DecisionResponse> = summaries.into_iter().map(Into::into).collect();
    Ok(Json(response))
}

/// GET /api/votes/decisions/owned - Decisions authored by the caller
pub async fn list_owned_decisions(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let summaries = state
        .list_owned_decisions_handler()
        .handle(user.id, Timestamp::now())
        .await?;
    let response: Vec<DecisionResponse> = summaries.into_iter().map(Into::into).collect();
    Ok(Json(response))
}

/// GET /api/votes/decisions/closed - Decisions whose window has ended
pub async fn list_closed_decisions(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let summaries = state
        .list_closed_decisions_handler()
        .handle(user.id, Timestamp::now())
        .await?;
    let response: Vec<DecisionResponse> = summaries.into_iter().map(Into::into).collect();
    Ok(Json(response))
}

/// GET /api/votes/decisions/:id - Decision detail for the caller
pub async fn get_decision(
    State(state): State<AppState>,
    Path(id): Path<String>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_decision_id(&id)?;
    let summary = state
        .get_decision_handler()
        .handle(id, user.id, Timestamp::now())
        .await?;
    Ok(Json(DecisionResponse::from(summary)))
}

/// POST /api/votes/decisions/:id/vote - Cast the caller's vote
pub async fn cast_vote(
    State(state): State<AppState>,
    Path(id): Path<String>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<CastVoteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let decision_id = parse_decision_id(&id)?;
    let cmd = CastVoteCommand {
        decision_id,
        voter: user,
        option_id: request.option_id,
        now: Timestamp::now(),
    };

    let vote = state.cast_vote_handler().handle(cmd).await?;

    Ok((StatusCode::CREATED, Json(VoteResponse::from(vote))))
}

/// GET /api/votes/decisions/:id/results - Tally of a closed decision
pub async fn get_results(
    State(state): State<AppState>,
    Path(id): Path<String>,
    RequireAuth(_user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_decision_id(&id)?;
    let results = state.get_results_handler().handle(id, Timestamp::now()).await?;
    Ok(Json(results))
}
