//! HTTP handlers for the mentoring sign-up.
//!
//! All routes are public; mentors identify themselves for deletion through
//! the signed token mailed to them.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::mentoring::{
    DeleteMentorCommand, RegisterMenteeCommand, RegisterMentorCommand,
};
use crate::domain::foundation::Timestamp;

use super::super::error::ApiError;
use super::super::state::AppState;
use super::dto::{
    DeleteMentorRequest, FacultyResponse, MenteeSignupRequest, MenteeSignupResponse,
    MentorSignupRequest, MentorSignupResponse, ProgramResponse,
};

/// GET /api/mentoring/faculties - Faculties with their sign-up state
pub async fn list_faculties(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let now = Timestamp::now();
    let faculties = state.list_faculties_handler().handle().await?;
    let response: Vec<FacultyResponse> = faculties
        .into_iter()
        .map(|faculty| FacultyResponse::new(faculty, now))
        .collect();
    Ok(Json(response))
}

/// GET /api/mentoring/faculties/:slug/programs - Study programs of a faculty
pub async fn list_programs(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let programs = state.list_programs_handler().handle(&slug).await?;
    let response: Vec<ProgramResponse> = programs.into_iter().map(Into::into).collect();
    Ok(Json(response))
}

/// GET /api/mentoring/faculties/:slug/mentors - Mentor nicknames of a faculty
pub async fn list_mentors(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let nicknames = state.list_mentor_nicknames_handler().handle(&slug).await?;
    Ok(Json(nicknames))
}

/// POST /api/mentoring/faculties/:slug/mentors - Mentor sign-up
pub async fn register_mentor(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(request): Json<MentorSignupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = RegisterMentorCommand {
        faculty_slug: slug,
        form: request.into(),
        now: Timestamp::now(),
    };

    let mentor = state.register_mentor_handler().handle(cmd).await?;

    Ok((
        StatusCode::CREATED,
        Json(MentorSignupResponse {
            nickname: mentor.nickname,
        }),
    ))
}

/// POST /api/mentoring/faculties/:slug/mentees - Mentee sign-up
pub async fn register_mentee(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(request): Json<MenteeSignupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let mentor = request.mentor.trim().to_uppercase();
    let cmd = RegisterMenteeCommand {
        faculty_slug: slug,
        form: request.into(),
        now: Timestamp::now(),
    };

    state.register_mentee_handler().handle(cmd).await?;

    Ok((StatusCode::CREATED, Json(MenteeSignupResponse { mentor })))
}

/// POST /api/mentoring/mentors/delete - Delete a mentor through a signed link
pub async fn delete_mentor(
    State(state): State<AppState>,
    Json(request): Json<DeleteMentorRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = DeleteMentorCommand {
        token: request.token,
        now: Timestamp::now(),
    };

    state.delete_mentor_handler().handle(cmd).await?;

    Ok(StatusCode::NO_CONTENT)
}
