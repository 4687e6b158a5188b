//! HTTP handlers for teams, invitations, registration and login.

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::teams::{
    ChangePasswordCommand, IssueInvitationCommand, LoginCommand, RedeemInvitationCommand, RegisterAccountCommand,
};
use crate::domain::foundation::Timestamp;
use crate::domain::teams::RegistrationForm;

use super::super::error::ApiError;
use super::super::middleware::RequireAuth;
use super::super::state::AppState;
use super::dto::{
    ChangePasswordRequest, InvitationResponse, IssueInvitationRequest, JoinRequest, JoinResponse, LoginRequest,
    LoginResponse, RegisterRequest, RegisterResponse, TeamResponse, UserResponse,
};

/// GET /api/votes/teams - All teams
pub async fn list_teams(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let teams = state.list_teams_handler().handle().await?;
    let response: Vec<TeamResponse> = teams.into_iter().map(Into::into).collect();
    Ok(Json(response))
}

/// GET /api/votes/invitations - Invitations covering only the caller's teams
pub async fn list_invitations(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let invitations = state.list_invitations_handler().handle(user.id).await?;
    let response: Vec<InvitationResponse> = invitations
        .into_iter()
        .map(|invitation| {
            let link = state.invitation_link(&invitation.token);
            InvitationResponse::new(invitation, link)
        })
        .collect();
    Ok(Json(response))
}

/// POST /api/votes/invitations - Issue an invitation
pub async fn issue_invitation(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<IssueInvitationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = IssueInvitationCommand {
        creator: user,
        team_ids: request.team_ids,
        validity_hours: request.expiry_hours,
        now: Timestamp::now(),
    };

    let invitation = state.issue_invitation_handler().handle(cmd).await?;

    let link = state.invitation_link(&invitation.token);
    Ok((StatusCode::CREATED, Json(InvitationResponse::new(invitation, link))))
}

/// POST /api/votes/join - Join the teams of an invitation
pub async fn join(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<JoinRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = RedeemInvitationCommand {
        token: request.token,
        user: user.id,
        now: Timestamp::now(),
    };

    let result = state.redeem_invitation_handler().handle(cmd).await?;

    Ok(Json(JoinResponse {
        team_ids: result.team_ids,
        created: result.created.len(),
    }))
}

/// POST /api/votes/register - Create an account through an invitation
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = RegisterAccountCommand {
        form: RegistrationForm {
            first_name: request.first_name,
            last_name: request.last_name,
            username: request.username,
            email: request.email,
            token: request.token,
        },
        now: Timestamp::now(),
    };

    let result = state.register_account_handler().handle(cmd).await?;

    let response = RegisterResponse {
        team_ids: result.memberships.iter().map(|m| m.team_id).collect(),
        user: result.user.into(),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/votes/friends - Users sharing a team with the caller
pub async fn list_friends(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let friends = state.list_friends_handler().handle(user.id).await?;
    let response: Vec<UserResponse> = friends.into_iter().map(Into::into).collect();
    Ok(Json(response))
}

/// POST /api/auth/login - Exchange credentials for a session token
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = LoginCommand {
        username: request.username,
        password: request.password,
        now: Timestamp::now(),
    };

    let result = state.login_handler().handle(cmd).await?;

    Ok(Json(LoginResponse {
        token: result.token,
        is_superuser: result.user.is_superuser,
        user: result.user.into(),
    }))
}

/// POST /api/auth/password - Replace the caller's password
pub async fn change_password(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = ChangePasswordCommand {
        actor: user,
        old_password: request.old_password,
        new_password: request.new_password,
    };

    state.change_password_handler().handle(cmd).await?;

    Ok(StatusCode::NO_CONTENT)
}
