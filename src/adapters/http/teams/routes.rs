//! Route configuration for teams, invitations and accounts.

use axum::routing::{get, post};
use axum::Router;

use super::super::state::AppState;
use super::handlers::{
    change_password, issue_invitation, join, list_friends, list_invitations, list_teams, login, register,
};

/// Team routes, mounted at `/api/votes` next to the decision routes.
///
/// - `GET /teams` - All teams
/// - `GET /invitations` - Invitations visible to the caller
/// - `POST /invitations` - Issue an invitation
/// - `POST /join` - Redeem an invitation
/// - `POST /register` - Register through an invitation (public)
/// - `GET /friends` - Users sharing a team with the caller
pub fn team_routes() -> Router<AppState> {
    Router::new()
        .route("/teams", get(list_teams))
        .route("/invitations", get(list_invitations).post(issue_invitation))
        .route("/join", post(join))
        .route("/register", post(register))
        .route("/friends", get(list_friends))
}

/// Session routes, mounted at `/api/auth`.
///
/// - `POST /login` - Exchange username and password for a session token
/// - `POST /password` - Change the caller's password
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/password", post(change_password))
}
