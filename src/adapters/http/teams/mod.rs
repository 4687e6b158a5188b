//! HTTP adapter for teams, invitations and accounts.
//!
//! - `GET /api/votes/teams` - All teams
//! - `GET /api/votes/invitations` - Visible invitations
//! - `POST /api/votes/invitations` - Issue an invitation
//! - `POST /api/votes/join` - Redeem an invitation
//! - `POST /api/votes/register` - Register an account
//! - `GET /api/votes/friends` - Teammates of the caller
//! - `POST /api/auth/login` - Log in

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::{auth_routes, team_routes};
