//! Teams domain module.
//!
//! Teams, memberships, invitation tokens and the invitation-only account
//! registration pipeline with the rules for changing the mailed password.

mod errors;
mod invitation;
mod membership;
mod password;
mod registration;
mod team;

pub use errors::TeamsError;
pub use invitation::{random_url_safe_token, Invitation, InvitationValidity};
pub use membership::Membership;
pub use password::{validate_new_password, PASSWORD_MAX_CHARS, PASSWORD_MIN_CHARS};
pub use registration::{
    normalized_username, validate_registration, RegistrationForm, ValidRegistration,
};
pub use team::Team;
