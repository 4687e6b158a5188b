//! Invitation-only account registration.
//!
//! The pipeline validates every field independently and collects the
//! failures. An expired invitation is reported separately, once the form
//! itself is valid.

use super::{Invitation, TeamsError};
use crate::domain::foundation::{validators, Timestamp, ValidationError, ValidationErrors};

const USERNAME_MAX_LEN: usize = 150;

/// Raw registration input.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub token: Option<String>,
}

/// Cleaned registration data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRegistration {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
}

fn username(value: &str) -> Result<String, ValidationError> {
    let value = validators::required("username", value)?.to_lowercase();
    validators::max_chars("username", &value, USERNAME_MAX_LEN)?;
    if !value
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '.' | '_' | '-' | '@' | '+'))
    {
        return Err(ValidationError::invalid_format(
            "username",
            "letters, digits and . _ - @ + only",
        ));
    }
    Ok(value)
}

/// Validates a registration against the looked-up invitation.
///
/// `invitation` is the result of looking up `form.token`; `username_taken`
/// tells whether the lowercased username already exists.
pub fn validate_registration(
    form: &RegistrationForm,
    invitation: Option<&Invitation>,
    username_taken: bool,
    allowed_email_domain: &str,
    now: Timestamp,
) -> Result<ValidRegistration, TeamsError> {
    let mut errors = ValidationErrors::new();

    let token = form.token.as_deref().map(str::trim).unwrap_or_default();
    if token.is_empty() {
        errors.push(ValidationError::rejected(
            "token",
            "registration requires an invitation",
        ));
    } else if invitation.is_none() {
        errors.push(ValidationError::rejected("token", "the invitation is invalid"));
    }

    let first_name = errors.check(validators::person_name("first_name", &form.first_name));
    let last_name = errors.check(validators::person_name("last_name", &form.last_name));
    let username = errors.check(username(&form.username).and_then(|u| {
        if username_taken {
            Err(ValidationError::rejected("username", "this username is already taken"))
        } else {
            Ok(u)
        }
    }));
    let email = errors.check(validators::email(
        "email",
        &form.email,
        &[allowed_email_domain.to_string()],
    ));

    errors.into_result()?;

    if let Some(invitation) = invitation {
        invitation.check_redeemable(now)?;
    }

    match (first_name, last_name, username, email) {
        (Some(first_name), Some(last_name), Some(username), Some(email)) => Ok(ValidRegistration {
            first_name,
            last_name,
            username,
            email,
        }),
        _ => Err(TeamsError::Infrastructure(
            "validation passed without cleaned values".to_string(),
        )),
    }
}

/// Lowercased username as stored, for the uniqueness lookup.
pub fn normalized_username(value: &str) -> String {
    value.trim().to_lowercase()
}
