//! Rules for passwords chosen by the user.

use crate::domain::foundation::{validators, ValidationError, ValidationErrors};

pub const PASSWORD_MIN_CHARS: usize = 8;
pub const PASSWORD_MAX_CHARS: usize = 128;

/// Checks a new password against the length and composition rules.
/// It must also differ from the current one.
pub fn validate_new_password(current: &str, new: &str) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    errors.check(new_password(current, new));
    errors.into_result()
}

fn new_password(current: &str, new: &str) -> Result<(), ValidationError> {
    const FIELD: &str = "new_password";

    if new.is_empty() {
        return Err(ValidationError::empty_field(FIELD));
    }
    validators::max_chars(FIELD, new, PASSWORD_MAX_CHARS)?;
    if new.chars().count() < PASSWORD_MIN_CHARS {
        return Err(ValidationError::rejected(
            FIELD,
            format!("at least {} characters", PASSWORD_MIN_CHARS),
        ));
    }
    if new.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::rejected(FIELD, "must not consist of digits only"));
    }
    if new == current {
        return Err(ValidationError::rejected(FIELD, "must differ from the current password"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejects(new: &str) -> bool {
        validate_new_password("temporär", new).is_err()
    }

    #[test]
    fn acceptable_password_passes() {
        assert!(validate_new_password("temporär", "korrekt pferd batterie").is_ok());
    }

    #[test]
    fn short_numeric_and_unchanged_passwords_are_rejected() {
        assert!(rejects(""));
        assert!(rejects("kurz"));
        assert!(rejects("1234567890"));
        assert!(rejects("temporär"));
        assert!(rejects(&"x".repeat(PASSWORD_MAX_CHARS + 1)));
    }

    #[test]
    fn failures_name_the_new_password_field() {
        let errors = validate_new_password("alt", "kurz").unwrap_err();
        assert!(errors.has_field("new_password"));
        assert_eq!(errors.len(), 1);
    }
}
