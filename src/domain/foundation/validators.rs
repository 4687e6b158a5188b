//! Field-level validators shared by the registration forms.
//!
//! Each validator is an independent function from raw input to either the
//! cleaned value or a single [`ValidationError`]. Pipelines combine them with
//! [`ValidationErrors::check`](super::ValidationErrors::check).

use once_cell::sync::Lazy;
use regex::Regex;

use super::ValidationError;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@([^@\s]+\.[^@\s]+)$").expect("valid email pattern"));

static PHONE_CHARS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9+\-/]+$").expect("valid phone pattern"));

/// Column width of every stored address.
pub const EMAIL_MAX_CHARS: usize = 254;

/// Column width of a stored phone number, `+` included.
pub const PHONE_MAX_CHARS: usize = 20;

static HEX_COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9A-Fa-f]{6}$").expect("valid color pattern"));

/// Trims the value and rejects it when empty.
pub fn required(field: &str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    Ok(trimmed.to_string())
}

/// Rejects values longer than `max` characters.
pub fn max_chars(field: &str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::too_long(field, max));
    }
    Ok(())
}

/// Capitalizes the first letter of every word and lowercases the rest.
///
/// A word starts after any non-alphabetic character, so `"anna-lena o'neil"`
/// becomes `"Anna-Lena O'Neil"`.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_word = false;
    for c in value.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// Required name field, title-cased.
pub fn person_name(field: &str, value: &str) -> Result<String, ValidationError> {
    let value = required(field, value)?;
    max_chars(field, &value, 100)?;
    Ok(title_case(&value))
}

/// Lowercased email whose domain is one of `allowed_domains`.
///
/// An empty allow-list accepts any domain.
pub fn email(field: &str, value: &str, allowed_domains: &[String]) -> Result<String, ValidationError> {
    let value = required(field, value)?.to_lowercase();
    max_chars(field, &value, EMAIL_MAX_CHARS)?;
    let domain = EMAIL_RE
        .captures(&value)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| ValidationError::invalid_format(field, "not an email address"))?;

    if !allowed_domains.is_empty() && !allowed_domains.iter().any(|d| d.eq_ignore_ascii_case(&domain)) {
        return Err(ValidationError::rejected(
            field,
            format!("only addresses of {} are allowed", allowed_domains.join(", ")),
        ));
    }
    Ok(value)
}

/// Normalizes a mobile number to `+<digits>`.
///
/// Spaces are dropped, only digits and `+ - /` are accepted, a leading `00`
/// is read as `+`, and the number must carry a country code.
pub fn phone(field: &str, value: &str) -> Result<String, ValidationError> {
    let compact: String = value.chars().filter(|c| *c != ' ').collect();
    if compact.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    if !PHONE_CHARS_RE.is_match(&compact) {
        return Err(ValidationError::invalid_format(
            field,
            "only digits (0-9) and the symbols + - / are allowed",
        ));
    }

    let with_plus = match compact.strip_prefix("00") {
        Some(rest) => format!("+{}", rest),
        None => compact,
    };
    let Some(rest) = with_plus.strip_prefix('+') else {
        return Err(ValidationError::rejected(
            field,
            "include the country code (e.g. +49 or 0049)",
        ));
    };

    let digits: String = rest.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Err(ValidationError::invalid_format(field, "no digits given"));
    }
    let normalized = format!("+{}", digits);
    max_chars(field, &normalized, PHONE_MAX_CHARS)?;
    Ok(normalized)
}

/// Six hexadecimal digits without a leading `#`, kept as entered.
pub fn hex_color(field: &str, value: &str) -> Result<String, ValidationError> {
    let value = value.trim();
    if !HEX_COLOR_RE.is_match(value) {
        return Err(ValidationError::invalid_format(field, "expected six hex digits"));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domains(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn title_case_handles_words_and_separators() {
        assert_eq!(title_case("max MUSTERMANN"), "Max Mustermann");
        assert_eq!(title_case("anna-lena o'neil"), "Anna-Lena O'Neil");
        assert_eq!(title_case("ÄNNE"), "Änne");
    }

    #[test]
    fn person_name_requires_content() {
        assert!(matches!(
            person_name("first_name", "   "),
            Err(ValidationError::EmptyField { .. })
        ));
        assert_eq!(person_name("first_name", " erika ").unwrap(), "Erika");
    }

    #[test]
    fn email_is_lowercased_and_domain_checked() {
        let allowed = domains(&["st.ovgu.de", "ovgu.de"]);
        assert_eq!(
            email("email", "Max.Muster@ST.OVGU.DE", &allowed).unwrap(),
            "max.muster@st.ovgu.de"
        );
        assert!(matches!(
            email("email", "max@gmail.com", &allowed),
            Err(ValidationError::Rejected { .. })
        ));
        assert!(matches!(
            email("email", "no-at-sign", &allowed),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn email_longer_than_column_is_too_long() {
        let allowed = domains(&["st.ovgu.de"]);
        let long = format!("{}@st.ovgu.de", "a".repeat(300));
        assert!(matches!(
            email("email", &long, &allowed),
            Err(ValidationError::TooLong { .. })
        ));

        let fits = format!("{}@st.ovgu.de", "a".repeat(EMAIL_MAX_CHARS - "@st.ovgu.de".len()));
        assert_eq!(email("email", &fits, &allowed).unwrap().len(), EMAIL_MAX_CHARS);
    }

    #[test]
    fn email_subdomain_does_not_pass_parent_domain() {
        let allowed = domains(&["ovgu.de"]);
        assert!(email("email", "max@st.ovgu.de", &allowed).is_err());
    }

    #[test]
    fn email_without_allow_list_accepts_any_domain() {
        assert!(email("email", "someone@example.org", &[]).is_ok());
    }

    #[test]
    fn phone_normalizes_country_prefix_and_separators() {
        assert_eq!(phone("phone", "0049 171 / 123-45").unwrap(), "+4917112345");
        assert_eq!(phone("phone", "+49 171 12345").unwrap(), "+4917112345");
        assert_eq!(phone("phone", "+49+171").unwrap(), "+49171");
    }

    #[test]
    fn phone_rejects_letters_and_missing_country_code() {
        assert!(matches!(
            phone("phone", "0171 abc"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            phone("phone", "0171 12345"),
            Err(ValidationError::Rejected { .. })
        ));
        assert!(matches!(phone("phone", ""), Err(ValidationError::EmptyField { .. })));
    }

    #[test]
    fn phone_is_bounded_after_normalization() {
        assert_eq!(phone("phone", "0049 12345678901234567").unwrap().len(), 20);
        assert!(matches!(
            phone("phone", "+49 123456789012345678"),
            Err(ValidationError::TooLong { .. })
        ));
        assert!(phone("phone", &format!("+{}", "1".repeat(30))).is_err());
    }

    #[test]
    fn hex_color_accepts_exactly_six_digits() {
        assert_eq!(hex_color("color", "abc123").unwrap(), "abc123");
        assert_eq!(hex_color("color", " 0068B4 ").unwrap(), "0068B4");
        assert!(hex_color("color", "#ABC123").is_err());
        assert!(hex_color("color", "ABC12").is_err());
        assert!(hex_color("color", "GGGGGG").is_err());
    }
}
