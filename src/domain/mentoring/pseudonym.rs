//! Mentor nickname generation.
//!
//! A nickname is three letters drawn with replacement from the first name
//! followed by three drawn from the last name, all uppercase. Draws repeat
//! until the nickname is unused, up to a fixed number of attempts.

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

use super::MentoringError;
use crate::domain::foundation::{ValidationError, ValidationErrors};

/// Letters drawn from each name part.
pub const PSEUDONYM_PART_LEN: usize = 3;

/// Upper bound on redraws before giving up.
pub const MAX_PSEUDONYM_ATTEMPTS: usize = 10_000;

fn letter_pool(name: &str) -> Vec<char> {
    name.chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_uppercase)
        .collect()
}

fn draw<R: Rng + ?Sized>(pool: &[char], rng: &mut R, out: &mut String) {
    for _ in 0..PSEUDONYM_PART_LEN {
        if let Some(c) = pool.choose(rng) {
            out.push(*c);
        }
    }
}

/// Draws a nickname not contained in `existing`.
///
/// # Errors
///
/// - `Validation` if a name has no alphabetic characters
/// - `PseudonymSpaceExhausted` if every attempt collided
pub fn generate_unique_pseudonym<R: Rng + ?Sized>(
    first_name: &str,
    last_name: &str,
    existing: &HashSet<String>,
    rng: &mut R,
) -> Result<String, MentoringError> {
    let first = letter_pool(first_name);
    let last = letter_pool(last_name);

    let mut errors = ValidationErrors::new();
    if first.is_empty() {
        errors.push(ValidationError::invalid_format("first_name", "contains no letters"));
    }
    if last.is_empty() {
        errors.push(ValidationError::invalid_format("last_name", "contains no letters"));
    }
    errors.into_result()?;

    for _ in 0..MAX_PSEUDONYM_ATTEMPTS {
        let mut nickname = String::with_capacity(PSEUDONYM_PART_LEN * 2);
        draw(&first, rng, &mut nickname);
        draw(&last, rng, &mut nickname);
        if !existing.contains(&nickname) {
            return Ok(nickname);
        }
    }

    Err(MentoringError::PseudonymSpaceExhausted {
        attempts: MAX_PSEUDONYM_ATTEMPTS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn nickname_uses_letters_of_both_names() {
        let nickname = generate_unique_pseudonym("Erika", "Musterfrau", &HashSet::new(), &mut rng()).unwrap();

        assert_eq!(nickname.chars().count(), 6);
        assert!(nickname[..3].chars().all(|c| "ERIKA".contains(c)));
        assert!(nickname[3..].chars().all(|c| "MUSTERFAU".contains(c)));
    }

    #[test]
    fn one_letter_names_repeat_the_letter() {
        let nickname = generate_unique_pseudonym("a", "b", &HashSet::new(), &mut rng()).unwrap();
        assert_eq!(nickname, "AAABBB");
    }

    #[test]
    fn non_letters_are_ignored() {
        let nickname = generate_unique_pseudonym("J.", "O'-", &HashSet::new(), &mut rng()).unwrap();
        assert_eq!(nickname, "JJJOOO");
    }

    #[test]
    fn identical_names_get_distinct_nicknames() {
        let mut rng = rng();
        let mut existing = HashSet::new();
        for _ in 0..20 {
            let nickname = generate_unique_pseudonym("Max", "Mustermann", &existing, &mut rng).unwrap();
            assert!(existing.insert(nickname));
        }
    }

    #[test]
    fn exhausted_space_is_reported() {
        let existing: HashSet<String> = ["AAABBB".to_string()].into_iter().collect();
        let result = generate_unique_pseudonym("A", "B", &existing, &mut rng());
        assert_eq!(
            result,
            Err(MentoringError::PseudonymSpaceExhausted {
                attempts: MAX_PSEUDONYM_ATTEMPTS
            })
        );
    }

    #[test]
    fn names_without_letters_are_rejected() {
        let result = generate_unique_pseudonym("123", "Mustermann", &HashSet::new(), &mut rng());
        assert!(matches!(result, Err(MentoringError::Validation(e)) if e.has_field("first_name")));
    }
}
