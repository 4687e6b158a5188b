//! Team entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{TeamId, Timestamp};

/// A group of users, e.g. a council or a committee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub slug: String,
    pub created_at: Timestamp,
}

impl Team {
    /// Creates a team, deriving the slug from the name.
    pub fn new(name: impl Into<String>, now: Timestamp) -> Self {
        let name = name.into();
        let slug = slugify(&name);
        Self {
            id: TeamId::new(),
            name,
            slug,
            created_at: now,
        }
    }
}

/// Lowercase ASCII alphanumerics separated by single hyphens.
fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_is_derived_from_name() {
        let team = Team::new("Fachschaftsrat  Informatik!", Timestamp::now());
        assert_eq!(team.slug, "fachschaftsrat-informatik");
    }

    #[test]
    fn slug_drops_leading_separators() {
        assert_eq!(slugify("--FaRa 2024"), "fara-2024");
    }
}
