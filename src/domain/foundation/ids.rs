//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Declares a UUID-backed identifier newtype with the usual conversions.
macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an identifier from an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

uuid_id!(
    /// Unique identifier for a user account.
    UserId
);
uuid_id!(
    /// Unique identifier for a team.
    TeamId
);
uuid_id!(
    /// Unique identifier for an invitation.
    InvitationId
);
uuid_id!(
    /// Unique identifier for a decision.
    DecisionId
);
uuid_id!(
    /// Unique identifier for an option of a decision.
    OptionId
);
uuid_id!(
    /// Unique identifier for a cast vote.
    VoteId
);
uuid_id!(
    /// Unique identifier for a faculty.
    FacultyId
);
uuid_id!(
    /// Unique identifier for a study program.
    ProgramId
);
uuid_id!(
    /// Unique identifier for a registered mentor.
    MentorId
);
uuid_id!(
    /// Unique identifier for a registered mentee.
    MenteeId
);
