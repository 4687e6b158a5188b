//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, validators)
//! - `accounts` - Users of the votes application
//! - `teams` - Teams, invitations, memberships and invitation-based registration
//! - `votes` - Decisions, options, votes and the decision state classifier
//! - `mentoring` - Faculties, programs, mentors, mentees and pseudonyms
//! - `export` - Tabular export of records

pub mod accounts;
pub mod export;
pub mod foundation;
pub mod mentoring;
pub mod teams;
pub mod votes;
