//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `UserRepository`, `TeamRepository`, `MembershipRepository`,
//!   `InvitationRepository` - accounts and teams
//! - `DecisionRepository`, `VoteLedger` - decisions and votes
//! - `FacultyRepository`, `MentorRepository`, `MenteeRepository` - mentoring
//!
//! ## Service Ports
//!
//! - `Mailer` - Fire-and-forget outbound mail
//! - `TokenSigner` - Signed deletion links
//! - `SessionValidator` / `SessionIssuer` - Bearer session tokens
//! - `CredentialHasher` - Password hashing

mod credential_hasher;
mod decision_repository;
mod faculty_repository;
mod invitation_repository;
mod mailer;
mod membership_repository;
mod mentee_repository;
mod mentor_repository;
mod session_validator;
mod team_repository;
mod token_signer;
mod user_repository;
mod vote_ledger;

pub use credential_hasher::CredentialHasher;
pub use decision_repository::DecisionRepository;
pub use faculty_repository::FacultyRepository;
pub use invitation_repository::InvitationRepository;
pub use mailer::{MailMessage, Mailer};
pub use membership_repository::MembershipRepository;
pub use mentee_repository::MenteeRepository;
pub use mentor_repository::MentorRepository;
pub use session_validator::{SessionIssuer, SessionValidator};
pub use team_repository::TeamRepository;
pub use token_signer::{TokenError, TokenSigner};
pub use user_repository::UserRepository;
pub use vote_ledger::VoteLedger;
