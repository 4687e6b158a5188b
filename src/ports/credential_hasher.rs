//! Password hashing port.

use crate::domain::foundation::DomainError;

pub trait CredentialHasher: Send + Sync {
    /// Hashes a password into a self-describing PHC string.
    fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Checks a password against a stored hash. Unparseable hashes never match.
    fn verify(&self, password: &str, hash: &str) -> bool;
}
