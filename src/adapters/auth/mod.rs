//! Authentication adapters.
//!
//! - `jwt` - HS256 session tokens and signed deletion links
//! - `password` - Argon2 credential hashing
//! - `mock` - Session validator for tests that don't need signed tokens

mod jwt;
mod mock;
mod password;

pub use jwt::{JwtSessions, JwtTokenSigner, SessionClaims};
pub use mock::MockSessionValidator;
pub use password::Argon2Hasher;
