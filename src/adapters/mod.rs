//! Adapters - Implementations of port interfaces.
//!
//! - `memory` - In-memory repositories for tests and development
//! - `postgres` - PostgreSQL repositories
//! - `auth` - Session tokens, deletion links and password hashing
//! - `email` - SMTP, logging and recording mailers
//! - `http` - axum JSON API

pub mod auth;
pub mod email;
pub mod http;
pub mod memory;
pub mod postgres;
