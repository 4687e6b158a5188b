//! In-memory adapters.
//!
//! `InMemoryStore` implements every repository port over one shared state
//! behind a single lock, so check-and-write sequences such as vote
//! recording are serialized the same way the database transaction does.
//! Useful for testing and development.

mod store;

pub use store::InMemoryStore;
