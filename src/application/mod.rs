//! Application layer - Commands, Queries, and Handlers.
//!
//! Handlers orchestrate domain operations over the ports. Commands carry the
//! acting user and the request time explicitly.

pub mod handlers;
