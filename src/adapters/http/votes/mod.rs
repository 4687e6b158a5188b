//! HTTP adapter for decisions and votes.
//!
//! - `GET /api/votes/decisions` - Open decisions for the caller
//! - `POST /api/votes/decisions` - Create a decision
//! - `GET /api/votes/decisions/owned` - Own decisions
//! - `GET /api/votes/decisions/closed` - Closed decisions
//! - `GET /api/votes/decisions/:id` - Decision detail
//! - `POST /api/votes/decisions/:id/vote` - Cast a vote
//! - `GET /api/votes/decisions/:id/results` - Results

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::decision_routes;
