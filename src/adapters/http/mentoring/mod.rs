//! HTTP adapter for the mentoring sign-up.
//!
//! - `GET /api/mentoring/faculties`
//! - `GET /api/mentoring/faculties/:slug/programs`
//! - `GET /api/mentoring/faculties/:slug/mentors`
//! - `POST /api/mentoring/faculties/:slug/mentors`
//! - `POST /api/mentoring/faculties/:slug/mentees`
//! - `POST /api/mentoring/mentors/delete`

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::mentoring_routes;
