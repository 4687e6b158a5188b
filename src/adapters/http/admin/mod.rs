//! HTTP adapter for superuser exports.
//!
//! - `GET /api/admin/export/:kind` - `mentors`, `mentees`, `memberships` or `results`

pub mod handlers;
pub mod routes;

pub use routes::admin_routes;
