//! Accounts of the votes application.

mod user;

pub use user::User;
