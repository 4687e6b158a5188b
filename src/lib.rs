//! FakIng - team voting and mentoring sign-up backend.
//!
//! This crate implements two small applications for the engineering student
//! council: a **votes** system (teams create time-boxed decisions, invited
//! members vote, results are tallied) and a **mentoring** sign-up (mentors
//! register under a pseudonym, mentees pick a mentor).

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
