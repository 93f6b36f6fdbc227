//! Core domain types
//!
//! Everything here lives for the duration of a single caller request.
//! Nothing is persisted and nothing is shared between requests.

pub mod job;
pub mod session;
