//! Metarelay Core
//!
//! Core types and abstractions for the metadata relay.
//!
//! This crate contains:
//! - Domain types: job handles, job statuses and caller sessions
//! - DTOs: JSON bodies exchanged with the browser frontend
//! - Envelope: SOAP request templating and response readers
//!
//! Nothing in here performs I/O; the relay itself lives in `metarelay-client`.

pub mod domain;
pub mod dto;
pub mod envelope;
pub mod error;

pub use error::{CoreError, Result};
