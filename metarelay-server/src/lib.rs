//! Metarelay Server
//!
//! Browser-facing HTTP API for the metadata relay.
//!
//! Architecture:
//! - Configuration: flags and environment variables
//! - API: axum routes, JSON error mapping, streaming responses
//! - Service: per-request relay orchestration over `metarelay-client`
//! - State: the shared HTTP connection pool and poll policy
//!
//! No request leaves anything behind: each one builds its own client,
//! relays, and drops it.

pub mod api;
pub mod config;
pub mod service;
pub mod state;
