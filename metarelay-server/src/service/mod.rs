//! Service Module
//!
//! Business logic layer for the relay server.
//! Services validate caller input and drive the relay client; handlers
//! only translate between HTTP and these functions.

pub mod proxy;

// Re-export for convenience
pub use proxy as proxy_service;
