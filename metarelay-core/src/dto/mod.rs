//! Data Transfer Objects for the browser-facing API
//!
//! JSON bodies and query strings accepted from the frontend. Field names
//! are camelCase on the wire to match what the frontend sends.

pub mod deploy;
pub mod retrieve;
pub mod status;

pub(crate) fn default_api_version() -> String {
    crate::domain::session::DEFAULT_API_VERSION.to_string()
}
