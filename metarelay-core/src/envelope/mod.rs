//! SOAP envelope handling
//!
//! `builder` renders outbound envelopes for the metadata API;
//! `response` reads the few fields the relay needs out of replies.
//! Envelope shape follows the remote contract and must not drift.

mod builder;
mod response;

pub use builder::{DeployOptions, Envelope, Operation};
pub use response::{extract_async_id, read_status};

/// SOAP 1.1 envelope namespace
pub const SOAPENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// Metadata API namespace
pub const METADATA_NS: &str = "http://soap.sforce.com/2006/04/metadata";

/// Escape a text value for inclusion in element content
pub(crate) fn escape_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("plain"), "plain");
        assert_eq!(escape_text("00D!AQ<x>&'\""), "00D!AQ&lt;x&gt;&amp;&apos;&quot;");
    }
}
