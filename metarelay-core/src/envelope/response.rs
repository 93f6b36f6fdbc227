//! Readers for SOAP replies
//!
//! Lookups are namespace-aware: `met:id` and `<id xmlns="...metadata">`
//! are the same element.

use roxmltree::{Document, Node};

use super::{METADATA_NS, SOAPENV_NS};
use crate::domain::job::{JobHandle, JobStatus};
use crate::error::{CoreError, Result};

/// Extract the async job id from `Envelope/Body/<response_element>/result/id`
///
/// The id text is returned exactly as sent, without trimming.
pub fn extract_async_id(body: &str, response_element: &str) -> Result<JobHandle> {
    let doc = Document::parse(body).map_err(|e| CoreError::MalformedXml(e.to_string()))?;
    let result = result_node(&doc, response_element)?;

    let id = child(result, METADATA_NS, "id")
        .ok_or_else(|| CoreError::MissingElement(format!("{response_element}/result/id")))?;

    match id.text() {
        Some(text) if !text.is_empty() => Ok(JobHandle::new(text)),
        _ => Err(CoreError::MissingElement(format!(
            "{response_element}/result/id (empty)"
        ))),
    }
}

/// Read the job status from `Envelope/Body/<response_element>/result/status`
///
/// Falls back to substring markers when the body cannot be parsed or the
/// element is not where it is expected.
pub fn read_status(body: &str, response_element: &str) -> JobStatus {
    let structured = Document::parse(body).ok().and_then(|doc| {
        let result = result_node(&doc, response_element).ok()?;
        let status = child(result, METADATA_NS, "status")?;
        Some(JobStatus::from_label(status.text().unwrap_or_default()))
    });

    structured.unwrap_or_else(|| JobStatus::from_markers(body))
}

fn result_node<'a, 'input>(
    doc: &'a Document<'input>,
    response_element: &str,
) -> Result<Node<'a, 'input>> {
    let envelope = doc.root_element();
    if !envelope.has_tag_name((SOAPENV_NS, "Envelope")) {
        return Err(CoreError::MissingElement("Envelope".to_string()));
    }

    let body = child(envelope, SOAPENV_NS, "Body")
        .ok_or_else(|| CoreError::MissingElement("Envelope/Body".to_string()))?;
    let response = child(body, METADATA_NS, response_element)
        .ok_or_else(|| CoreError::MissingElement(format!("Body/{response_element}")))?;

    child(response, METADATA_NS, "result")
        .ok_or_else(|| CoreError::MissingElement(format!("{response_element}/result")))
}

fn child<'a, 'input>(node: Node<'a, 'input>, ns: &str, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name((ns, name)))
}
