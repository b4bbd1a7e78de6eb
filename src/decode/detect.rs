//! Response format detection
//!
//! The upstream service does not reliably advertise its content type, so
//! the format is sniffed from the body itself. Rules are checked in order
//! and the first match wins; a body no rule claims is treated as legacy
//! delimited text.

use super::types::ResponseFormat;
use crate::error::{Error, Result};
use serde_json::Value;

/// One detection rule
struct Rule {
    name: &'static str,
    format: ResponseFormat,
    matches: fn(&str) -> bool,
}

/// Detection rules in priority order, applied to the trimmed body
const RULES: &[Rule] = &[
    Rule {
        name: "xml-declaration",
        format: ResponseFormat::Xml,
        matches: starts_with_xml_declaration,
    },
    Rule {
        name: "response-element",
        format: ResponseFormat::Xml,
        matches: starts_with_response_element,
    },
    Rule {
        name: "service-response-element",
        format: ResponseFormat::Xml,
        matches: contains_service_response,
    },
    Rule {
        name: "message-header-element",
        format: ResponseFormat::Xml,
        matches: contains_message_header,
    },
    Rule {
        name: "json-object",
        format: ResponseFormat::Json,
        matches: is_json_object,
    },
];

fn starts_with_xml_declaration(body: &str) -> bool {
    body.starts_with("<?xml")
}

fn starts_with_response_element(body: &str) -> bool {
    body.starts_with("<response")
}

fn contains_service_response(body: &str) -> bool {
    body.contains("<OpenAPI_ServiceResponse>")
}

fn contains_message_header(body: &str) -> bool {
    body.contains("<cmmMsgHeader>")
}

fn is_json_object(body: &str) -> bool {
    body.starts_with('{') && matches!(serde_json::from_str::<Value>(body), Ok(Value::Object(_)))
}

/// Classify a raw response body
///
/// Any JSON object is classified as JSON, even without a `response` root;
/// the JSON envelope decoder rejects it then. Empty or whitespace-only
/// bodies are malformed.
pub fn detect_format(body: &str) -> Result<ResponseFormat> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(Error::malformed("response body is empty"));
    }

    let format = RULES
        .iter()
        .find(|rule| (rule.matches)(trimmed))
        .map_or(ResponseFormat::DelimitedText, |rule| {
            tracing::debug!("Format rule '{}' matched", rule.name);
            rule.format
        });

    Ok(format)
}
