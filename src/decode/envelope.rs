//! Envelope decoder implementations
//!
//! Each decoder handles one wire format and produces the common
//! [`ResponseEnvelope`]. Items are decoded best-effort: a malformed item is
//! skipped and the rest of the response is still returned.

use super::detect::detect_format;
use super::extract::{has_tag, split_fields, tag_fragments, tag_value};
use super::item::{decode_item, RawItem};
use super::types::{DecodedResponse, EnvelopeDecoder};
use crate::error::{Error, Result};
use crate::result_code::ResultCode;
use crate::types::{Body, Header, RentalRecord, ResponseEnvelope};
use serde_json::Value;
use tracing::debug;

/// Result code synthesized for a success without a native code
pub const SUCCESS_CODE: &str = "000";

/// Result code synthesized for a failure without a native code
pub const GENERIC_ERROR_CODE: &str = "ERROR";

/// Detect the format of a body and decode it
pub fn parse_response(body: &str) -> Result<DecodedResponse> {
    let body = body.trim_start_matches('\u{feff}');
    let format = detect_format(body)?;
    debug!("Detected {} response ({} bytes)", format, body.len());

    let envelope = format.decoder().decode(body)?;
    debug!(
        "Decoded envelope: code={}, items={}",
        envelope.header.result_code,
        envelope.body.items.len()
    );

    Ok(DecodedResponse { format, envelope })
}

// ============================================================================
// JSON Envelope
// ============================================================================

/// Decoder for `{"response": {"header": ..., "body": ...}}`
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEnvelopeDecoder;

impl EnvelopeDecoder for JsonEnvelopeDecoder {
    fn decode(&self, body: &str) -> Result<ResponseEnvelope> {
        let root: Value = serde_json::from_str(body)
            .map_err(|e| Error::malformed(format!("Failed to parse JSON: {e}")))?;

        let response = root
            .get("response")
            .filter(|v| v.is_object())
            .ok_or_else(|| Error::malformed("response has no 'response' node"))?;

        let header = response
            .get("header")
            .filter(|v| v.is_object())
            .ok_or_else(|| Error::malformed("response has no 'header' node"))?;

        let header = Header {
            result_code: header.get("resultCode").and_then(json_text).unwrap_or_default(),
            result_msg: header.get("resultMsg").and_then(json_text).unwrap_or_default(),
        };

        let body = match response.get("body") {
            Some(node) => json_body(node),
            None => Body::default(),
        };

        Ok(ResponseEnvelope { header, body })
    }
}

fn json_body(node: &Value) -> Body {
    let items = match node.get("items").and_then(|items| items.get("item")) {
        Some(Value::Array(nodes)) => nodes.iter().filter_map(json_item).collect(),
        Some(single) => json_item(single).into_iter().collect(),
        // "items" may be absent, null or an empty string when nothing matched
        None => Vec::new(),
    };

    Body {
        items,
        page_no: node.get("pageNo").and_then(json_u32).unwrap_or(0),
        num_of_rows: node.get("numOfRows").and_then(json_u32).unwrap_or(0),
        total_count: node.get("totalCount").and_then(json_u32).unwrap_or(0),
    }
}

fn json_item(node: &Value) -> Option<RentalRecord> {
    let record = decode_item(RawItem::Json(node));
    if record.is_none() {
        debug!("Skipping non-object JSON item");
    }
    record
}

fn json_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn json_u32(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

// ============================================================================
// XML Envelope
// ============================================================================

/// Decoder for XML bodies
///
/// Handles both the legacy `<OpenAPI_ServiceResponse><cmmMsgHeader>` error
/// shape and the `<response><header>` shape. Paging metadata is not read:
/// the envelope is always a single page holding every decoded item.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlEnvelopeDecoder;

impl EnvelopeDecoder for XmlEnvelopeDecoder {
    fn decode(&self, body: &str) -> Result<ResponseEnvelope> {
        let header = xml_header(body);

        let items = if has_tag(body, "items") || has_tag(body, "item") {
            tag_fragments(body, "item")
                .into_iter()
                .filter_map(|fragment| decode_item(RawItem::Xml(fragment)))
                .collect()
        } else {
            text_items(body)
        };

        Ok(ResponseEnvelope {
            header,
            body: Body::single_page(items),
        })
    }
}

fn xml_header(body: &str) -> Header {
    if let Some(err_msg) = tag_value(body, "errMsg") {
        let auth_msg = tag_value(body, "returnAuthMsg");
        let reason_code = tag_value(body, "returnReasonCode");
        debug!(
            "Legacy XML header: errMsg={}, returnAuthMsg={:?}, returnReasonCode={:?}",
            err_msg, auth_msg, reason_code
        );

        let err_msg = err_msg.into_owned();
        let normalized = err_msg.trim_end_matches('.');
        if normalized == "OK" || normalized == "NORMAL SERVICE" {
            return Header::new(SUCCESS_CODE, err_msg);
        }

        // A documented failure code in returnReasonCode refines the generic
        // sentinel; it never turns a failure into a success.
        let code = reason_code
            .as_deref()
            .and_then(ResultCode::lookup)
            .filter(|code| !code.is_success())
            .map_or(GENERIC_ERROR_CODE, ResultCode::code);
        return Header::new(code, err_msg);
    }

    if let Some(result_code) = tag_value(body, "resultCode") {
        let result_msg = tag_value(body, "resultMsg").unwrap_or_default();
        return Header::new(result_code, result_msg);
    }

    Header::new(GENERIC_ERROR_CODE, "response carries no result header")
}

// ============================================================================
// Delimited-Text Envelope
// ============================================================================

/// Decoder for legacy tab-separated bodies
///
/// An optional leading status line (a bare numeric code such as `000`,
/// optionally followed by a message) becomes the header. Without one, a
/// body that yields at least one record is a success, and a body that
/// yields none is malformed.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextEnvelopeDecoder;

impl EnvelopeDecoder for TextEnvelopeDecoder {
    fn decode(&self, body: &str) -> Result<ResponseEnvelope> {
        let status = status_line(body);
        let items = text_items(body);

        let header = match status {
            Some(header) => header,
            None if !items.is_empty() => Header::new(SUCCESS_CODE, "OK"),
            None => return Err(Error::malformed("response body is in no recognized format")),
        };

        Ok(ResponseEnvelope {
            header,
            body: Body::single_page(items),
        })
    }
}

fn status_line(body: &str) -> Option<Header> {
    let first = body.lines().map(str::trim).find(|l| !l.is_empty())?;
    if first.contains('\t') {
        return None;
    }

    let (code, message) = first.split_once(char::is_whitespace).unwrap_or((first, ""));
    if code.is_empty() || !code.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let message = match message.trim() {
        "" => ResultCode::lookup(code).map_or("", ResultCode::message),
        text => text,
    };
    Some(Header::new(code, message))
}

/// Records from every data line; blank lines, markup lines and status
/// lines starting with `000` are skipped, as are lines too short to decode
fn text_items(body: &str) -> Vec<RentalRecord> {
    let mut items = Vec::new();
    for line in body.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('<') || line.starts_with(SUCCESS_CODE) {
            continue;
        }

        let fields = split_fields(line, '\t');
        match decode_item(RawItem::Text(&fields)) {
            Some(record) => items.push(record),
            None => debug!("Skipping text line with {} fields", fields.len()),
        }
    }
    items
}
