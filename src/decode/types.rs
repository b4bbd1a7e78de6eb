//! Decoder types and traits
//!
//! Defines the response formats and the envelope decoder abstraction.

use super::envelope::{JsonEnvelopeDecoder, TextEnvelopeDecoder, XmlEnvelopeDecoder};
use crate::error::Result;
use crate::types::ResponseEnvelope;
use serde::Serialize;
use std::fmt;

/// Wire format of a response body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormat {
    /// Structured JSON with a `response` root
    Json,
    /// Structured XML, either the current `<response>` shape or the legacy
    /// `<OpenAPI_ServiceResponse>` error shape
    Xml,
    /// Legacy tab-separated lines, one record per line
    DelimitedText,
}

impl ResponseFormat {
    /// Envelope decoder for this format
    pub fn decoder(self) -> &'static dyn EnvelopeDecoder {
        match self {
            ResponseFormat::Json => &JsonEnvelopeDecoder,
            ResponseFormat::Xml => &XmlEnvelopeDecoder,
            ResponseFormat::DelimitedText => &TextEnvelopeDecoder,
        }
    }
}

impl fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResponseFormat::Json => "json",
            ResponseFormat::Xml => "xml",
            ResponseFormat::DelimitedText => "delimited-text",
        };
        f.write_str(name)
    }
}

/// Trait for decoding a response body into the common envelope
pub trait EnvelopeDecoder: Send + Sync {
    /// Decode the full response body
    fn decode(&self, body: &str) -> Result<ResponseEnvelope>;
}

/// A decoded response together with the format it was detected as
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedResponse {
    pub format: ResponseFormat,
    pub envelope: ResponseEnvelope,
}
