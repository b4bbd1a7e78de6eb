//! Response decoder module
//!
//! Supports: JSON, XML, tab-delimited text
//!
//! # Overview
//!
//! The upstream service answers in whichever of three formats its backend
//! happens to produce, regardless of the declared content type. Decoding
//! runs in three steps:
//!
//! 1. [`detect_format`] sniffs the body against a prioritized rule list.
//! 2. The [`EnvelopeDecoder`] for that [`ResponseFormat`] builds the common
//!    envelope (header plus paged item list).
//! 3. Items are decoded one at a time by [`decode_item`], using the scalar
//!    extractors in [`extract`].

mod detect;
mod envelope;
pub mod extract;
mod item;
mod types;

pub use detect::detect_format;
pub use envelope::{
    parse_response, JsonEnvelopeDecoder, TextEnvelopeDecoder, XmlEnvelopeDecoder,
    GENERIC_ERROR_CODE, SUCCESS_CODE,
};
pub use item::{decode_item, RawItem, MIN_TEXT_FIELDS};
pub use types::{DecodedResponse, EnvelopeDecoder, ResponseFormat};
