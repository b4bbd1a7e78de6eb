//! Item decoding
//!
//! Turns one record-shaped fragment of any wire format into a
//! [`RentalRecord`]. Missing or short fields never fail: the record is
//! populated as far as the fragment allows.

use super::extract::tag_value;
use crate::types::{RentalRecord, RECORD_FIELDS};
use serde_json::Value;

/// Minimum number of fields a delimited-text line needs
pub const MIN_TEXT_FIELDS: usize = 9;

/// One raw record, tagged by the format it came from
#[derive(Debug, Clone, Copy)]
pub enum RawItem<'a> {
    /// A JSON `item` node
    Json(&'a Value),
    /// Inner content of an XML `<item>` element
    Xml(&'a str),
    /// Fields of one delimited-text line
    Text(&'a [&'a str]),
}

/// Decode one raw record
///
/// Returns `None` when the fragment is not record-shaped at all: a JSON
/// node that is not an object, or a text line with too few fields.
pub fn decode_item(raw: RawItem<'_>) -> Option<RentalRecord> {
    match raw {
        RawItem::Json(node) => decode_json_item(node),
        RawItem::Xml(fragment) => Some(decode_xml_item(fragment)),
        RawItem::Text(fields) => decode_text_item(fields),
    }
}

fn decode_json_item(node: &Value) -> Option<RentalRecord> {
    let object = node.as_object()?;
    let mut record = RentalRecord::default();
    for name in RECORD_FIELDS {
        if let Some(slot) = record.field_mut(name) {
            *slot = object.get(name).and_then(json_scalar);
        }
    }
    Some(record)
}

fn decode_xml_item(fragment: &str) -> RentalRecord {
    let mut record = RentalRecord::default();
    for name in RECORD_FIELDS {
        if let Some(slot) = record.field_mut(name) {
            *slot = tag_value(fragment, name).and_then(|v| non_empty(&v));
        }
    }
    record
}

/// Positional layout: name, build year, contract date (YYYYMMDD), monthly
/// rent, exclusive area, floor, lot number, legal-dong, region code
fn decode_text_item(fields: &[&str]) -> Option<RentalRecord> {
    if fields.len() < MIN_TEXT_FIELDS {
        return None;
    }

    let contract_date = fields[2];
    let date_part = |range: std::ops::Range<usize>| {
        if contract_date.len() >= 8 {
            contract_date.get(range).and_then(non_empty)
        } else {
            None
        }
    };

    Some(RentalRecord {
        apartment_name: non_empty(fields[0]),
        build_year: non_empty(fields[1]),
        deal_year: date_part(0..4),
        deal_month: date_part(4..6),
        deal_day: date_part(6..8),
        monthly_rent: non_empty(fields[3]),
        exclusive_area: non_empty(fields[4]),
        floor: non_empty(fields[5]),
        lot_number: non_empty(fields[6]),
        legal_dong: non_empty(fields[7]),
        region_code: non_empty(fields[8]),
        ..Default::default()
    })
}

/// Scalar JSON value as text; objects, arrays and null are absent
fn json_scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => non_empty(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
