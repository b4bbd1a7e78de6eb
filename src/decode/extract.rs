//! Scalar field extraction
//!
//! Literal tag scanning for the XML shapes and delimiter splitting for the
//! text shape. No document model is built: only the fixed set of scalar
//! fields the record needs is pulled out.

use std::borrow::Cow;

/// Value of the first `<tag>...</tag>` pair, trimmed and unescaped
///
/// The closing tag is searched after the opening one. A missing tag, or an
/// opening tag with no closing tag after it, yields `None`.
pub fn tag_value<'a>(xml: &'a str, tag: &str) -> Option<Cow<'a, str>> {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");

    let start = xml.find(&open)? + open.len();
    let end = start + xml[start..].find(&close)?;
    Some(unescape(xml[start..end].trim()))
}

/// Whether the literal opening tag `<tag>` occurs in the document
pub fn has_tag(xml: &str, tag: &str) -> bool {
    xml.contains(&format!("<{tag}>"))
}

/// Inner content of every complete `<tag>...</tag>` fragment, in order
///
/// An opening tag without a matching close ends the scan.
pub fn tag_fragments<'a>(xml: &'a str, tag: &str) -> Vec<&'a str> {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");

    let mut fragments = Vec::new();
    let mut rest = xml;
    while let Some(pos) = rest.find(&open) {
        let after_open = &rest[pos + open.len()..];
        let Some(end) = after_open.find(&close) else {
            break;
        };
        fragments.push(&after_open[..end]);
        rest = &after_open[end + close.len()..];
    }
    fragments
}

/// Split a line on a delimiter, trimming each field
pub fn split_fields(line: &str, delimiter: char) -> Vec<&str> {
    line.split(delimiter).map(str::trim).collect()
}

/// Replace the predefined XML entities
pub fn unescape(value: &str) -> Cow<'_, str> {
    if !value.contains('&') {
        return Cow::Borrowed(value);
    }

    Cow::Owned(
        value
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&apos;", "'")
            .replace("&amp;", "&"),
    )
}
