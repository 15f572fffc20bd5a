//! Attribute Parsing
//!
//! Parses the attribute list of a start tag.

use super::entities::decode_text;
use super::scanner::{is_name_char, is_name_start_char, is_whitespace};
use std::borrow::Cow;

/// A parsed attribute
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute<'a> {
    /// Qualified attribute name, prefix retained
    pub name: &'a str,
    /// Attribute value (entities decoded)
    pub value: Cow<'a, str>,
}

impl<'a> Attribute<'a> {
    /// Create a new attribute
    pub fn new(name: &'a str, value: Cow<'a, str>) -> Self {
        Attribute { name, value }
    }
}

/// Parse attributes from raw tag content (after the element name)
///
/// Input should be the content between element name and '>' or '/>'.
/// Returns the byte offset (relative to `input`) of the first malformed
/// attribute on failure.
pub fn parse_attributes(input: &str) -> Result<Vec<Attribute<'_>>, (&'static str, usize)> {
    let bytes = input.as_bytes();
    let mut attrs = Vec::new();
    let mut pos = 0;

    loop {
        while pos < bytes.len() && is_whitespace(bytes[pos]) {
            pos += 1;
        }

        if pos >= bytes.len() {
            break;
        }

        if !is_name_start_char(bytes[pos]) {
            return Err(("attribute name must start with letter, underscore, or colon", pos));
        }

        let name_start = pos;
        while pos < bytes.len() && is_name_char(bytes[pos]) {
            pos += 1;
        }
        let name = &input[name_start..pos];

        // Skip whitespace around '='
        while pos < bytes.len() && is_whitespace(bytes[pos]) {
            pos += 1;
        }
        if bytes.get(pos) != Some(&b'=') {
            return Err(("attribute value required", pos));
        }
        pos += 1;
        while pos < bytes.len() && is_whitespace(bytes[pos]) {
            pos += 1;
        }

        let quote = match bytes.get(pos) {
            Some(&q @ (b'"' | b'\'')) => q,
            _ => return Err(("attribute value must be quoted", pos)),
        };
        pos += 1;

        let value_start = pos;
        match memchr::memchr(quote, &bytes[pos..]) {
            Some(len) => pos += len,
            None => return Err(("attribute value has mismatched quotes", value_start)),
        }

        attrs.push(Attribute::new(name, decode_text(&input[value_start..pos])));
        pos += 1; // Skip closing quote
    }

    Ok(attrs)
}
