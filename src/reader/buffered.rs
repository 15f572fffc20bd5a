//! Whole-Stream Input
//!
//! Drains any `Read` source into memory and validates it as UTF-8 so the
//! slice reader can borrow from it.

use crate::error::{Result, XenError};
use std::io::Read;

/// Initial buffer size for reading a stream
const DEFAULT_BUFFER_SIZE: usize = 8192;

/// Validate raw input bytes as UTF-8
///
/// A leading byte-order mark is skipped. Invalid input is reported as a parse
/// error at the first bad byte.
pub fn decode_utf8(bytes: &[u8]) -> Result<&str> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    std::str::from_utf8(bytes)
        .map_err(|e| XenError::parse("input is not valid UTF-8", e.valid_up_to()))
}

/// Read a stream to its end and return it as a UTF-8 string
pub fn read_to_string<R: Read>(mut reader: R) -> Result<String> {
    let mut buffer = Vec::with_capacity(DEFAULT_BUFFER_SIZE);
    reader.read_to_end(&mut buffer)?;
    if buffer.starts_with(b"\xEF\xBB\xBF") {
        buffer.drain(..3);
    }
    String::from_utf8(buffer)
        .map_err(|e| XenError::parse("input is not valid UTF-8", e.utf8_error().valid_up_to()))
}
