//! Markup Reader Module
//!
//! - SliceReader: zero-copy pull reader over a UTF-8 string slice
//! - Events: event types for pull parsing
//! - Buffered: drains `Read` sources into memory for the slice reader

pub mod buffered;
pub mod events;
pub mod slice;

pub use buffered::{decode_utf8, read_to_string};
pub use events::{EndElement, StartElement, XmlEvent};
pub use slice::{parse_events, SliceReader};
