//! Core markup primitives
//!
//! - Scanner: SIMD-accelerated delimiter detection using memchr
//! - Entities: entity decoding with Cow (zero-copy when possible) and output escaping
//! - Attributes: attribute list parsing inside a start tag

pub mod attributes;
pub mod entities;
pub mod scanner;
