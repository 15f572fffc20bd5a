//! DOM Module - Arena-based element tree
//!
//! Implements the tree model using:
//! - Arena allocation for nodes
//! - NodeId (u32) indices for parent back-references
//! - String interning for element names
//! - Lazily materialized attribute, child and property containers

pub mod document;
pub mod node;
pub mod properties;
pub mod strings;

pub use document::{Document, NodeRef, WILDCARD};
pub use node::NodeId;
pub use properties::PropertyValue;
pub use strings::NamePool;
