//! Xenpath - Element trees with an XPath-like query language
//!
//! Layers:
//! A: Zero-copy slice reader (reader)
//! B: Event-driven tree building (sax)
//! C: Arena element tree with ancestor-scoped properties (dom)
//! D: Slash/dot path compiler and evaluator (xpath)
//! E: Cached and parallel path evaluation (xpath::cache, xpath::parallel)
//! F: Visitor traversal and markup writer (export)
//!
//! ```
//! use xenpath::Document;
//!
//! let doc = Document::parse_str(r#"<r><a x="1">one</a><a x="2">two</a></r>"#)?;
//! let root = doc.root();
//! assert_eq!(root.one_text("a[2]")?, "two");
//! assert_eq!(root.one_text(".a[0]")?, "one");
//! assert_eq!(root.all_attr("a/@x")?, ["1", "2"]);
//! # Ok::<(), xenpath::XenError>(())
//! ```

pub mod core;
pub mod dom;
pub mod error;
pub mod export;
pub mod reader;
pub mod sax;
pub mod xpath;

pub use dom::{Document, NodeId, NodeRef, PropertyValue};
pub use error::{Result, XenError};
pub use export::{to_xml, walk, Visitor, WriterOptions, XmlWriter};
pub use sax::{ContentHandler, ParseOptions, TreeBuilder};
pub use xpath::{CompiledPath, Match, PathCache};
