//! Tree Builder
//!
//! [`ContentHandler`] that turns an event stream into a [`Document`].

use super::{drive, ContentHandler};
use crate::core::attributes::Attribute;
use crate::dom::{Document, NodeId};
use crate::error::{Result, XenError};
use crate::reader;
use std::io::Read;

/// Ingestion settings
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Trim each element's accumulated text when it closes
    pub trim_whitespace: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            trim_whitespace: true,
        }
    }
}

/// Builds a tree from start/characters/end events
///
/// The first start-element creates the document root; each later one appends
/// a child to the current element and descends into it. Whitespace outside
/// the root element is ignored; other text after the root closes is an error.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    doc: Option<Document>,
    /// Innermost open element
    current: Option<NodeId>,
    /// Root element has been closed
    closed: bool,
    trim: bool,
    position: usize,
}

impl TreeBuilder {
    pub fn new(options: &ParseOptions) -> Self {
        TreeBuilder {
            trim: options.trim_whitespace,
            ..Default::default()
        }
    }

    /// Finish the build, failing if no root was seen or elements are unclosed
    pub fn finish(self) -> Result<Document> {
        match (self.doc, self.current) {
            (Some(doc), None) => {
                log::debug!(
                    "built document <{}> with {} nodes",
                    doc.root().name(),
                    doc.node_count()
                );
                Ok(doc)
            }
            (Some(doc), Some(open)) => Err(XenError::parse(
                format!("unclosed element <{}>", doc.node(open).name()),
                self.position,
            )),
            (None, _) => Err(XenError::parse("no root element", self.position)),
        }
    }
}

impl ContentHandler for TreeBuilder {
    fn locate(&mut self, position: usize) {
        self.position = position;
    }

    fn start_element(&mut self, name: &str, attributes: &[Attribute<'_>]) -> Result<()> {
        if self.closed {
            return Err(XenError::parse(
                format!("second root element <{name}>"),
                self.position,
            ));
        }
        let doc = self.doc.get_or_insert_with(|| Document::new(name));
        let id = match self.current {
            Some(parent) => doc.append_element(parent, name),
            None => doc.root_id(),
        };
        if !attributes.is_empty() {
            doc.set_attributes(id, attributes.iter().map(|a| (a.name, a.value.as_ref())));
        }
        self.current = Some(id);
        Ok(())
    }

    fn characters(&mut self, text: &str) -> Result<()> {
        match (self.doc.as_mut(), self.current) {
            (Some(doc), Some(current)) => {
                doc.push_text(current, text);
                Ok(())
            }
            _ if text.trim().is_empty() => Ok(()),
            _ if self.closed => Err(XenError::parse("text after the root element", self.position)),
            _ => Err(XenError::parse("text before the root element", self.position)),
        }
    }

    fn end_element(&mut self, name: &str) -> Result<()> {
        let (Some(doc), Some(current)) = (self.doc.as_mut(), self.current) else {
            return Err(XenError::parse(format!("unexpected end tag </{name}>"), self.position));
        };
        let open = doc.node(current).name();
        if open != name {
            let message = format!("mismatched end tag: expected </{open}>, found </{name}>");
            return Err(XenError::parse(message, self.position));
        }
        if self.trim {
            doc.trim_text(current);
        }
        self.current = doc.node(current).parent().map(|p| p.id());
        self.closed = self.current.is_none();
        Ok(())
    }
}

impl Document {
    /// Parse markup text with default options
    pub fn parse_str(input: &str) -> Result<Document> {
        Self::parse_str_with(input, &ParseOptions::default())
    }

    pub fn parse_str_with(input: &str, options: &ParseOptions) -> Result<Document> {
        let mut builder = TreeBuilder::new(options);
        drive(input, &mut builder)?;
        builder.finish()
    }

    /// Parse raw bytes; they must be UTF-8
    pub fn parse(input: &[u8]) -> Result<Document> {
        Self::parse_with(input, &ParseOptions::default())
    }

    pub fn parse_with(input: &[u8], options: &ParseOptions) -> Result<Document> {
        Self::parse_str_with(reader::decode_utf8(input)?, options)
    }

    /// Parse everything readable from `source`
    pub fn parse_reader<R: Read>(source: R) -> Result<Document> {
        Self::parse_reader_with(source, &ParseOptions::default())
    }

    pub fn parse_reader_with<R: Read>(source: R, options: &ParseOptions) -> Result<Document> {
        let text = reader::read_to_string(source)?;
        Self::parse_str_with(&text, options)
    }
}
