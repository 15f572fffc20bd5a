//! Query Match Values
//!
//! A path evaluates to a list of [`Match`]es. Most are elements of the tree;
//! a trailing `@name` segment yields an attribute projection instead, a
//! read-only leaf whose text is the attribute value.

use crate::dom::{NodeRef, PropertyValue};
use crate::error::{Result, XenError};
use std::borrow::Cow;
use std::fmt;

/// An attribute reached by a path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeRef<'d> {
    /// Element carrying the attribute
    pub owner: NodeRef<'d>,
    pub name: &'d str,
    pub value: &'d str,
}

/// One result of evaluating a path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Match<'d> {
    Element(NodeRef<'d>),
    Attribute(AttributeRef<'d>),
}

impl<'d> Match<'d> {
    /// Element name, or `@name` for an attribute
    pub fn name(&self) -> Cow<'d, str> {
        match self {
            Match::Element(node) => Cow::Borrowed(node.name()),
            Match::Attribute(attr) => Cow::Owned(format!("@{}", attr.name)),
        }
    }

    /// Local text, or the attribute value
    pub fn text(&self) -> &'d str {
        match self {
            Match::Element(node) => node.text(),
            Match::Attribute(attr) => attr.value,
        }
    }

    /// Parent element; for an attribute this is its owner
    pub fn parent(&self) -> Option<NodeRef<'d>> {
        match self {
            Match::Element(node) => node.parent(),
            Match::Attribute(attr) => Some(attr.owner),
        }
    }

    /// Property lookup with ancestor fallback
    pub fn property(&self, name: &str) -> Option<&'d PropertyValue> {
        match self {
            Match::Element(node) => node.property(name),
            Match::Attribute(attr) => attr.owner.property(name),
        }
    }

    #[inline]
    pub fn is_attribute(&self) -> bool {
        matches!(self, Match::Attribute(_))
    }

    /// The element, `None` for attribute projections
    pub fn as_node(&self) -> Option<NodeRef<'d>> {
        match self {
            Match::Element(node) => Some(*node),
            Match::Attribute(_) => None,
        }
    }

    /// Text parsed as a float, surrounding whitespace ignored
    pub fn to_f64(&self) -> Result<f64> {
        let text = self.text().trim();
        text.parse()
            .map_err(|_| XenError::Argument(format!("{} is not a number: {text:?}", self.name())))
    }

    /// Text parsed as an integer, surrounding whitespace ignored
    pub fn to_i64(&self) -> Result<i64> {
        let text = self.text().trim();
        text.parse()
            .map_err(|_| XenError::Argument(format!("{} is not an integer: {text:?}", self.name())))
    }
}

impl<'d> From<NodeRef<'d>> for Match<'d> {
    fn from(node: NodeRef<'d>) -> Self {
        Match::Element(node)
    }
}

impl fmt::Display for Match<'_> {
    /// Elements render as markup, attributes as their value
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Match::Element(node) => fmt::Display::fmt(node, f),
            Match::Attribute(attr) => f.write_str(attr.value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    fn sample() -> Document {
        let mut doc = Document::new("r");
        let root = doc.root_id();
        let item = doc.append_element(root, "item");
        doc.put_attribute(item, "price", "12.50");
        doc.set_text(item, " 42 ");
        doc.set_property(root, "currency", "EUR");
        doc
    }

    #[test]
    fn test_element_match() {
        let doc = sample();
        let item = Match::from(doc.root().children("item")[0]);
        assert_eq!(item.name(), "item");
        assert_eq!(item.text(), " 42 ");
        assert_eq!(item.parent(), Some(doc.root()));
        assert!(!item.is_attribute());
        assert_eq!(item.to_i64().unwrap(), 42);
        assert_eq!(item.to_f64().unwrap(), 42.0);
    }

    #[test]
    fn test_attribute_match() {
        let doc = sample();
        let owner = doc.root().children("item")[0];
        let (name, value) = owner.attribute_entry("price").unwrap();
        let attr = Match::Attribute(AttributeRef { owner, name, value });
        assert_eq!(attr.name(), "@price");
        assert_eq!(attr.text(), "12.50");
        assert_eq!(attr.parent(), Some(owner));
        assert!(attr.as_node().is_none());
        assert_eq!(attr.to_f64().unwrap(), 12.5);
        assert!(matches!(attr.to_i64(), Err(XenError::Argument(_))));
        assert_eq!(attr.property("currency").and_then(|v| v.as_str()), Some("EUR"));
        assert_eq!(attr.to_string(), "12.50");
    }
}
