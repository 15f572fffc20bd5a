//! Node representation
//!
//! Uses NodeId (u32) for compact, cache-friendly node references.

use super::properties::PropertyValue;
use super::strings::NameId;
use indexmap::IndexMap;
use std::collections::HashMap;

/// Compact node identifier (index into the document arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub(crate) fn new(index: usize) -> Self {
        NodeId(index as u32)
    }

    /// Position of this node in its document's arena
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A container that is only allocated on first write
///
/// Most leaves never get attributes, children or properties, so every node
/// starts with all three `Empty`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Lazy<T> {
    #[default]
    Empty,
    Materialized(T),
}

impl<T: Default> Lazy<T> {
    /// Read access; `None` while nothing was ever written
    #[inline]
    pub fn get(&self) -> Option<&T> {
        match self {
            Lazy::Empty => None,
            Lazy::Materialized(value) => Some(value),
        }
    }

    /// Write access, materializing the container on first use
    pub fn get_mut(&mut self) -> &mut T {
        if let Lazy::Empty = self {
            *self = Lazy::Materialized(T::default());
        }
        match self {
            Lazy::Materialized(value) => value,
            Lazy::Empty => unreachable!("materialized above"),
        }
    }

    /// Write access only if already materialized
    #[inline]
    pub fn get_mut_existing(&mut self) -> Option<&mut T> {
        match self {
            Lazy::Empty => None,
            Lazy::Materialized(value) => Some(value),
        }
    }

    /// Drop the container and go back to `Empty`
    #[inline]
    pub fn clear(&mut self) {
        *self = Lazy::Empty;
    }

    #[inline]
    pub fn is_materialized(&self) -> bool {
        matches!(self, Lazy::Materialized(_))
    }
}

/// Ordered attribute map: unique keys, insertion order preserved
pub type AttributeMap = IndexMap<String, String>;

/// Node-local property bag
pub type PropertyMap = HashMap<String, PropertyValue>;

/// An element node in the arena
#[derive(Debug, Clone)]
pub struct NodeData {
    /// Interned qualified name
    pub name: NameId,
    /// Local text only, never includes descendants
    pub text: String,
    /// Parent node (None for the document root and detached nodes)
    pub parent: Option<NodeId>,
    pub attributes: Lazy<AttributeMap>,
    pub children: Lazy<Vec<NodeId>>,
    pub properties: Lazy<PropertyMap>,
}

impl NodeData {
    /// Create a new detached element node
    pub fn element(name: NameId) -> Self {
        NodeData {
            name,
            text: String::new(),
            parent: None,
            attributes: Lazy::Empty,
            children: Lazy::Empty,
            properties: Lazy::Empty,
        }
    }

    /// Child ids in document order
    #[inline]
    pub fn child_ids(&self) -> &[NodeId] {
        self.children.get().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Attribute value by name
    #[inline]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get()?.get(name).map(String::as_str)
    }

    /// Check if this node has children
    #[inline]
    pub fn has_children(&self) -> bool {
        !self.child_ids().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_starts_empty() {
        let node = NodeData::element(3);
        assert_eq!(node.name, 3);
        assert!(node.parent.is_none());
        assert!(node.text.is_empty());
        assert!(!node.attributes.is_materialized());
        assert!(!node.children.is_materialized());
        assert!(!node.properties.is_materialized());
        assert!(node.child_ids().is_empty());
    }

    #[test]
    fn test_lazy_materializes_on_write() {
        let mut attrs: Lazy<AttributeMap> = Lazy::Empty;
        assert!(attrs.get().is_none());
        assert!(attrs.get_mut_existing().is_none());

        attrs.get_mut().insert("id".to_string(), "1".to_string());
        assert!(attrs.is_materialized());
        assert_eq!(attrs.get().and_then(|a| a.get("id")).map(String::as_str), Some("1"));

        attrs.clear();
        assert_eq!(attrs, Lazy::Empty);
    }

    #[test]
    fn test_node_id_index() {
        assert_eq!(NodeId::new(42).index(), 42);
        assert!(NodeId::new(1) < NodeId::new(2));
    }
}
