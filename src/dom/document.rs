//! Document - Arena-based element tree
//!
//! Efficient tree storage with:
//! - Arena allocation for nodes
//! - NodeId indices for parent back-references (never a second owner)
//! - String interning for element names
//!
//! All mutation goes through `&mut Document`; reads go through the `Copy`
//! handle [`NodeRef`], which makes a shared document safe to query from
//! many threads at once.

use super::node::{AttributeMap, NodeData, NodeId};
use super::properties::PropertyValue;
use super::strings::NamePool;
use crate::error::{Result, XenError};
use std::collections::{HashSet, VecDeque};
use std::fmt;

/// Wildcard accepted wherever a child name is expected
pub const WILDCARD: &str = "*";

/// An element tree stored in arena format
///
/// Node 0 is the document root. Nodes created with
/// [`create_element`](Document::create_element) or removed from their
/// parent are *detached*: they stay in the arena with no parent until
/// appended somewhere.
#[derive(Debug, Clone)]
pub struct Document {
    /// Arena of nodes
    nodes: Vec<NodeData>,
    /// Interned element names
    names: NamePool,
}

impl Document {
    /// Create a document holding a single root element
    pub fn new(root_name: &str) -> Self {
        let mut names = NamePool::new();
        let name = names.intern(root_name);
        Document {
            nodes: vec![NodeData::element(name)],
            names,
        }
    }

    /// Root element ID
    #[inline]
    pub fn root_id(&self) -> NodeId {
        NodeId::new(0)
    }

    /// Root element
    #[inline]
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            doc: self,
            id: self.root_id(),
        }
    }

    /// Read handle for a node
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this document.
    #[inline]
    pub fn node(&self, id: NodeId) -> NodeRef<'_> {
        assert!(id.index() < self.nodes.len(), "node {id:?} does not belong to this document");
        NodeRef { doc: self, id }
    }

    /// Read handle for a node, `None` for ids from another document
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_>> {
        (id.index() < self.nodes.len()).then_some(NodeRef { doc: self, id })
    }

    /// Number of nodes in the arena, detached ones included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The element name pool
    pub fn names(&self) -> &NamePool {
        &self.names
    }

    #[inline]
    pub(crate) fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }

    #[inline]
    fn data_mut(&mut self, id: NodeId) -> &mut NodeData {
        &mut self.nodes[id.index()]
    }

    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Create a new detached element
    pub fn create_element(&mut self, name: &str) -> NodeId {
        let name = self.names.intern(name);
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(NodeData::element(name));
        id
    }

    /// Create an element and append it to `parent` in one step
    pub fn append_element(&mut self, parent: NodeId, name: &str) -> NodeId {
        let child = self.create_element(name);
        self.data_mut(child).parent = Some(parent);
        self.data_mut(parent).children.get_mut().push(child);
        child
    }

    // ------------------------------------------------------------------
    // Text
    // ------------------------------------------------------------------

    /// Replace the local text of a node
    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) {
        self.data_mut(id).text = text.into();
    }

    /// Append to the local text of a node
    pub fn push_text(&mut self, id: NodeId, text: &str) {
        self.data_mut(id).text.push_str(text);
    }

    /// Trim whitespace from both ends of the local text
    pub fn trim_text(&mut self, id: NodeId) {
        let text = &mut self.data_mut(id).text;
        let trimmed = text.trim();
        if trimmed.len() != text.len() {
            *text = trimmed.to_string();
        }
    }

    // ------------------------------------------------------------------
    // Attributes
    // ------------------------------------------------------------------

    /// Add or replace one attribute, returning the previous value
    pub fn put_attribute(
        &mut self,
        id: NodeId,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.data_mut(id)
            .attributes
            .get_mut()
            .insert(name.into(), value.into())
    }

    /// Add or replace attributes from a flat `name, value, name, value, ...` list
    ///
    /// Fails with [`XenError::Argument`] on an odd number of items, leaving the
    /// node untouched.
    pub fn put_attributes<S: AsRef<str>>(&mut self, id: NodeId, pairs: &[S]) -> Result<()> {
        if pairs.len() % 2 != 0 {
            return Err(XenError::Argument(format!(
                "attribute pairs need an even number of items, got {}",
                pairs.len()
            )));
        }
        if pairs.is_empty() {
            return Ok(());
        }
        let attrs = self.data_mut(id).attributes.get_mut();
        for pair in pairs.chunks_exact(2) {
            attrs.insert(pair[0].as_ref().to_string(), pair[1].as_ref().to_string());
        }
        Ok(())
    }

    /// Replace the whole attribute set
    ///
    /// An empty source clears every attribute.
    pub fn set_attributes<I, K, V>(&mut self, id: NodeId, source: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let attrs: AttributeMap = source
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let slot = &mut self.data_mut(id).attributes;
        if attrs.is_empty() {
            slot.clear();
        } else {
            *slot.get_mut() = attrs;
        }
    }

    /// Remove one attribute, returning its value
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Option<String> {
        self.data_mut(id)
            .attributes
            .get_mut_existing()?
            .shift_remove(name)
    }

    // ------------------------------------------------------------------
    // Children
    // ------------------------------------------------------------------

    /// Append children to `parent`, in order
    ///
    /// A child that already has a parent is detached from it first. Fails
    /// with [`XenError::Argument`] if a child is `parent` itself or one of its
    /// ancestors; nothing is moved in that case.
    pub fn append(&mut self, parent: NodeId, children: &[NodeId]) -> Result<()> {
        if children.is_empty() {
            return Ok(());
        }

        let lineage: HashSet<NodeId> = self.node(parent).ancestors_and_self().collect();
        if let Some(bad) = children.iter().find(|c| lineage.contains(c)) {
            return Err(XenError::Argument(format!(
                "cannot append <{}> under itself or its own descendant",
                self.node(*bad).name()
            )));
        }

        for &child in children {
            self.detach(child);
            self.data_mut(child).parent = Some(parent);
            self.data_mut(parent).children.get_mut().push(child);
        }
        Ok(())
    }

    /// Remove children from `parent` by identity
    ///
    /// Removed nodes become detached. Ids that are not children of `parent`
    /// are ignored.
    pub fn remove(&mut self, parent: NodeId, children: &[NodeId]) {
        if children.is_empty() {
            return;
        }
        let doomed: HashSet<NodeId> = children.iter().copied().collect();
        let mut removed = Vec::new();
        if let Some(list) = self.data_mut(parent).children.get_mut_existing() {
            list.retain(|c| {
                let keep = !doomed.contains(c);
                if !keep {
                    removed.push(*c);
                }
                keep
            });
        }
        for child in removed {
            self.data_mut(child).parent = None;
        }
    }

    /// Detach a node from its parent, if any
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.data(id).parent {
            if let Some(list) = self.data_mut(parent).children.get_mut_existing() {
                list.retain(|&c| c != id);
            }
            self.data_mut(id).parent = None;
        }
    }

    // ------------------------------------------------------------------
    // Properties
    // ------------------------------------------------------------------

    /// Set a node-local property, returning the previous local value
    pub fn set_property(
        &mut self,
        id: NodeId,
        name: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Option<PropertyValue> {
        self.data_mut(id)
            .properties
            .get_mut()
            .insert(name.into(), value.into())
    }

    /// Remove a node-local property
    pub fn remove_property(&mut self, id: NodeId, name: &str) -> Option<PropertyValue> {
        self.data_mut(id).properties.get_mut_existing()?.remove(name)
    }
}

/// Read handle for one node of a [`Document`]
#[derive(Clone, Copy)]
pub struct NodeRef<'d> {
    doc: &'d Document,
    id: NodeId,
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.doc, other.doc) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id.index())
            .field("name", &self.name())
            .finish()
    }
}

impl<'d> NodeRef<'d> {
    #[inline]
    fn data(&self) -> &'d NodeData {
        self.doc.data(self.id)
    }

    #[inline]
    fn wrap(&self, id: NodeId) -> NodeRef<'d> {
        NodeRef { doc: self.doc, id }
    }

    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[inline]
    pub fn document(&self) -> &'d Document {
        self.doc
    }

    /// Qualified name, prefix retained
    #[inline]
    pub fn name(&self) -> &'d str {
        self.doc.names.get(self.data().name).unwrap_or_default()
    }

    /// Local text only
    #[inline]
    pub fn text(&self) -> &'d str {
        &self.data().text
    }

    /// Local text, optionally followed by every descendant's local text
    /// in breadth-first order
    pub fn collect_text(&self, include_descendants: bool) -> String {
        if !include_descendants {
            return self.text().to_string();
        }
        self.breadth_first()
            .into_iter()
            .map(|node| node.text())
            .collect()
    }

    /// Attribute value, `""` when absent
    #[inline]
    pub fn attribute(&self, name: &str) -> &'d str {
        self.data().attribute(name).unwrap_or("")
    }

    /// Attribute value, `None` when absent
    #[inline]
    pub fn get_attribute(&self, name: &str) -> Option<&'d str> {
        self.data().attribute(name)
    }

    /// Stored attribute key and value, both borrowed from the document
    pub fn attribute_entry(&self, name: &str) -> Option<(&'d str, &'d str)> {
        let (key, value) = self.data().attributes.get()?.get_key_value(name)?;
        Some((key.as_str(), value.as_str()))
    }

    #[inline]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.data().attribute(name).is_some()
    }

    /// Attributes in insertion order
    pub fn attributes(&self) -> impl ExactSizeIterator<Item = (&'d str, &'d str)> + 'd {
        let map = self.data().attributes.get();
        map.into_iter()
            .flat_map(|m| m.iter())
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect::<Vec<_>>()
            .into_iter()
    }

    pub fn attribute_count(&self) -> usize {
        self.data().attributes.get().map_or(0, |m| m.len())
    }

    /// Direct children in document order
    pub fn child_nodes(&self) -> impl ExactSizeIterator<Item = NodeRef<'d>> + 'd {
        let doc = self.doc;
        self.data()
            .child_ids()
            .iter()
            .map(move |&id| NodeRef { doc, id })
    }

    pub fn child_count(&self) -> usize {
        self.data().child_ids().len()
    }

    /// Direct children with an exact name, or all of them for `"*"`
    pub fn children(&self, name: &str) -> Vec<NodeRef<'d>> {
        if name == WILDCARD {
            return self.child_nodes().collect();
        }
        let Some(wanted) = self.doc.names.lookup(name) else {
            return Vec::new();
        };
        self.child_nodes()
            .filter(|child| child.data().name == wanted)
            .collect()
    }

    /// Parent, `None` at the root or for detached nodes
    #[inline]
    pub fn parent(&self) -> Option<NodeRef<'d>> {
        self.data().parent.map(|id| self.wrap(id))
    }

    /// Topmost ancestor (the node itself when it has no parent)
    pub fn root(&self) -> NodeRef<'d> {
        let mut current = *self;
        while let Some(parent) = current.parent() {
            current = parent;
        }
        current
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.data().parent.is_none()
    }

    /// This node followed by each ancestor up to the root
    pub fn ancestors_and_self(&self) -> impl Iterator<Item = NodeId> + 'd {
        let doc = self.doc;
        std::iter::successors(Some(self.id), move |&id| doc.data(id).parent)
    }

    /// Property lookup: local value first, then each ancestor in turn
    pub fn property(&self, name: &str) -> Option<&'d PropertyValue> {
        self.ancestors_and_self()
            .find_map(|id| self.doc.data(id).properties.get()?.get(name))
    }

    /// Properties set directly on this node
    pub fn properties(&self) -> impl Iterator<Item = (&'d str, &'d PropertyValue)> + 'd {
        self.data()
            .properties
            .get()
            .into_iter()
            .flat_map(|m| m.iter())
            .map(|(k, v)| (k.as_str(), v))
    }

    /// Slash-delimited path of ancestor names from the root, e.g.
    /// `/m:customer/email`; the root itself is `/`
    pub fn absolute_path(&self) -> String {
        let mut names: Vec<&str> = Vec::new();
        let mut current = *self;
        while let Some(parent) = current.parent() {
            names.push(current.name());
            current = parent;
        }
        if names.is_empty() {
            return "/".to_string();
        }
        names.reverse();
        let mut path = String::new();
        for name in names {
            path.push('/');
            path.push_str(name);
        }
        path
    }

    /// This node and every descendant, level by level
    pub fn breadth_first(&self) -> Vec<NodeRef<'d>> {
        let mut out = Vec::new();
        let mut queue = VecDeque::from([*self]);
        while let Some(node) = queue.pop_front() {
            out.push(node);
            queue.extend(node.child_nodes());
        }
        out
    }

    /// This node and every descendant in document order
    pub fn depth_first(&self) -> Vec<NodeRef<'d>> {
        let mut out = Vec::new();
        let mut stack = vec![*self];
        while let Some(node) = stack.pop() {
            out.push(node);
            let children = node.data().child_ids();
            stack.extend(children.iter().rev().map(|&id| self.wrap(id)));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// r
    /// ├── a (x=1)
    /// │   └── c
    /// └── a (x=2)
    fn sample() -> (Document, [NodeId; 3]) {
        let mut doc = Document::new("r");
        let root = doc.root_id();
        let a1 = doc.append_element(root, "a");
        let a2 = doc.append_element(root, "a");
        let c = doc.append_element(a1, "c");
        doc.put_attribute(a1, "x", "1");
        doc.put_attribute(a2, "x", "2");
        doc.set_text(root, "R");
        doc.set_text(a1, "A1");
        doc.set_text(a2, "A2");
        doc.set_text(c, "C");
        (doc, [a1, a2, c])
    }

    #[test]
    fn test_new_document() {
        let doc = Document::new("dongle");
        assert_eq!(doc.root().name(), "dongle");
        assert!(doc.root().is_root());
        assert_eq!(doc.root().text(), "");
        assert_eq!(doc.node_count(), 1);
    }

    #[test]
    fn test_attribute_absent_is_empty_string() {
        let (doc, [a1, ..]) = sample();
        let a1 = doc.node(a1);
        assert_eq!(a1.attribute("x"), "1");
        assert_eq!(a1.attribute("missing"), "");
        assert!(!a1.has_attribute("missing"));
        assert!(a1.get_attribute("missing").is_none());
    }

    #[test]
    fn test_put_attributes_odd_count() {
        let (mut doc, [a1, ..]) = sample();
        let err = doc.put_attributes(a1, &["foo", "bar", "baz"]).unwrap_err();
        assert!(matches!(err, XenError::Argument(_)));
        assert!(!doc.node(a1).has_attribute("foo"));

        doc.put_attributes(a1, &["foo", "bar", "x", "9"]).unwrap();
        let attrs: Vec<_> = doc.node(a1).attributes().collect();
        assert_eq!(attrs, vec![("x", "9"), ("foo", "bar")]);
    }

    #[test]
    fn test_set_attributes_replaces_all() {
        let (mut doc, [a1, ..]) = sample();
        doc.set_attributes(a1, [("k", "v"), ("j", "w")]);
        assert_eq!(doc.node(a1).attribute_count(), 2);
        assert!(!doc.node(a1).has_attribute("x"));

        doc.set_attributes(a1, Vec::<(String, String)>::new());
        assert_eq!(doc.node(a1).attribute_count(), 0);
    }

    #[test]
    fn test_remove_attribute_keeps_order() {
        let (mut doc, [a1, ..]) = sample();
        doc.put_attributes(a1, &["y", "2", "z", "3"]).unwrap();
        assert_eq!(doc.remove_attribute(a1, "y").as_deref(), Some("2"));
        let names: Vec<_> = doc.node(a1).attributes().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["x", "z"]);
    }

    #[test]
    fn test_children_by_name_and_wildcard() {
        let (doc, [a1, a2, _]) = sample();
        let root = doc.root();
        let named: Vec<_> = root.children("a").iter().map(|n| n.id()).collect();
        assert_eq!(named, vec![a1, a2]);
        assert_eq!(root.children("*").len(), root.child_count());
        assert!(root.children("nope").is_empty());
        assert!(root.children("c").is_empty());
    }

    #[test]
    fn test_append_detaches_from_previous_parent() {
        let (mut doc, [a1, a2, c]) = sample();
        doc.append(a2, &[c]).unwrap();
        assert_eq!(doc.node(c).parent().map(|p| p.id()), Some(a2));
        assert_eq!(doc.node(a1).child_count(), 0);
        assert_eq!(doc.node(a2).child_count(), 1);
    }

    #[test]
    fn test_append_rejects_cycles() {
        let (mut doc, [a1, _, c]) = sample();
        let root = doc.root_id();
        assert!(doc.append(c, &[a1]).is_err());
        assert!(doc.append(c, &[root]).is_err());
        assert!(doc.append(a1, &[a1]).is_err());
        assert_eq!(doc.node(c).parent().map(|p| p.id()), Some(a1));
    }

    #[test]
    fn test_remove_by_identity() {
        let (mut doc, [a1, a2, c]) = sample();
        let root = doc.root_id();
        doc.remove(root, &[a1, c]);
        let remaining: Vec<_> = doc.root().child_nodes().map(|n| n.id()).collect();
        assert_eq!(remaining, vec![a2]);
        assert!(doc.node(a1).is_root());
        // c was not a child of root, so it keeps its parent
        assert_eq!(doc.node(c).parent().map(|p| p.id()), Some(a1));
    }

    #[test]
    fn test_created_element_is_detached() {
        let mut doc = Document::new("r");
        let orphan = doc.create_element("orphan");
        assert!(doc.node(orphan).is_root());
        assert_eq!(doc.node(orphan).absolute_path(), "/");
        doc.append(doc.root_id(), &[orphan]).unwrap();
        assert_eq!(doc.node(orphan).absolute_path(), "/orphan");
    }

    #[test]
    fn test_property_falls_back_to_ancestors() {
        let (mut doc, [a1, _, c]) = sample();
        let root = doc.root_id();
        doc.set_property(root, "foo1", "bar1");
        doc.set_property(root, "foo2", "bar2");
        doc.set_property(a1, "foo1", "override");

        let c = doc.node(c);
        assert_eq!(c.property("foo1").and_then(|v| v.as_str()), Some("override"));
        assert_eq!(c.property("foo2").and_then(|v| v.as_str()), Some("bar2"));
        assert!(c.property("nope").is_none());
        assert_eq!(c.properties().count(), 0);
    }

    #[test]
    fn test_absolute_path() {
        let (doc, [a1, _, c]) = sample();
        assert_eq!(doc.root().absolute_path(), "/");
        assert_eq!(doc.node(a1).absolute_path(), "/a");
        assert_eq!(doc.node(c).absolute_path(), "/a/c");
    }

    #[test]
    fn test_traversal_orders() {
        let (doc, _) = sample();
        let bfs: Vec<_> = doc.root().breadth_first().iter().map(|n| n.text()).collect();
        assert_eq!(bfs, vec!["R", "A1", "A2", "C"]);
        let dfs: Vec<_> = doc.root().depth_first().iter().map(|n| n.text()).collect();
        assert_eq!(dfs, vec!["R", "A1", "C", "A2"]);
    }

    #[test]
    fn test_collect_text_breadth_first() {
        let (doc, _) = sample();
        assert_eq!(doc.root().collect_text(false), "R");
        assert_eq!(doc.root().collect_text(true), "RA1A2C");
    }

    #[test]
    fn test_trim_text() {
        let mut doc = Document::new("r");
        doc.push_text(doc.root_id(), "\n  hello ");
        doc.push_text(doc.root_id(), "world \n");
        doc.trim_text(doc.root_id());
        assert_eq!(doc.root().text(), "hello world");
    }

    #[test]
    fn test_get_foreign_id() {
        let (doc, _) = sample();
        let small = Document::new("x");
        assert!(small.get(NodeId::new(3)).is_none());
        assert!(doc.get(NodeId::new(3)).is_some());
    }
}
