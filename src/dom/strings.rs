//! Element Name Interning Pool
//!
//! Element names repeat heavily (every `<email>` in a list shares one
//! entry). Nodes store a [`NameId`] and child filtering compares ids after a
//! single lookup of the requested name.

use std::collections::HashMap;
use std::sync::Arc;

/// Index into a [`NamePool`]
pub type NameId = u32;

/// String interning pool for qualified element names
#[derive(Debug, Default, Clone)]
pub struct NamePool {
    /// Names indexed by id
    names: Vec<Arc<str>>,
    /// Name -> id
    index: HashMap<Arc<str>, NameId>,
}

impl NamePool {
    /// Create a new empty pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a name, returning the existing id when already present
    pub fn intern(&mut self, name: &str) -> NameId {
        if let Some(&id) = self.index.get(name) {
            return id;
        }
        let id = self.names.len() as NameId;
        let shared: Arc<str> = Arc::from(name);
        self.names.push(Arc::clone(&shared));
        self.index.insert(shared, id);
        id
    }

    /// Find the id of a name without interning it
    #[inline]
    pub fn lookup(&self, name: &str) -> Option<NameId> {
        self.index.get(name).copied()
    }

    /// Resolve an id back to its name
    #[inline]
    pub fn get(&self, id: NameId) -> Option<&str> {
        self.names.get(id as usize).map(|s| s.as_ref())
    }

    /// Number of distinct names
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
