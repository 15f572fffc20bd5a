//! Compiled Path Cache
//!
//! Bounded LRU from assembled path text to a shared [`CompiledPath`], for
//! callers that run the same queries repeatedly.

use super::compiler::{assemble, CompiledPath, Fragments};
use crate::error::Result;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard};

/// Default number of compiled paths kept
pub const DEFAULT_CAPACITY: usize = 256;

/// Thread-safe LRU cache of compiled paths
pub struct PathCache {
    entries: Mutex<LruCache<String, Arc<CompiledPath>>>,
}

impl PathCache {
    /// Create a cache holding at most `capacity` paths (minimum 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        PathCache {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Compiled form of `path`, compiling and inserting it on a miss
    ///
    /// Paths that fail to compile are not cached.
    pub fn get_or_compile<P: Fragments + ?Sized>(&self, path: &P) -> Result<Arc<CompiledPath>> {
        let text = assemble(&path.fragments());
        if let Some(hit) = self.lock().get(&text) {
            log::debug!("path cache hit <{text}>");
            return Ok(Arc::clone(hit));
        }

        log::debug!("path cache miss <{text}>");
        let compiled = Arc::new(CompiledPath::compile(text.as_str())?);
        if let Some((evicted, _)) = self.lock().push(text, Arc::clone(&compiled)) {
            if evicted != compiled.text() {
                log::debug!("path cache evicted <{evicted}>");
            }
        }
        Ok(compiled)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.lock().cap().get()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<String, Arc<CompiledPath>>> {
        // Plans are never mutated in place, so a poisoned lock is still consistent
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for PathCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
