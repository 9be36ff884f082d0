//! Render handle table keyed by entity id
//!
//! After each frame the presenter walks the live entities: unknown ids get a
//! new handle, known ids get updated, and handles whose entity is gone are
//! released.

use std::collections::HashMap;
use std::hash::Hash;

/// Parallel table of rendering handles
#[derive(Debug)]
pub struct HandleTable<K, H> {
    handles: HashMap<K, H>,
}

impl<K: Copy + Eq + Hash, H> Default for HandleTable<K, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Eq + Hash, H> HandleTable<K, H> {
    pub fn new() -> Self {
        Self {
            handles: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn get(&self, key: &K) -> Option<&H> {
        self.handles.get(key)
    }

    /// Bring the table in line with `live`.
    ///
    /// `create` makes a handle for a new entity, `update` refreshes an
    /// existing one, `release` disposes of a handle whose entity vanished.
    pub fn sync<'a, T: 'a>(
        &mut self,
        live: impl IntoIterator<Item = (K, &'a T)>,
        mut create: impl FnMut(&T) -> Option<H>,
        mut update: impl FnMut(&mut H, &T),
        mut release: impl FnMut(H),
    ) {
        let mut seen = Vec::new();
        for (key, item) in live {
            seen.push(key);
            match self.handles.get_mut(&key) {
                Some(handle) => update(handle, item),
                None => {
                    if let Some(mut handle) = create(item) {
                        update(&mut handle, item);
                        self.handles.insert(key, handle);
                    }
                }
            }
        }

        let stale: Vec<K> = self
            .handles
            .keys()
            .filter(|k| !seen.contains(*k))
            .copied()
            .collect();
        for key in stale {
            if let Some(handle) = self.handles.remove(&key) {
                release(handle);
            }
        }
    }

    /// Release every handle (restart)
    pub fn clear(&mut self, mut release: impl FnMut(H)) {
        for (_, handle) in self.handles.drain() {
            release(handle);
        }
    }
}
