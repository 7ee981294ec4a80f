use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::pattern::{CanonicalKey, Pattern};

/// Canonical keys already scheduled in this run.
#[derive(Debug, Default)]
pub(crate) struct SeenKeys {
    patterns: DashMap<CanonicalKey, Pattern>,
}

impl SeenKeys {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Atomically records `key`. Returns true if it was not seen before.
    ///
    /// # Panics
    ///
    /// Panics if `key` is already bound to a structurally different pattern,
    /// which would mean two non-identical canonical forms share a key.
    pub(crate) fn insert(&self, key: &CanonicalKey, pattern: &Pattern) -> bool {
        match self.patterns.entry(key.clone()) {
            Entry::Occupied(existing) => {
                assert!(
                    existing.get() == pattern,
                    "canonical key collision for {key}: {:?} vs {:?}",
                    existing.get(),
                    pattern
                );
                false
            }
            Entry::Vacant(slot) => {
                slot.insert(pattern.clone());
                true
            }
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.patterns.len()
    }
}
