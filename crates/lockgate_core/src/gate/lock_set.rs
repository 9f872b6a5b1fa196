use std::collections::HashSet;

use super::SourceId;

/// Sources currently holding a lock on a gate.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct LockSet {
    sources: HashSet<SourceId>,
}

impl LockSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a lock. Returns `false` if `source` already held one.
    pub fn insert(&mut self, source: SourceId) -> bool {
        self.sources.insert(source)
    }

    /// Drop a lock. Returns `false` if `source` held none.
    pub fn remove(&mut self, source: &SourceId) -> bool {
        self.sources.remove(source)
    }

    pub fn contains(&self, source: &SourceId) -> bool {
        self.sources.contains(source)
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SourceId> {
        self.sources.iter()
    }

    /// Sorted snapshot of the holders, for deterministic diagnostics.
    pub fn holders(&self) -> Vec<SourceId> {
        let mut holders: Vec<SourceId> = self.iter().cloned().collect();
        holders.sort();
        holders
    }
}
