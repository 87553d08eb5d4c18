//! Per-buffer candidate cache

use std::collections::BTreeMap;

use serde::Serialize;

use crate::host::{BufferId, Host};

/// One proposed completion word
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub word: String,
}

impl Candidate {
    pub fn new(word: impl Into<String>) -> Self {
        Self { word: word.into() }
    }
}

/// Result of the last successful scan of one buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub bufnr: BufferId,
    /// Filetype at scan time; not updated if the buffer's filetype changes
    /// without a rescan
    pub filetype: String,
    /// Sorted case-insensitively
    pub candidates: Vec<Candidate>,
}

/// Mapping from buffer to its cached candidates, at most one entry per
/// buffer. Iterates in buffer id order.
#[derive(Debug, Clone, Default)]
pub struct BufferCandidateCache {
    entries: BTreeMap<BufferId, CacheEntry>,
}

impl BufferCandidateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops entries whose buffer the host no longer reports as loaded. A
    /// failed loaded-check counts as unloaded. Returns the evicted ids.
    pub fn clean(&mut self, host: &dyn Host) -> Vec<BufferId> {
        let mut evicted = Vec::new();
        self.entries.retain(|id, _| {
            let loaded = host.buffer_loaded(*id).unwrap_or(false);
            if !loaded {
                evicted.push(*id);
            }
            loaded
        });

        #[cfg(debug_assertions)]
        if !evicted.is_empty() {
            log::debug!("Evicted unloaded buffers from cache: {:?}", evicted);
        }

        evicted
    }

    /// Installs an entry, replacing any previous one for the same buffer
    pub fn insert(&mut self, entry: CacheEntry) {
        self.entries.insert(entry.bufnr, entry);
    }

    pub fn get(&self, id: BufferId) -> Option<&CacheEntry> {
        self.entries.get(&id)
    }

    pub fn contains(&self, id: BufferId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn entries(&self) -> impl Iterator<Item = &CacheEntry> {
        self.entries.values()
    }

    pub fn buffer_ids(&self) -> Vec<BufferId> {
        self.entries.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod cache_tests;
