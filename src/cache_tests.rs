//! Tests for cache

use super::*;
use crate::error::HostError;
use crate::host::MemoryHost;

fn entry(id: u32, filetype: &str, words: &[&str]) -> CacheEntry {
    CacheEntry {
        bufnr: BufferId(id),
        filetype: filetype.to_string(),
        candidates: words.iter().map(|w| Candidate::new(*w)).collect(),
    }
}

/// Host whose loaded-check fails for every buffer
struct FailingHost;

impl Host for FailingHost {
    fn buffer_loaded(&self, id: BufferId) -> Result<bool, HostError> {
        Err(HostError::Call(format!("bufloaded({id}) failed")))
    }

    fn current_line_count(&self) -> usize {
        0
    }

    fn byte_offset_of_line(&self, _line: usize) -> Option<usize> {
        None
    }

    fn visible_buffers_in_current_tab(&self) -> Vec<BufferId> {
        Vec::new()
    }

    fn current_filetype(&self) -> String {
        String::new()
    }

    fn read_lines(&self, _max_lines: usize) -> Box<dyn Iterator<Item = Vec<u8>> + '_> {
        Box::new(std::iter::empty())
    }
}

#[test]
fn test_new_cache_is_empty() {
    let cache = BufferCandidateCache::new();
    assert!(cache.is_empty());
    assert_eq!(cache.len(), 0);
}

#[test]
fn test_insert_overwrites_existing_entry() {
    let mut cache = BufferCandidateCache::new();
    cache.insert(entry(1, "python", &["old"]));
    cache.insert(entry(1, "go", &["new"]));

    assert_eq!(cache.len(), 1);
    let stored = cache.get(BufferId(1)).unwrap();
    assert_eq!(stored.filetype, "go");
    assert_eq!(stored.candidates, vec![Candidate::new("new")]);
}

#[test]
fn test_clean_keeps_only_loaded_buffers() {
    let mut host = MemoryHost::new();
    let one = host.add_buffer("text", "a");
    let two = host.add_buffer("text", "b");
    let three = host.add_buffer("text", "c");
    host.unload(two);

    let mut cache = BufferCandidateCache::new();
    for id in [one, two, three] {
        cache.insert(entry(id.0, "text", &["w"]));
    }

    let evicted = cache.clean(&host);

    assert_eq!(evicted, vec![two]);
    assert_eq!(cache.buffer_ids(), vec![one, three]);
}

#[test]
fn test_clean_evicts_buffers_unknown_to_host() {
    let mut host = MemoryHost::new();
    let one = host.add_buffer("text", "a");
    let two = host.add_buffer("text", "b");
    host.wipe(two);

    let mut cache = BufferCandidateCache::new();
    cache.insert(entry(one.0, "text", &["a"]));
    cache.insert(entry(two.0, "text", &["b"]));

    cache.clean(&host);

    assert!(cache.contains(one));
    assert!(!cache.contains(two));
}

#[test]
fn test_clean_treats_failed_check_as_unloaded() {
    let mut cache = BufferCandidateCache::new();
    cache.insert(entry(1, "text", &["a"]));
    cache.insert(entry(2, "text", &["b"]));

    let mut evicted = cache.clean(&FailingHost);
    evicted.sort();

    assert_eq!(evicted, vec![BufferId(1), BufferId(2)]);
    assert!(cache.is_empty());
}

#[test]
fn test_clean_on_empty_cache_is_noop() {
    let host = MemoryHost::new();
    let mut cache = BufferCandidateCache::new();
    assert!(cache.clean(&host).is_empty());
}

#[test]
fn test_candidate_serializes_with_word_key() {
    let json = serde_json::to_string(&Candidate::new("foo")).unwrap();
    assert_eq!(json, r#"{"word":"foo"}"#);
}
