//! Shared test utilities for bufwords
//!
//! This module provides common test fixtures and helper functions
//! used across multiple test modules.

#[cfg(test)]
pub mod test_helpers {
    use crate::cache::Candidate;
    use crate::config::Config;
    use crate::host::{BufferId, Host, MemoryHost};
    use crate::source::{BufferSource, Context, Refresh};

    /// Lines of the reference buffer used across scenarios
    pub const SCENARIO_LINES: &str = "foo bar\nFoo baz\nbar";

    /// Source with default config
    pub fn test_source() -> BufferSource {
        BufferSource::new(&Config::default())
    }

    /// Source with default config apart from the same-filetype option
    pub fn test_source_with(require_same_filetype: bool) -> BufferSource {
        let mut config = Config::default();
        config.buffer.require_same_filetype = require_same_filetype;
        BufferSource::new(&config)
    }

    /// Makes `id` current and fires a refresh for it, the way a host does on
    /// `BufReadPost`
    pub fn scan(source: &mut BufferSource, host: &mut MemoryHost, id: BufferId) -> Refresh {
        host.set_current(id);
        let context = Context::new(id, host.current_filetype());
        source.on_event(&*host, &context)
    }

    /// Words of a candidate list
    pub fn words(candidates: &[Candidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.word.as_str()).collect()
    }

    /// Cached words of one buffer, or `None` if it has no entry
    pub fn cached_words(source: &BufferSource, id: BufferId) -> Option<Vec<&str>> {
        source.cache().get(id).map(|entry| words(&entry.candidates))
    }

    /// Content whose buffer size is exactly `size` bytes. Every line,
    /// including the last, ends in a newline.
    pub fn content_of_size(size: usize) -> String {
        let mut content = String::with_capacity(size);
        while content.len() < size {
            let remaining = size - content.len();
            if remaining > 10 {
                content.push_str("word word\n");
            } else {
                content.push_str(&"x".repeat(remaining - 1));
                content.push('\n');
            }
        }
        content
    }
}
