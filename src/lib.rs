//! bufwords library - buffer keyword completion source
//!
//! Maintains a cached, deduplicated, sorted list of keywords per editor
//! buffer and answers completion requests with the lists relevant to the
//! requesting buffer.

pub mod cache;
pub mod config;
pub mod error;
pub mod extract;
pub mod host;
pub mod pattern;
pub mod render;
pub mod source;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types for convenience
pub use cache::{BufferCandidateCache, CacheEntry, Candidate};
pub use config::Config;
pub use host::{BufferId, Host, MemoryHost};
pub use source::{BufferSource, Context, Event, GatherResult, Refresh, SkipReason};
