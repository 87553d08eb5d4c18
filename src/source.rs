//! Buffer keyword completion source
//!
//! Keeps one cached, sorted word list per scanned buffer. The host calls
//! [`BufferSource::on_event`] on buffer read/write to refresh the current
//! buffer's entry and [`BufferSource::gather_candidates`] on every completion
//! request to collect the lists relevant to the requesting buffer.

use std::fmt;

use serde::Serialize;

use crate::cache::{BufferCandidateCache, CacheEntry, Candidate};
use crate::config::{BufferConfig, Config};
use crate::extract::{decode_lines, parse_buffer_pattern, sort_candidates};
use crate::host::lines::tail_window;
use crate::host::{BufferId, Host, buffer_size};
use crate::pattern::{DefaultPatternResolver, KeywordPatternResolver, KeywordPatterns};

pub const SOURCE_NAME: &str = "buffer";
pub const SOURCE_MARK: &str = "[B]";

/// Editor lifecycle events that refresh the cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    BufReadPost,
    BufWritePost,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::BufReadPost => write!(f, "BufReadPost"),
            Event::BufWritePost => write!(f, "BufWritePost"),
        }
    }
}

pub const SOURCE_EVENTS: &[Event] = &[Event::BufReadPost, Event::BufWritePost];

/// Per-call input from the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    pub bufnr: BufferId,
    pub filetype: String,
    /// Filetypes of the requesting buffer, including embedded ones
    pub filetypes: Vec<String>,
    /// Filetypes treated as equivalent to the requesting buffer's
    pub same_filetypes: Vec<String>,
}

impl Context {
    pub fn new(bufnr: BufferId, filetype: impl Into<String>) -> Self {
        let filetype = filetype.into();
        Self {
            bufnr,
            filetypes: vec![filetype.clone()],
            filetype,
            same_filetypes: Vec::new(),
        }
    }

    pub fn with_same_filetypes(mut self, same_filetypes: Vec<String>) -> Self {
        self.same_filetypes = same_filetypes;
        self
    }

    pub fn with_filetypes(mut self, filetypes: Vec<String>) -> Self {
        self.filetypes = filetypes;
        self
    }
}

/// Why a refresh left the cache untouched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    SizeLimitExceeded { size: usize, limit: usize },
    DecodeFailure { line: usize, valid_up_to: usize },
    InvalidPattern(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::SizeLimitExceeded { size, limit } => {
                write!(f, "buffer is {} bytes, limit is {}", size, limit)
            }
            SkipReason::DecodeFailure { line, valid_up_to } => {
                write!(
                    f,
                    "line {} is not valid UTF-8 after byte {}",
                    line, valid_up_to
                )
            }
            SkipReason::InvalidPattern(msg) => write!(f, "{}", msg),
        }
    }
}

/// Outcome of one refresh of the current buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Refresh {
    Updated { bufnr: BufferId, candidates: usize },
    Skipped(SkipReason),
}

impl Refresh {
    pub fn is_updated(&self) -> bool {
        matches!(self, Refresh::Updated { .. })
    }
}

/// Candidate lists of the relevant buffers, one list per buffer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GatherResult<'a> {
    pub sorted_candidates: Vec<&'a [Candidate]>,
}

impl GatherResult<'_> {
    pub fn total_candidates(&self) -> usize {
        self.sorted_candidates.iter().map(|list| list.len()).sum()
    }
}

pub struct BufferSource {
    cache: BufferCandidateCache,
    options: BufferConfig,
    keyword_patterns: KeywordPatterns,
    resolver: Box<dyn KeywordPatternResolver>,
}

impl fmt::Debug for BufferSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferSource")
            .field("cache", &self.cache)
            .field("options", &self.options)
            .field("keyword_patterns", &self.keyword_patterns)
            .finish_non_exhaustive()
    }
}

impl Default for BufferSource {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl BufferSource {
    /// Source with an empty cache and the built-in pattern resolver
    pub fn new(config: &Config) -> Self {
        Self::with_resolver(config, Box::new(DefaultPatternResolver::new()))
    }

    pub fn with_resolver(config: &Config, resolver: Box<dyn KeywordPatternResolver>) -> Self {
        Self {
            cache: BufferCandidateCache::new(),
            options: config.buffer.clone(),
            keyword_patterns: config.keyword_patterns.clone(),
            resolver,
        }
    }

    pub fn name(&self) -> &'static str {
        SOURCE_NAME
    }

    pub fn mark(&self) -> &'static str {
        SOURCE_MARK
    }

    pub fn events(&self) -> &'static [Event] {
        SOURCE_EVENTS
    }

    pub fn is_subscribed(&self, event: Event) -> bool {
        SOURCE_EVENTS.contains(&event)
    }

    pub fn options(&self) -> &BufferConfig {
        &self.options
    }

    pub fn cache(&self) -> &BufferCandidateCache {
        &self.cache
    }

    /// Drops cached entries of unloaded buffers, then rescans the buffer
    /// named in `context`.
    pub fn on_event(&mut self, host: &dyn Host, context: &Context) -> Refresh {
        self.cache.clean(host);
        let refresh = self.make_cache(host, context);

        #[cfg(debug_assertions)]
        match &refresh {
            Refresh::Updated { bufnr, candidates } => {
                log::debug!("Cached {} candidates for buffer {}", candidates, bufnr)
            }
            Refresh::Skipped(reason) => {
                log::debug!("Skipped refresh of buffer {}: {}", context.bufnr, reason)
            }
        }

        refresh
    }

    /// Rescans the current buffer and replaces its cache entry. Any skip
    /// leaves the previous entry in place.
    pub fn make_cache(&mut self, host: &dyn Host, context: &Context) -> Refresh {
        let size = buffer_size(host);
        if size > self.options.size_limit {
            return Refresh::Skipped(SkipReason::SizeLimitExceeded {
                size,
                limit: self.options.size_limit,
            });
        }

        let pattern = match self
            .resolver
            .resolve(&context.filetype, &self.keyword_patterns)
        {
            Ok(pattern) => pattern,
            Err(e) => return Refresh::Skipped(SkipReason::InvalidPattern(e.to_string())),
        };

        let lines = match decode_lines(host.read_lines(self.options.max_lines)) {
            Ok(lines) => lines,
            Err(e) => {
                return Refresh::Skipped(SkipReason::DecodeFailure {
                    line: e.line,
                    valid_up_to: e.valid_up_to,
                });
            }
        };
        // Hosts may hand back more than asked for; only the tail is scanned
        let lines = tail_window(&lines, self.options.max_lines);

        let mut words = parse_buffer_pattern(lines, &pattern);
        sort_candidates(&mut words);

        let entry = CacheEntry {
            bufnr: context.bufnr,
            filetype: host.current_filetype(),
            candidates: words.into_iter().map(Candidate::new).collect(),
        };
        let refresh = Refresh::Updated {
            bufnr: entry.bufnr,
            candidates: entry.candidates.len(),
        };
        self.cache.insert(entry);
        refresh
    }

    /// Candidate lists of every cached buffer relevant to `context`. Never
    /// scans or mutates the cache.
    pub fn gather_candidates<'a>(&'a self, host: &dyn Host, context: &Context) -> GatherResult<'a> {
        let tab_bufnrs = host.visible_buffers_in_current_tab();
        let same_filetype = self.options.require_same_filetype;

        let sorted_candidates: Vec<&[Candidate]> = self
            .cache
            .entries()
            .filter(|entry| {
                !same_filetype
                    || context.filetypes.contains(&entry.filetype)
                    || context.same_filetypes.contains(&entry.filetype)
                    || tab_bufnrs.contains(&entry.bufnr)
            })
            .map(|entry| entry.candidates.as_slice())
            .collect();

        #[cfg(debug_assertions)]
        log::debug!(
            "Gathered {} of {} cached buffers for buffer {}",
            sorted_candidates.len(),
            self.cache.len(),
            context.bufnr
        );

        GatherResult { sorted_candidates }
    }
}

#[cfg(test)]
#[path = "source_tests.rs"]
mod source_tests;
