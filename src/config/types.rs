// Configuration type definitions

use std::collections::HashMap;

use serde::Deserialize;

use crate::pattern::KeywordPatterns;

pub const DEFAULT_SIZE_LIMIT: usize = 1_000_000;
pub const DEFAULT_MAX_LINES: usize = 5000;

/// Buffer source configuration section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BufferConfig {
    /// Only offer words from buffers of a matching filetype or visible in the
    /// current tab
    #[serde(default = "default_require_same_filetype")]
    pub require_same_filetype: bool,
    /// Buffers larger than this many bytes are not rescanned
    #[serde(default = "default_size_limit")]
    pub size_limit: usize,
    /// Only the last `max_lines` lines of a buffer are scanned
    #[serde(default = "default_max_lines")]
    pub max_lines: usize,
}

fn default_require_same_filetype() -> bool {
    true
}

fn default_size_limit() -> usize {
    DEFAULT_SIZE_LIMIT
}

fn default_max_lines() -> usize {
    DEFAULT_MAX_LINES
}

impl Default for BufferConfig {
    fn default() -> Self {
        BufferConfig {
            require_same_filetype: true,
            size_limit: DEFAULT_SIZE_LIMIT,
            max_lines: DEFAULT_MAX_LINES,
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub buffer: BufferConfig,
    #[serde(default)]
    pub keyword_patterns: KeywordPatterns,
    /// Filetype to the filetypes whose buffers it should also draw words from
    #[serde(default)]
    pub same_filetypes: HashMap<String, Vec<String>>,
}

impl Config {
    pub fn same_filetypes_for(&self, filetype: &str) -> Vec<String> {
        self.same_filetypes
            .get(filetype)
            .cloned()
            .unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
