//! Keyword pattern resolution
//!
//! A keyword pattern decides which substrings of a buffer count as words for
//! a filetype. Resolution sits behind [`KeywordPatternResolver`] so an editor
//! with its own pattern rules can supply them instead of the built-in table.

use std::collections::HashMap;

use regex::Regex;
use serde::Deserialize;

use crate::error::BufferSourceError;

/// Fallback key used when no filetype-specific pattern exists
pub const DEFAULT_FILETYPE_KEY: &str = "_";

/// Filetype to pattern source, as written in the config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct KeywordPatterns(HashMap<String, String>);

impl KeywordPatterns {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, filetype: impl Into<String>, pattern: impl Into<String>) {
        self.0.insert(filetype.into(), pattern.into());
    }

    pub fn get(&self, filetype: &str) -> Option<&str> {
        self.0.get(filetype).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub trait KeywordPatternResolver {
    /// Pattern for `filetype`, preferring entries from `configs`
    fn resolve(
        &self,
        filetype: &str,
        configs: &KeywordPatterns,
    ) -> Result<Regex, BufferSourceError>;
}

const LISP_SYMBOL: &str = r"[\w!$%&*+/:<=>?@^~-]+";
const HYPHENATED: &str = r"[\w-]+";

const BUILTIN_PATTERNS: &[(&str, &str)] = &[
    (DEFAULT_FILETYPE_KEY, r"[a-zA-Z_]\w*"),
    ("lisp", LISP_SYMBOL),
    ("scheme", LISP_SYMBOL),
    ("clojure", LISP_SYMBOL),
    ("racket", LISP_SYMBOL),
    ("css", HYPHENATED),
    ("scss", HYPHENATED),
    ("less", HYPHENATED),
    ("vim", r"[a-zA-Z_][\w#:]*"),
    ("html", r"[\w:-]+"),
    ("xml", r"[\w:-]+"),
];

fn builtin(filetype: &str) -> Option<&'static str> {
    BUILTIN_PATTERNS
        .iter()
        .find(|(ft, _)| *ft == filetype)
        .map(|(_, pattern)| *pattern)
}

/// Built-in resolver: user config first, then the built-in table, trying the
/// whole filetype, each dotted component, and finally the `_` fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPatternResolver;

impl DefaultPatternResolver {
    pub fn new() -> Self {
        Self
    }

    /// Pattern source chosen for `filetype`, before compilation
    pub fn pattern_source<'a>(&self, filetype: &str, configs: &'a KeywordPatterns) -> &'a str {
        let lookup = |key: &str| configs.get(key).or_else(|| builtin(key));

        let compound = filetype.contains('.').then(|| filetype.split('.'));

        lookup(filetype)
            .or_else(|| compound.into_iter().flatten().find_map(lookup))
            .or_else(|| lookup(DEFAULT_FILETYPE_KEY))
            .unwrap_or(BUILTIN_PATTERNS[0].1)
    }
}

impl KeywordPatternResolver for DefaultPatternResolver {
    fn resolve(
        &self,
        filetype: &str,
        configs: &KeywordPatterns,
    ) -> Result<Regex, BufferSourceError> {
        let source = self.pattern_source(filetype, configs);
        Regex::new(source).map_err(|source| BufferSourceError::InvalidPattern {
            filetype: filetype.to_string(),
            source,
        })
    }
}
