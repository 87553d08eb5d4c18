//! Keyword extraction from buffer lines

use std::collections::HashSet;

use regex::Regex;

/// A line that is not valid UTF-8
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeError {
    /// 1-based index within the lines that were read
    pub line: usize,
    /// Byte offset of the first invalid sequence in that line
    pub valid_up_to: usize,
}

/// Decodes raw lines, stopping at the first line that is not valid UTF-8.
pub fn decode_lines<I>(raw: I) -> Result<Vec<String>, DecodeError>
where
    I: IntoIterator<Item = Vec<u8>>,
{
    raw.into_iter()
        .enumerate()
        .map(|(idx, bytes)| {
            String::from_utf8(bytes).map_err(|e| DecodeError {
                line: idx + 1,
                valid_up_to: e.utf8_error().valid_up_to(),
            })
        })
        .collect()
}

/// Collects every non-overlapping match of `pattern` across `lines`.
///
/// Words that differ only by case collapse into one; the spelling seen first
/// (line order, then left to right) is kept.
pub fn parse_buffer_pattern<S: AsRef<str>>(lines: &[S], pattern: &Regex) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut words = Vec::new();

    for line in lines {
        for m in pattern.find_iter(line.as_ref()) {
            let word = m.as_str();
            if word.is_empty() {
                continue;
            }
            if seen.insert(word.to_lowercase()) {
                words.push(word.to_string());
            }
        }
    }

    words
}

/// Sorts words case-insensitively, keeping the relative order of words that
/// compare equal.
pub fn sort_candidates(words: &mut [String]) {
    words.sort_by_cached_key(|w| w.to_lowercase());
}

#[cfg(test)]
#[path = "extract_tests.rs"]
mod extract_tests;
