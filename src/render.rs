//! Plain-text and JSON rendering of gathered candidates

use crate::source::{GatherResult, SOURCE_MARK};

/// One line per buffer list: the source mark followed by its words
pub fn render_text(result: &GatherResult<'_>) -> String {
    result
        .sorted_candidates
        .iter()
        .map(|list| {
            let mut line = String::from(SOURCE_MARK);
            for candidate in list.iter() {
                line.push(' ');
                line.push_str(&candidate.word);
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_json(result: &GatherResult<'_>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(result)
}
