//! Line splitting and windowing over raw buffer bytes

use memchr::memchr_iter;

/// Splits raw content on `\n`.
///
/// A trailing newline ends the last line rather than starting an empty one.
/// A `\r` before the newline stays on the line so byte counts match the file;
/// use [`strip_cr`] to get the text.
pub fn split_lines(content: &[u8]) -> Vec<Vec<u8>> {
    let mut lines = Vec::new();
    let mut start = 0;

    for end in memchr_iter(b'\n', content) {
        lines.push(content[start..end].to_vec());
        start = end + 1;
    }

    if start < content.len() {
        lines.push(content[start..].to_vec());
    }

    lines
}

/// Line text without a CRLF carriage return
pub fn strip_cr(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Last `max_lines` entries of `lines`, or all of them when under the bound.
pub fn tail_window<T>(lines: &[T], max_lines: usize) -> &[T] {
    let skip = lines.len().saturating_sub(max_lines);
    &lines[skip..]
}
