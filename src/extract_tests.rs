//! Tests for extract

use super::*;
use proptest::prelude::*;

fn word_pattern() -> Regex {
    Regex::new(r"[a-zA-Z_]\w*").unwrap()
}

#[test]
fn test_parse_collects_words_in_first_seen_order() {
    let lines = ["foo bar", "baz foo"];
    let words = parse_buffer_pattern(&lines, &word_pattern());
    assert_eq!(words, vec!["foo", "bar", "baz"]);
}

#[test]
fn test_parse_dedupes_case_insensitively_keeping_first_spelling() {
    let lines = ["Foo bar", "foo FOO baz"];
    let words = parse_buffer_pattern(&lines, &word_pattern());
    assert_eq!(words, vec!["Foo", "bar", "baz"]);
}

#[test]
fn test_parse_skips_non_matching_text() {
    let lines = ["123 + 456", "  ", "(x)"];
    let words = parse_buffer_pattern(&lines, &word_pattern());
    assert_eq!(words, vec!["x"]);
}

#[test]
fn test_parse_ignores_empty_matches() {
    let pattern = Regex::new(r"\w*").unwrap();
    let lines = ["a  b"];
    let words = parse_buffer_pattern(&lines, &pattern);
    assert_eq!(words, vec!["a", "b"]);
}

#[test]
fn test_parse_handles_unicode_words() {
    let pattern = Regex::new(r"\w+").unwrap();
    let lines = ["naïve café", "Café"];
    let words = parse_buffer_pattern(&lines, &pattern);
    assert_eq!(words, vec!["naïve", "café"]);
}

#[test]
fn test_sort_is_case_insensitive() {
    let mut words = vec!["beta".to_string(), "Alpha".to_string(), "gamma".to_string()];
    sort_candidates(&mut words);
    assert_eq!(words, vec!["Alpha", "beta", "gamma"]);
}

#[test]
fn test_sort_keeps_original_order_of_equal_keys() {
    let mut words = vec!["b".to_string(), "A".to_string(), "a".to_string()];
    sort_candidates(&mut words);
    assert_eq!(words, vec!["A", "a", "b"]);
}

#[test]
fn test_decode_lines_accepts_utf8() {
    let raw = vec![b"foo".to_vec(), "café".as_bytes().to_vec()];
    assert_eq!(decode_lines(raw).unwrap(), vec!["foo", "café"]);
}

#[test]
fn test_decode_lines_reports_first_bad_line() {
    let raw = vec![b"ok".to_vec(), b"ab\xffcd".to_vec(), b"\xfe".to_vec()];
    assert_eq!(
        decode_lines(raw),
        Err(DecodeError {
            line: 2,
            valid_up_to: 2
        })
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_parsed_words_have_no_case_insensitive_duplicates(
        lines in prop::collection::vec("[a-zA-Z ]{0,30}", 0..20)
    ) {
        let words = parse_buffer_pattern(&lines, &word_pattern());
        let lowered: HashSet<String> = words.iter().map(|w| w.to_lowercase()).collect();
        prop_assert_eq!(lowered.len(), words.len());
    }

    #[test]
    fn prop_every_word_occurs_in_some_line(
        lines in prop::collection::vec("[a-z0-9_ ]{0,30}", 0..20)
    ) {
        let words = parse_buffer_pattern(&lines, &word_pattern());
        for word in &words {
            prop_assert!(lines.iter().any(|l| l.contains(word.as_str())));
        }
    }

    #[test]
    fn prop_sorted_words_are_non_decreasing(
        mut words in prop::collection::vec("[a-zA-Z]{1,8}", 0..40)
    ) {
        sort_candidates(&mut words);
        for pair in words.windows(2) {
            prop_assert!(pair[0].to_lowercase() <= pair[1].to_lowercase());
        }
    }
}
