//! Text normalization and sentence-level deduplication.
//!
//! Feed markup frequently renders the same copy in sibling nodes, so a
//! captured body often contains every sentence twice. Dedup works at
//! sentence granularity and keeps the first occurrence of each.

use std::collections::HashSet;

/// Collapse all runs of whitespace to single spaces and trim the ends.
pub fn normalize_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Remove repeated sentences, preserving first-occurrence order.
///
/// Segments are cut after `.`, `!`, or `?` followed by whitespace.
/// Comparison is case-insensitive on the trimmed segment. The result is
/// already normalized, so applying this twice changes nothing.
pub fn dedupe_sentences(input: &str) -> String {
    let normalized = normalize_whitespace(input);
    if normalized.is_empty() {
        return normalized;
    }

    let mut segments: Vec<&str> = Vec::new();
    let mut start = 0;
    let mut prev_terminal = false;
    for (idx, ch) in normalized.char_indices() {
        if prev_terminal && ch == ' ' {
            segments.push(&normalized[start..idx]);
            start = idx + 1;
        }
        prev_terminal = matches!(ch, '.' | '!' | '?');
    }
    segments.push(&normalized[start..]);

    let mut seen = HashSet::new();
    let mut kept: Vec<&str> = Vec::new();
    for segment in segments {
        let trimmed = segment.trim();
        if trimmed.is_empty() {
            continue;
        }
        if seen.insert(trimmed.to_lowercase()) {
            kept.push(segment);
        }
    }

    kept.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  a \n\t b  c "), "a b c");
        assert_eq!(normalize_whitespace(""), "");
        assert_eq!(normalize_whitespace(" \n\t "), "");
    }

    #[test]
    fn test_dedupe_removes_repeats_keeps_order() {
        let input = "We launched. It was hard. We launched. Worth it!";
        assert_eq!(dedupe_sentences(input), "We launched. It was hard. Worth it!");
    }

    #[test]
    fn test_dedupe_case_insensitive() {
        let input = "Big news today. BIG NEWS TODAY. More below.";
        assert_eq!(dedupe_sentences(input), "Big news today. More below.");
    }

    #[test]
    fn test_dedupe_doubled_body() {
        let input = "Shipping season. We launched today! Shipping season. We launched today!";
        assert_eq!(dedupe_sentences(input), "Shipping season. We launched today!");
    }

    #[test]
    fn test_dedupe_idempotent() {
        let input = "One. Two? One. Three! \n Two?  ";
        let once = dedupe_sentences(input);
        assert_eq!(dedupe_sentences(&once), once);
    }

    #[test]
    fn test_dedupe_empty_input() {
        assert_eq!(dedupe_sentences(""), "");
        assert_eq!(dedupe_sentences("   \n "), "");
    }

    #[test]
    fn test_dedupe_no_terminals() {
        let input = "no sentence punctuation at all";
        assert_eq!(dedupe_sentences(input), input);
    }

    #[test]
    fn test_dedupe_normalizes_interior_whitespace() {
        let input = "First  sentence.\n\nSecond   sentence.";
        assert_eq!(dedupe_sentences(input), "First sentence. Second sentence.");
    }
}
