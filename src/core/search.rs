// LogSift - core/search.rs
//
// Literal, case-insensitive search matcher shared by filtering and
// highlighting so both always agree on what "matches" means.
// Core layer: pure logic, no I/O or UI dependencies.
//
// User search text is never pattern syntax. It is passed through
// `regex::escape` before compilation, so `. * + ? ^ $ { } ( ) | [ ] \`
// only ever match themselves.

use crate::util::constants;
use regex::{Regex, RegexBuilder};
use std::ops::Range;

/// A compiled search needle.
///
/// Construction never fails: if the escaped needle cannot be compiled
/// (too long, or over the regex size limit) a char-wise literal scan with
/// the same semantics is used instead.
#[derive(Debug, Clone)]
pub struct SearchPattern {
    text: String,
    matcher: Matcher,
}

#[derive(Debug, Clone)]
enum Matcher {
    /// Empty search text: matches every haystack, finds no ranges.
    Everything,
    /// Escaped, case-insensitive regex.
    Regex(Regex),
    /// Fallback case-insensitive literal scan.
    Literal,
}

impl SearchPattern {
    pub fn new(text: &str) -> Self {
        let matcher = if text.is_empty() {
            Matcher::Everything
        } else if text.len() > constants::MAX_SEARCH_PATTERN_LENGTH {
            tracing::warn!(
                length = text.len(),
                max = constants::MAX_SEARCH_PATTERN_LENGTH,
                "Search text too long for regex; using literal scan"
            );
            Matcher::Literal
        } else {
            match RegexBuilder::new(&regex::escape(text))
                .case_insensitive(true)
                .size_limit(constants::SEARCH_REGEX_SIZE_LIMIT)
                .build()
            {
                Ok(re) => Matcher::Regex(re),
                Err(e) => {
                    tracing::warn!(error = %e, "Search regex failed to compile; using literal scan");
                    Matcher::Literal
                }
            }
        };

        Self {
            text: text.to_string(),
            matcher,
        }
    }

    /// The original, unescaped search text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// True if the search text is empty (matches everything).
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// True if `haystack` contains the search text case-insensitively.
    /// An empty pattern matches every haystack.
    pub fn is_match(&self, haystack: &str) -> bool {
        match &self.matcher {
            Matcher::Everything => true,
            Matcher::Regex(re) => re.is_match(haystack),
            Matcher::Literal => literal_match_from(haystack, &self.text, 0).is_some(),
        }
    }

    /// Byte ranges of every non-overlapping occurrence, leftmost first.
    /// Each range lies on char boundaries of `haystack`.
    pub fn find_ranges(&self, haystack: &str) -> Vec<Range<usize>> {
        match &self.matcher {
            Matcher::Everything => Vec::new(),
            Matcher::Regex(re) => re.find_iter(haystack).map(|m| m.range()).collect(),
            Matcher::Literal => {
                let mut ranges = Vec::new();
                let mut pos = 0;
                while let Some(range) = literal_match_from(haystack, &self.text, pos) {
                    pos = range.end;
                    ranges.push(range);
                }
                ranges
            }
        }
    }
}

/// Find the first case-insensitive occurrence of `needle` at or after `from`.
fn literal_match_from(haystack: &str, needle: &str, from: usize) -> Option<Range<usize>> {
    haystack[from..]
        .char_indices()
        .map(|(offset, _)| from + offset)
        .find_map(|start| literal_match_at(haystack, start, needle).map(|end| start..end))
}

/// If `needle` occurs at byte `start`, return the end offset of the occurrence.
fn literal_match_at(haystack: &str, start: usize, needle: &str) -> Option<usize> {
    let mut hay = haystack[start..].chars();
    let mut end = start;
    for n in needle.chars() {
        let h = hay.next()?;
        if !chars_eq_ignore_case(h, n) {
            return None;
        }
        end += h.len_utf8();
    }
    Some(end)
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}
