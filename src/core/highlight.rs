// LogSift - core/highlight.rs
//
// Search-match highlighting as a span list.
// Core layer: pure logic, no I/O or UI dependencies.
//
// Spans borrow slices of the original message and carry a tag, never
// markup. Renderers style `Matched` spans out-of-band and print the text
// itself literally.

use crate::core::filter::{FilterState, FilteredResult};
use crate::core::model::LogRecord;
use crate::core::search::SearchPattern;

/// Whether a span is ordinary text or a search hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanKind {
    Plain,
    Matched,
}

/// A contiguous slice of a message tagged as plain or matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span<'a> {
    pub text: &'a str,
    pub kind: SpanKind,
}

impl<'a> Span<'a> {
    pub fn plain(text: &'a str) -> Self {
        Self {
            text,
            kind: SpanKind::Plain,
        }
    }

    pub fn matched(text: &'a str) -> Self {
        Self {
            text,
            kind: SpanKind::Matched,
        }
    }

    pub fn is_matched(&self) -> bool {
        self.kind == SpanKind::Matched
    }
}

/// Split `message` into plain and matched spans for `search_text`.
///
/// The spans cover the message end-to-end with no gaps or overlaps.
/// An empty search text (or no hit) yields a single plain span equal to
/// the whole message.
pub fn highlight<'a>(message: &'a str, search_text: &str) -> Vec<Span<'a>> {
    highlight_with(&SearchPattern::new(search_text), message)
}

/// Like [`highlight`] but with a pre-compiled pattern, for highlighting
/// many messages against the same search.
pub fn highlight_with<'a>(pattern: &SearchPattern, message: &'a str) -> Vec<Span<'a>> {
    let ranges = pattern.find_ranges(message);
    if ranges.is_empty() {
        return vec![Span::plain(message)];
    }

    let mut spans = Vec::with_capacity(ranges.len() * 2 + 1);
    let mut last_end = 0;

    for range in ranges {
        if range.start > last_end {
            spans.push(Span::plain(&message[last_end..range.start]));
        }
        spans.push(Span::matched(&message[range.start..range.end]));
        last_end = range.end;
    }

    if last_end < message.len() {
        spans.push(Span::plain(&message[last_end..]));
    }

    spans
}

/// A matched record paired with the highlight spans of its message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedRecord<'a> {
    pub record: &'a LogRecord,
    pub spans: Vec<Span<'a>>,
}

/// Highlight every record of a filter result against the state's search text.
///
/// The search pattern is compiled once for the whole result.
pub fn annotate<'a>(result: &FilteredResult<'a>, state: &FilterState) -> Vec<AnnotatedRecord<'a>> {
    let pattern = state.pattern();
    result
        .matched
        .iter()
        .map(|&record| AnnotatedRecord {
            record,
            spans: highlight_with(&pattern, &record.message),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::filter::filter;
    use crate::core::model::Severity;
    use chrono::{TimeZone, Utc};

    fn joined(spans: &[Span<'_>]) -> String {
        spans.iter().map(|s| s.text).collect()
    }

    #[test]
    fn test_empty_search_single_plain_span() {
        assert_eq!(highlight("anything at all", ""), vec![Span::plain("anything at all")]);
        assert_eq!(highlight("", ""), vec![Span::plain("")]);
    }

    #[test]
    fn test_no_hit_single_plain_span() {
        assert_eq!(highlight("all quiet", "boom"), vec![Span::plain("all quiet")]);
    }

    #[test]
    fn test_case_insensitive_highlight() {
        let spans = highlight("ERROR occurred", "error");
        assert_eq!(spans, vec![Span::matched("ERROR"), Span::plain(" occurred")]);
    }

    #[test]
    fn test_every_occurrence_highlighted() {
        let spans = highlight("an error occurred, another Error here", "error");
        let hits: Vec<&str> = spans.iter().filter(|s| s.is_matched()).map(|s| s.text).collect();
        assert_eq!(hits, vec!["error", "Error"]);
        assert_eq!(joined(&spans), "an error occurred, another Error here");
    }

    #[test]
    fn test_metacharacters_matched_literally() {
        let spans = highlight("cost: $5.00", "$5.00");
        assert_eq!(spans, vec![Span::plain("cost: "), Span::matched("$5.00")]);

        let spans = highlight("path a.b.c and abc", "a.b");
        let hits: Vec<&str> = spans.iter().filter(|s| s.is_matched()).map(|s| s.text).collect();
        assert_eq!(hits, vec!["a.b"]);
    }

    #[test]
    fn test_whole_message_match() {
        assert_eq!(highlight("Boom", "boom"), vec![Span::matched("Boom")]);
    }

    #[test]
    fn test_markup_in_message_stays_plain_text() {
        let message = "<script>alert(1)</script> failed";
        let spans = highlight(message, "failed");
        assert_eq!(spans[0], Span::plain("<script>alert(1)</script> "));
        assert_eq!(joined(&spans), message);
    }

    #[test]
    fn test_annotate_pairs_records_with_spans() {
        let ts = Utc.timestamp_opt(0, 0).unwrap();
        let records = vec![
            LogRecord::new(ts, Severity::Error, "disk full on /var"),
            LogRecord::new(ts, Severity::Info, "disk check ok"),
            LogRecord::new(ts, Severity::Warn, "memory high"),
        ];
        let state = FilterState::all_levels().with_search("DISK");
        let result = filter(&records, &state);
        let annotated = annotate(&result, &state);

        assert_eq!(annotated.len(), 2);
        assert_eq!(annotated[0].record.message, "disk full on /var");
        assert_eq!(annotated[0].spans[0], Span::matched("disk"));
        assert_eq!(joined(&annotated[1].spans), "disk check ok");
    }
}
