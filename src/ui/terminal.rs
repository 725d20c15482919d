// LogSift - ui/terminal.rs
//
// Renders annotated records and summaries as terminal text.
//
// Styling is applied out-of-band: SGR sequences come only from ui::theme,
// and every byte of log content passes through `escape_control` first, so
// a crafted message cannot emit its own terminal control sequences.

use crate::core::filter::FilteredResult;
use crate::core::highlight::{AnnotatedRecord, Span};
use crate::core::metrics::DurationSummary;
use crate::ui::theme;
use std::borrow::Cow;
use std::fmt::Write;
use std::time::Duration;

/// Replace control characters (other than newline and tab) with their
/// escaped form, e.g. ESC becomes `\u{1b}`.
pub fn escape_control(text: &str) -> Cow<'_, str> {
    if !text.chars().any(needs_escape) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        if needs_escape(c) {
            out.extend(c.escape_default());
        } else {
            out.push(c);
        }
    }
    Cow::Owned(out)
}

fn needs_escape(c: char) -> bool {
    c.is_control() && c != '\n' && c != '\t'
}

/// Render a span list. Matched spans are wrapped in the match style when
/// `color` is set; without colour the text is printed unmarked.
pub fn render_spans(spans: &[Span<'_>], color: bool) -> String {
    let mut out = String::new();
    for span in spans {
        let text = escape_control(span.text);
        if color && span.is_matched() {
            out.push_str(theme::MATCH_STYLE);
            out.push_str(&text);
            out.push_str(theme::RESET);
        } else {
            out.push_str(&text);
        }
    }
    out
}

/// Render one record as `timestamp LEVEL message`.
pub fn render_record(annotated: &AnnotatedRecord<'_>, color: bool) -> String {
    let record = annotated.record;
    let timestamp = record.timestamp.to_rfc3339();
    let message = render_spans(&annotated.spans, color);
    if color {
        format!(
            "{}{timestamp}{} {}{:<8}{} {message}",
            theme::TIMESTAMP_STYLE,
            theme::RESET,
            theme::severity_style(record.level),
            record.level.label(),
            theme::RESET,
        )
    } else {
        format!("{timestamp} {:<8} {message}", record.level.label())
    }
}

/// One-line match summary, e.g. `2 of 3 records shown (ERROR: 1, WARN: 1)`.
pub fn render_counts(result: &FilteredResult<'_>) -> String {
    let mut out = format!(
        "{} of {} records shown",
        result.match_count, result.total_count
    );
    if !result.level_counts.is_empty() {
        let parts: Vec<String> = result
            .level_counts
            .iter()
            .map(|(level, count)| format!("{level}: {count}"))
            .collect();
        let _ = write!(out, " ({})", parts.join(", "));
    }
    out
}

/// Multi-line metrics readout.
pub fn render_summary(summary: &DurationSummary, window: usize) -> String {
    format!(
        "samples: {} (window {window})\naverage: {}\nmin:     {}\nmax:     {}\nlatest:  {}",
        summary.count,
        format_millis(summary.mean),
        format_millis(summary.min),
        format_millis(summary.max),
        format_millis(summary.latest),
    )
}

/// Format a duration as milliseconds with up to three decimals.
pub fn format_millis(d: Duration) -> String {
    let ms = d.as_nanos() as f64 / 1_000_000.0;
    if ms.fract() == 0.0 {
        format!("{ms:.0} ms")
    } else {
        format!("{ms:.3} ms")
    }
}
