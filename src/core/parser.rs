// LogSift - core/parser.rs
//
// Line-oriented log parsing into LogRecords.
// Core layer: accepts file content as a string, never touches the filesystem.
//
// Line format:
//   <timestamp> <LEVEL> <message>
//   2024-01-15T10:30:00Z ERROR connection refused
//   2024-01-15T10:30:01.250+02:00 [WARN] retrying
//
// Lines that do not start with a timestamp are continuation lines
// (stack traces, wrapped output) and are appended to the previous record.

use crate::core::model::{LogRecord, Severity};
use crate::util::constants;
use crate::util::error::ParseError;
use chrono::{DateTime, NaiveDateTime, Utc};
use regex::Regex;
use std::sync::OnceLock;

/// Configuration for parsing operations.
#[derive(Debug, Clone)]
pub struct ParseConfig {
    pub max_message_size: usize,
    pub max_parse_errors: usize,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            max_message_size: constants::DEFAULT_MAX_MESSAGE_SIZE,
            max_parse_errors: constants::MAX_PARSE_ERRORS,
        }
    }
}

/// Result of parsing one log file.
#[derive(Debug, Default)]
pub struct ParseResult {
    /// Successfully parsed records, in file order.
    pub records: Vec<LogRecord>,
    /// Parse errors encountered (capped at `max_parse_errors`).
    pub errors: Vec<ParseError>,
    /// Total lines processed.
    pub lines_processed: u64,
}

fn line_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^(?P<timestamp>\d{4}-\d{2}-\d{2}T\S+)\s+\[?(?P<level>[A-Za-z]+)\]?:?(?:\s+(?P<message>.*))?$",
        )
        .expect("built-in line pattern is valid")
    })
}

/// Parse log file content into records.
///
/// Parsing is non-fatal: bad lines are recorded in `errors` and skipped.
pub fn parse_content(content: &str, config: &ParseConfig) -> ParseResult {
    let mut result = ParseResult::default();
    // Set after a header line is rejected so its continuation lines are
    // dropped with it instead of being glued onto the previous record.
    let mut skipping = false;

    for (line_idx, line) in content.lines().enumerate() {
        result.lines_processed += 1;
        let line_number = line_idx as u64 + 1;

        if line.trim().is_empty() {
            continue;
        }

        if let Some(caps) = line_pattern().captures(line) {
            let raw_ts = &caps["timestamp"];
            let Some(timestamp) = parse_timestamp(raw_ts) else {
                push_error(
                    &mut result.errors,
                    config,
                    ParseError::TimestampParse {
                        line_number,
                        raw_timestamp: raw_ts.to_string(),
                    },
                );
                skipping = true;
                continue;
            };

            skipping = false;
            let message = caps.name("message").map_or("", |m| m.as_str());
            result.records.push(LogRecord::new(
                timestamp,
                Severity::from_label(&caps["level"]),
                truncate_to(message, config.max_message_size),
            ));
        } else if skipping {
            continue;
        } else if let Some(last) = result.records.last_mut() {
            if last.message.len() < config.max_message_size {
                last.message.push('\n');
                last.message.push_str(line);
                if last.message.len() > config.max_message_size {
                    let cut = floor_char_boundary(&last.message, config.max_message_size);
                    last.message.truncate(cut);
                }
            }
        } else {
            push_error(
                &mut result.errors,
                config,
                ParseError::LineParse {
                    line_number,
                    reason: format!(
                        "continuation line before any record: '{}'",
                        preview(line)
                    ),
                },
            );
        }
    }

    tracing::debug!(
        lines = result.lines_processed,
        records = result.records.len(),
        errors = result.errors.len(),
        "Parsing complete"
    );
    result
}

/// Parse an RFC 3339 timestamp, falling back to a zone-less ISO 8601 form
/// interpreted as UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

fn push_error(errors: &mut Vec<ParseError>, config: &ParseConfig, error: ParseError) {
    if errors.len() < config.max_parse_errors {
        tracing::debug!(error = %error, "Parse error");
        errors.push(error);
    }
}

fn truncate_to(text: &str, max: usize) -> String {
    text[..floor_char_boundary(text, max)].to_string()
}

/// Largest char boundary `<= max`.
fn floor_char_boundary(text: &str, max: usize) -> usize {
    if max >= text.len() {
        return text.len();
    }
    (0..=max).rev().find(|&i| text.is_char_boundary(i)).unwrap_or(0)
}

fn preview(line: &str) -> &str {
    &line[..floor_char_boundary(line, constants::DEBUG_MAX_LINE_PREVIEW)]
}
