// LogSift - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no UI.
//
// These types are the shared vocabulary across all layers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Log Record
// =============================================================================

/// A single log event.
///
/// Records are never mutated by the filter engine; every operation takes
/// `&[LogRecord]` and derives a view. Collections are append-only: new
/// records go on the end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Wall-clock instant the event was logged, in UTC.
    pub timestamp: DateTime<Utc>,

    /// Severity level.
    pub level: Severity,

    /// Full message text, including any continuation lines.
    pub message: String,
}

impl LogRecord {
    pub fn new(timestamp: DateTime<Utc>, level: Severity, message: impl Into<String>) -> Self {
        Self {
            timestamp,
            level,
            message: message.into(),
        }
    }
}

// =============================================================================
// Severity
// =============================================================================

/// Normalised severity levels, ordered from most to least severe.
///
/// Any level string that does not map to a known variant becomes `Unknown`,
/// which is filtered like every other level: it only shows when enabled.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Critical,
    Error,
    Warn,
    Info,
    Debug,
    #[default]
    Unknown,
}

impl Severity {
    /// Returns all variants in display order (most severe first).
    pub fn all() -> &'static [Severity] {
        &[
            Severity::Critical,
            Severity::Error,
            Severity::Warn,
            Severity::Info,
            Severity::Debug,
            Severity::Unknown,
        ]
    }

    /// Map a raw level string (case-insensitive, common aliases) to a variant.
    ///
    /// Never fails: unrecognised strings map to `Unknown`.
    pub fn from_label(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "critical" | "crit" | "fatal" | "panic" | "ftl" => Severity::Critical,
            "error" | "err" | "erro" => Severity::Error,
            "warn" | "warning" | "wrn" => Severity::Warn,
            "info" | "information" | "inf" => Severity::Info,
            "debug" | "dbg" | "trace" | "trc" => Severity::Debug,
            _ => Severity::Unknown,
        }
    }

    /// Upper-case label for display and export.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Critical => "CRITICAL",
            Severity::Error => "ERROR",
            Severity::Warn => "WARN",
            Severity::Info => "INFO",
            Severity::Debug => "DEBUG",
            Severity::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
