// LogSift - ui/theme.rs
//
// ANSI SGR sequences for severity colours and search-match styling.
// No dependencies on app state or business logic.

use crate::core::model::Severity;

/// Reset all attributes.
pub const RESET: &str = "\x1b[0m";

/// Style applied to matched spans (reverse video + bold).
pub const MATCH_STYLE: &str = "\x1b[1;7m";

/// Style for the dimmed timestamp column.
pub const TIMESTAMP_STYLE: &str = "\x1b[2m";

/// Colour for a given severity level.
pub fn severity_style(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "\x1b[1;91m", // Bold bright red
        Severity::Error => "\x1b[31m",      // Red
        Severity::Warn => "\x1b[33m",       // Yellow
        Severity::Info => "\x1b[37m",       // White
        Severity::Debug => "\x1b[90m",      // Grey
        Severity::Unknown => "\x1b[2;37m",  // Dim white
    }
}
