// LogSift - core/mod.rs
//
// Core business logic layer: the filter/highlight engine and its data model.
// Must NOT depend on: ui, platform, app, or do any I/O directly.

pub mod export;
pub mod filter;
pub mod highlight;
pub mod metrics;
pub mod model;
pub mod parser;
pub mod search;

pub use filter::{filter, FilterState, FilteredResult};
pub use highlight::{annotate, highlight, AnnotatedRecord, Span, SpanKind};
pub use metrics::{average_duration, DurationSummary};
pub use model::{LogRecord, Severity};
pub use search::SearchPattern;
