// LogSift - app/state.rs
//
// Caller-owned panel state. Holds the record collection and the current
// FilterState value, and re-runs the pure core engine on every query
// instead of caching derived views.

use crate::core::filter::{self, FilterState, FilteredResult};
use crate::core::highlight::{self, AnnotatedRecord};
use crate::core::metrics::{self, DurationSummary};
use crate::core::model::{LogRecord, Severity};
use crate::util::constants;
use std::time::Duration;

/// Log viewer panel state.
///
/// The record collection is append-only: records can be pushed or the whole
/// collection cleared, never edited or removed individually.
#[derive(Debug, Clone)]
pub struct LogPanel {
    records: Vec<LogRecord>,
    filter_state: FilterState,
}

impl Default for LogPanel {
    fn default() -> Self {
        Self::new(FilterState::all_levels())
    }
}

impl LogPanel {
    pub fn new(filter_state: FilterState) -> Self {
        Self {
            records: Vec::new(),
            filter_state,
        }
    }

    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    pub fn filter_state(&self) -> &FilterState {
        &self.filter_state
    }

    pub fn push(&mut self, record: LogRecord) {
        self.records.push(record);
    }

    pub fn extend(&mut self, records: impl IntoIterator<Item = LogRecord>) {
        let before = self.records.len();
        self.records.extend(records);
        tracing::debug!(
            added = self.records.len() - before,
            total = self.records.len(),
            "Records appended"
        );
    }

    /// Drop every record. The filter state is kept.
    pub fn clear(&mut self) {
        tracing::debug!(cleared = self.records.len(), "Log panel cleared");
        self.records.clear();
    }

    pub fn set_search(&mut self, search_text: &str) {
        self.filter_state = self.filter_state.with_search(search_text);
    }

    pub fn set_levels(&mut self, levels: impl IntoIterator<Item = Severity>) {
        self.filter_state = self.filter_state.with_levels(levels);
    }

    pub fn toggle_level(&mut self, level: Severity) {
        self.filter_state = self.filter_state.toggling(level);
    }

    /// Current filtered view.
    pub fn view(&self) -> FilteredResult<'_> {
        filter::filter(&self.records, &self.filter_state)
    }

    /// Current filtered view with highlight spans per record.
    pub fn annotated_view(&self) -> Vec<AnnotatedRecord<'_>> {
        highlight::annotate(&self.view(), &self.filter_state)
    }

    /// Visible records as plain text, one `timestamp LEVEL message` line each.
    ///
    /// Capped at `MAX_CLIPBOARD_ENTRIES` records.
    pub fn copy_visible(&self) -> String {
        let view = self.view();
        if view.match_count > constants::MAX_CLIPBOARD_ENTRIES {
            tracing::warn!(
                visible = view.match_count,
                max = constants::MAX_CLIPBOARD_ENTRIES,
                "Copy truncated to clipboard limit"
            );
        }
        view.matched
            .iter()
            .take(constants::MAX_CLIPBOARD_ENTRIES)
            .map(|r| format!("{} {} {}", r.timestamp.to_rfc3339(), r.level, r.message))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Performance readout state: a bounded history of duration samples.
///
/// At least `MAX_DURATION_SAMPLES` samples are retained, more when the
/// window is larger, so the average always covers the full window.
#[derive(Debug, Clone)]
pub struct PerformancePanel {
    samples: Vec<Duration>,
    window: usize,
    capacity: usize,
}

impl Default for PerformancePanel {
    fn default() -> Self {
        Self::new(constants::DEFAULT_METRICS_WINDOW)
    }
}

impl PerformancePanel {
    pub fn new(window: usize) -> Self {
        Self {
            samples: Vec::new(),
            window,
            capacity: window.max(constants::MAX_DURATION_SAMPLES),
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn len(&self) -> usize {
        self.retained().len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Record one sample. The oldest samples beyond the capacity are evicted.
    pub fn record(&mut self, sample: Duration) {
        self.samples.push(sample);
        // Compact in batches so eviction stays amortised O(1).
        if self.samples.len() >= self.capacity * 2 {
            let excess = self.samples.len() - self.capacity;
            self.samples.drain(..excess);
        }
    }

    pub fn average(&self) -> Duration {
        metrics::average_duration(self.retained(), self.window)
    }

    pub fn summary(&self) -> DurationSummary {
        DurationSummary::from_samples(self.retained(), self.window)
    }

    pub fn reset(&mut self) {
        self.samples.clear();
    }

    fn retained(&self) -> &[Duration] {
        &self.samples[self.samples.len().saturating_sub(self.capacity)..]
    }
}
