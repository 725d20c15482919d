// LogSift - core/filter.rs
//
// Level + text filter engine for log records.
// Both predicates are AND-combined.
// Core layer: pure logic, no I/O or UI dependencies.

use crate::core::model::{LogRecord, Severity};
use crate::core::search::SearchPattern;
use crate::util::constants;
use rayon::prelude::*;
use std::collections::{BTreeMap, HashSet};

/// Complete filter state, owned by the caller and passed on every query.
///
/// The state is a value: the builder methods return a new state rather
/// than mutating in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Severity levels to include. Empty = nothing is visible.
    pub enabled_levels: HashSet<Severity>,

    /// Substring text search (case-insensitive, literal). Empty = no text filter.
    pub search_text: String,
}

impl FilterState {
    pub fn new(enabled_levels: impl IntoIterator<Item = Severity>, search_text: &str) -> Self {
        Self {
            enabled_levels: enabled_levels.into_iter().collect(),
            search_text: search_text.to_string(),
        }
    }

    /// Every level enabled, no search text.
    pub fn all_levels() -> Self {
        Self::new(Severity::all().iter().copied(), "")
    }

    /// Quick-filter for errors only.
    pub fn errors_only() -> Self {
        Self::new([Severity::Critical, Severity::Error], "")
    }

    /// Quick-filter for errors and warnings.
    pub fn errors_and_warnings() -> Self {
        Self::new([Severity::Critical, Severity::Error, Severity::Warn], "")
    }

    /// Same levels, new search text.
    pub fn with_search(&self, search_text: &str) -> Self {
        Self {
            enabled_levels: self.enabled_levels.clone(),
            search_text: search_text.to_string(),
        }
    }

    /// Same search text, new level set.
    pub fn with_levels(&self, levels: impl IntoIterator<Item = Severity>) -> Self {
        Self {
            enabled_levels: levels.into_iter().collect(),
            search_text: self.search_text.clone(),
        }
    }

    /// Same state with `level` flipped on or off.
    pub fn toggling(&self, level: Severity) -> Self {
        let mut enabled_levels = self.enabled_levels.clone();
        if !enabled_levels.remove(&level) {
            enabled_levels.insert(level);
        }
        Self {
            enabled_levels,
            search_text: self.search_text.clone(),
        }
    }

    /// Compile the search text for reuse across filter and highlight.
    pub fn pattern(&self) -> SearchPattern {
        SearchPattern::new(&self.search_text)
    }
}

/// The visible subset of a record collection plus summary counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredResult<'a> {
    /// Matching records, in their original relative order.
    pub matched: Vec<&'a LogRecord>,

    /// `matched.len()`.
    pub match_count: usize,

    /// Number of records the filter was applied to.
    pub total_count: usize,

    /// Matched records per level. Levels with no matches are absent.
    pub level_counts: BTreeMap<Severity, usize>,
}

impl<'a> FilteredResult<'a> {
    /// Count for one level (0 if absent).
    pub fn count_for(&self, level: Severity) -> usize {
        self.level_counts.get(&level).copied().unwrap_or(0)
    }
}

/// Apply the filter state to `records`.
///
/// A record is included iff its level is enabled AND the search text is
/// empty or occurs in the message (case-insensitive, literal). Never fails.
pub fn filter<'a>(records: &'a [LogRecord], state: &FilterState) -> FilteredResult<'a> {
    filter_with(records, &state.enabled_levels, &state.pattern())
}

/// Like [`filter`] but with a pre-compiled search pattern.
pub fn filter_with<'a>(
    records: &'a [LogRecord],
    levels: &HashSet<Severity>,
    pattern: &SearchPattern,
) -> FilteredResult<'a> {
    let total_count = records.len();

    let matched: Vec<&LogRecord> = if levels.is_empty() {
        Vec::new()
    } else if total_count >= constants::PARALLEL_FILTER_THRESHOLD {
        tracing::debug!(records = total_count, "Filtering in parallel");
        records
            .par_iter()
            .filter(|r| matches_all(r, levels, pattern))
            .collect()
    } else {
        records
            .iter()
            .filter(|r| matches_all(r, levels, pattern))
            .collect()
    };

    let mut level_counts = BTreeMap::new();
    for record in &matched {
        *level_counts.entry(record.level).or_insert(0) += 1;
    }

    tracing::trace!(
        total = total_count,
        matched = matched.len(),
        search = pattern.text(),
        "Filter applied"
    );

    FilteredResult {
        match_count: matched.len(),
        matched,
        total_count,
        level_counts,
    }
}

/// Check if a single record matches all active predicates.
fn matches_all(record: &LogRecord, levels: &HashSet<Severity>, pattern: &SearchPattern) -> bool {
    levels.contains(&record.level) && pattern.is_match(&record.message)
}
