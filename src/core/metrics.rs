// LogSift - core/metrics.rs
//
// Duration averaging for the performance readout.
// Core layer: pure logic, no I/O or UI dependencies.

use crate::util::error::ParseError;
use std::time::Duration;

/// Mean of the last `window` samples (all of them if fewer exist).
///
/// Returns `Duration::ZERO` for no samples or a zero window.
pub fn average_duration(samples: &[Duration], window: usize) -> Duration {
    let tail = tail_window(samples, window);
    if tail.is_empty() {
        return Duration::ZERO;
    }
    let total: u128 = tail.iter().map(Duration::as_nanos).sum();
    nanos_to_duration(total / tail.len() as u128)
}

/// Count, mean, min, max and latest over a trailing sample window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DurationSummary {
    pub count: usize,
    pub mean: Duration,
    pub min: Duration,
    pub max: Duration,
    pub latest: Duration,
}

impl DurationSummary {
    /// Summarise the last `window` samples. An empty window gives all zeros.
    pub fn from_samples(samples: &[Duration], window: usize) -> Self {
        let tail = tail_window(samples, window);
        let (Some(min), Some(max), Some(latest)) =
            (tail.iter().min(), tail.iter().max(), tail.last())
        else {
            return Self::default();
        };
        Self {
            count: tail.len(),
            mean: average_duration(tail, tail.len()),
            min: *min,
            max: *max,
            latest: *latest,
        }
    }
}

fn tail_window(samples: &[Duration], window: usize) -> &[Duration] {
    &samples[samples.len().saturating_sub(window)..]
}

fn nanos_to_duration(nanos: u128) -> Duration {
    let secs = nanos / 1_000_000_000;
    let sub = (nanos % 1_000_000_000) as u32;
    match u64::try_from(secs) {
        Ok(secs) => Duration::new(secs, sub),
        Err(_) => Duration::MAX,
    }
}

/// Parse one millisecond sample per line.
///
/// Accepts integers or decimals with an optional `ms` suffix. Blank lines
/// and lines starting with `#` are skipped; anything else that fails to
/// parse is reported and skipped.
pub fn parse_duration_samples(content: &str) -> (Vec<Duration>, Vec<ParseError>) {
    let mut samples = Vec::new();
    let mut errors = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let number = line.strip_suffix("ms").unwrap_or(line).trim_end();
        match number.parse::<f64>() {
            Ok(ms) if ms.is_finite() && ms >= 0.0 => {
                // `as` saturates for values beyond u64 nanoseconds.
                samples.push(Duration::from_nanos((ms * 1_000_000.0).round() as u64));
            }
            _ => errors.push(ParseError::LineParse {
                line_number: idx as u64 + 1,
                reason: format!("'{line}' is not a non-negative millisecond value"),
            }),
        }
    }

    tracing::debug!(
        samples = samples.len(),
        errors = errors.len(),
        "Duration samples parsed"
    );
    (samples, errors)
}
