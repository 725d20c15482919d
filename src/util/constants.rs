// LogSift - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "LogSift";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "LogSift";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Filtering
// =============================================================================

/// Record count at which `filter` switches to the rayon parallel path.
///
/// Below this the per-record predicate is cheaper than the thread-pool
/// dispatch. The parallel path preserves input order, so the result is the
/// same either way.
pub const PARALLEL_FILTER_THRESHOLD: usize = 50_000;

/// Longest search text compiled into a regex.
///
/// Longer needles use the char-wise literal scan instead, which keeps
/// pathological input from hitting the regex compiler's size limit.
pub const MAX_SEARCH_PATTERN_LENGTH: usize = 4_096;

/// Compiled-program size limit handed to `RegexBuilder` for search patterns.
pub const SEARCH_REGEX_SIZE_LIMIT: usize = 10 * 1024 * 1024; // 10 MB

// =============================================================================
// Parsing limits
// =============================================================================

/// Maximum size of a single record message in bytes. Continuation lines
/// stop being appended once a message reaches this size.
pub const DEFAULT_MAX_MESSAGE_SIZE: usize = 64 * 1024; // 64 KB

/// Maximum number of parse errors tracked per file before suppression.
pub const MAX_PARSE_ERRORS: usize = 1_000;

/// File size threshold in bytes above which files are memory-mapped.
pub const LARGE_FILE_THRESHOLD: u64 = 100 * 1024 * 1024; // 100 MB

// =============================================================================
// Metrics
// =============================================================================

/// Default number of trailing samples averaged by the metrics readout.
pub const DEFAULT_METRICS_WINDOW: usize = 10;

/// Minimum configurable metrics window.
pub const MIN_METRICS_WINDOW: usize = 1;

/// Maximum configurable metrics window.
pub const MAX_METRICS_WINDOW: usize = 10_000;

/// Maximum number of duration samples retained by `PerformancePanel`.
/// Oldest samples are evicted first.
pub const MAX_DURATION_SAMPLES: usize = MAX_METRICS_WINDOW;

// =============================================================================
// Copy / export
// =============================================================================

/// Maximum number of records included in a single "copy visible" operation.
pub const MAX_CLIPBOARD_ENTRIES: usize = 10_000;

/// Maximum number of records that can be exported in a single operation.
pub const MAX_EXPORT_ENTRIES: usize = 5_000_000;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Maximum length of a log line included in debug output.
pub const DEBUG_MAX_LINE_PREVIEW: usize = 200;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
