// LogSift - platform/config.rs
//
// Platform config directory resolution and config.toml loading with
// startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::core::model::Severity;
use crate::util::constants;
use crate::util::error::{ConfigError, LogSiftError};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for LogSift configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/logsift/ or %APPDATA%\LogSift\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }

    /// Full path of config.toml inside the config directory.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[filter]` section.
    pub filter: FilterSection,
    /// `[metrics]` section.
    pub metrics: MetricsSection,
    /// `[output]` section.
    pub output: OutputSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[filter]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct FilterSection {
    /// Levels visible when no `--level` flag is given.
    pub levels: Option<Vec<String>>,
    /// Search text applied when no `--search` flag is given.
    pub search: Option<String>,
}

/// `[metrics]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct MetricsSection {
    /// Number of trailing samples averaged.
    pub window: Option<usize>,
}

/// `[output]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// Whether to style output with ANSI colours.
    pub color: Option<bool>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
    /// Log file path (empty = stderr only).
    pub file: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce warnings and fall back to defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    // -- Filter --
    pub default_levels: Vec<Severity>,
    pub default_search: String,

    // -- Metrics --
    pub metrics_window: usize,

    // -- Output --
    pub color: bool,

    // -- Logging --
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
    /// Log file path.
    pub log_file: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_levels: Severity::all().to_vec(),
            default_search: String::new(),
            metrics_window: constants::DEFAULT_METRICS_WINDOW,
            color: true,
            log_level: None,
            log_file: None,
        }
    }
}

/// Load and validate `config.toml` from the platform config directory.
pub fn load_config(paths: &PlatformPaths) -> (AppConfig, Vec<ConfigError>) {
    load_config_file(&paths.config_file())
}

/// Load a config file named explicitly on the command line.
///
/// A missing file still gives defaults, but a file that exists and cannot
/// be read or parsed is an error instead of a warning.
pub fn load_config_strict(
    config_path: &Path,
) -> Result<(AppConfig, Vec<ConfigError>), LogSiftError> {
    let (config, mut warnings) = load_config_file(config_path);
    let fatal = warnings
        .iter()
        .position(|w| matches!(w, ConfigError::Io { .. } | ConfigError::TomlParse { .. }));
    match fatal {
        Some(index) => Err(warnings.swap_remove(index).into()),
        None => Ok((config, warnings)),
    }
}

/// Load and validate a specific config file.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// A missing file gives defaults with no warnings (first run). An unreadable
/// or unparseable file gives defaults plus one warning: the program still
/// starts but the user is told why their settings were ignored.
pub fn load_config_file(config_path: &Path) -> (AppConfig, Vec<ConfigError>) {
    let mut warnings: Vec<ConfigError> = Vec::new();

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(config_path) {
        Ok(c) => c,
        Err(e) => {
            warnings.push(ConfigError::Io {
                path: config_path.to_path_buf(),
                source: e,
            });
            return (AppConfig::default(), warnings);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(e) => {
            warnings.push(ConfigError::TomlParse {
                path: config_path.to_path_buf(),
                source: e,
            });
            return (AppConfig::default(), warnings);
        }
    };

    tracing::info!(path = %config_path.display(), "Loaded config.toml");
    let config = validate(raw, &mut warnings);

    if !warnings.is_empty() {
        tracing::warn!(count = warnings.len(), "Config validation produced warnings");
    }
    (config, warnings)
}

/// Validate each field against named constants, accumulating all problems.
fn validate(raw: RawConfig, warnings: &mut Vec<ConfigError>) -> AppConfig {
    let mut config = AppConfig::default();

    // -- Filter: levels --
    if let Some(levels) = raw.filter.levels {
        let mut parsed = Vec::with_capacity(levels.len());
        for label in &levels {
            match parse_level(label) {
                Some(level) => {
                    if !parsed.contains(&level) {
                        parsed.push(level);
                    }
                }
                None => warnings.push(ConfigError::ValueOutOfRange {
                    field: "[filter] levels".to_string(),
                    value: label.clone(),
                    expected: "critical, error, warn, info, debug or unknown".to_string(),
                }),
            }
        }
        // All-invalid falls back to defaults; an explicit [] is honoured.
        if !parsed.is_empty() || levels.is_empty() {
            config.default_levels = parsed;
        }
    }

    // -- Filter: search --
    if let Some(search) = raw.filter.search {
        config.default_search = search;
    }

    // -- Metrics: window --
    if let Some(window) = raw.metrics.window {
        if (constants::MIN_METRICS_WINDOW..=constants::MAX_METRICS_WINDOW).contains(&window) {
            config.metrics_window = window;
        } else {
            warnings.push(ConfigError::ValueOutOfRange {
                field: "[metrics] window".to_string(),
                value: window.to_string(),
                expected: format!(
                    "{}-{} (using default {})",
                    constants::MIN_METRICS_WINDOW,
                    constants::MAX_METRICS_WINDOW,
                    constants::DEFAULT_METRICS_WINDOW
                ),
            });
        }
    }

    // -- Output: color --
    if let Some(color) = raw.output.color {
        config.color = color;
    }

    // -- Logging: level --
    if let Some(level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level);
        } else {
            warnings.push(ConfigError::ValueOutOfRange {
                field: "[logging] level".to_string(),
                value: level,
                expected: "error, warn, info, debug or trace".to_string(),
            });
        }
    }

    // -- Logging: file --
    if let Some(file) = raw.logging.file {
        if !file.is_empty() {
            config.log_file = Some(file);
        }
    }

    config
}

/// Strict level parsing for user input: unlike `Severity::from_label`,
/// an unrecognised label is rejected rather than mapped to `Unknown`.
pub fn parse_level(label: &str) -> Option<Severity> {
    match Severity::from_label(label) {
        Severity::Unknown if !label.trim().eq_ignore_ascii_case("unknown") => None,
        level => Some(level),
    }
}
