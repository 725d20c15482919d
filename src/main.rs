// LogSift - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading and validation
// 3. Logging initialisation (debug mode support)
// 4. Running the `filter` or `metrics` command

use logsift::app::state::{LogPanel, PerformancePanel};
use logsift::core::export;
use logsift::core::filter::FilterState;
use logsift::core::metrics;
use logsift::core::model::Severity;
use logsift::core::parser::{self, ParseConfig};
use logsift::platform::config::{self, AppConfig, PlatformPaths};
use logsift::platform::fs;
use logsift::ui::terminal;
use logsift::util;
use logsift::util::constants;
use logsift::util::error::{LogSiftError, ParseError, Result};

use clap::{Parser, Subcommand, ValueEnum};
use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};

/// LogSift - filter and search-highlight log files.
#[derive(Parser, Debug)]
#[command(name = "logsift", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Config file to use instead of the platform default.
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug", global = true)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show records of a log file matching level and search filters.
    Filter(FilterArgs),
    /// Average duration samples (one millisecond value per line).
    Metrics(MetricsArgs),
}

#[derive(clap::Args, Debug)]
struct FilterArgs {
    /// Log file to read.
    file: PathBuf,

    /// Levels to show (repeatable or comma-separated). Defaults to config, then all.
    #[arg(short = 'l', long = "level", value_delimiter = ',', value_parser = parse_level_arg)]
    levels: Vec<Severity>,

    /// Case-insensitive literal text to search for.
    #[arg(short = 's', long = "search")]
    search: Option<String>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Disable coloured output.
    #[arg(long)]
    no_color: bool,

    /// Print a match summary line after the records.
    #[arg(long)]
    counts: bool,
}

#[derive(clap::Args, Debug)]
struct MetricsArgs {
    /// File of duration samples in milliseconds.
    file: PathBuf,

    /// Number of trailing samples to average. Defaults to config.
    #[arg(short = 'w', long = "window", value_parser = parse_window_arg)]
    window: Option<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Csv,
}

fn parse_level_arg(s: &str) -> std::result::Result<Severity, String> {
    config::parse_level(s).ok_or_else(|| {
        format!("unknown level '{s}' (expected critical, error, warn, info, debug or unknown)")
    })
}

fn parse_window_arg(s: &str) -> std::result::Result<usize, String> {
    let range = constants::MIN_METRICS_WINDOW..=constants::MAX_METRICS_WINDOW;
    match s.parse::<usize>() {
        Ok(window) if range.contains(&window) => Ok(window),
        _ => Err(format!(
            "window must be a whole number in {}-{}",
            range.start(),
            range.end()
        )),
    }
}

fn main() {
    let cli = Cli::parse();

    let (app_config, config_warnings) = match &cli.config {
        Some(path) => match config::load_config_strict(path) {
            Ok(loaded) => loaded,
            Err(e) => {
                // Logging is not initialised yet.
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        },
        None => config::load_config(&PlatformPaths::resolve()),
    };

    util::logging::init(
        cli.debug,
        app_config.log_level.as_deref(),
        app_config.log_file.as_deref(),
    );

    tracing::info!(
        version = constants::APP_VERSION,
        debug = cli.debug,
        "LogSift starting"
    );
    for warning in &config_warnings {
        tracing::warn!(error = %warning, "Config warning");
    }

    let result = match cli.command {
        Command::Filter(args) => run_filter(args, &app_config),
        Command::Metrics(args) => run_metrics(args, &app_config),
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "Command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn stdout_err(source: std::io::Error) -> LogSiftError {
    LogSiftError::Io {
        path: PathBuf::from("<stdout>"),
        operation: "write",
        source,
    }
}

/// Reject input that has content but not a single usable line.
fn ensure_parsed(parsed: usize, errors: &[ParseError]) -> Result<()> {
    match errors.first() {
        Some(first) if parsed == 0 => Err(first.clone().into()),
        _ => Ok(()),
    }
}

fn run_filter(args: FilterArgs, app_config: &AppConfig) -> Result<()> {
    let content = fs::read_file_lossy(&args.file)?;
    let parsed = parser::parse_content(&content, &ParseConfig::default());
    for error in &parsed.errors {
        tracing::warn!(file = %args.file.display(), error = %error, "Skipped line");
    }
    ensure_parsed(parsed.records.len(), &parsed.errors)?;

    let levels = if args.levels.is_empty() {
        app_config.default_levels.clone()
    } else {
        args.levels
    };
    let search = args
        .search
        .unwrap_or_else(|| app_config.default_search.clone());

    let mut panel = LogPanel::new(FilterState::new(levels, &search));
    panel.extend(parsed.records);

    let view = panel.view();
    tracing::info!(
        total = view.total_count,
        matched = view.match_count,
        "Filter applied"
    );

    let stdout = std::io::stdout();
    let color = !args.no_color && app_config.color && stdout.is_terminal();
    let mut out = stdout.lock();
    let export_path = Path::new("<stdout>");

    match args.format {
        OutputFormat::Text => {
            for annotated in panel.annotated_view() {
                writeln!(out, "{}", terminal::render_record(&annotated, color))
                    .map_err(stdout_err)?;
            }
        }
        OutputFormat::Json => {
            export::export_json(&view.matched, &mut out, export_path)?;
            writeln!(out).map_err(stdout_err)?;
        }
        OutputFormat::Csv => {
            export::export_csv(&view.matched, &mut out, export_path)?;
        }
    }

    if args.counts {
        writeln!(out, "{}", terminal::render_counts(&view)).map_err(stdout_err)?;
    }
    out.flush().map_err(stdout_err)
}

fn run_metrics(args: MetricsArgs, app_config: &AppConfig) -> Result<()> {
    let content = fs::read_file_lossy(&args.file)?;
    let (samples, errors) = metrics::parse_duration_samples(&content);
    for error in &errors {
        tracing::warn!(file = %args.file.display(), error = %error, "Skipped sample");
    }
    ensure_parsed(samples.len(), &errors)?;

    let window = args.window.unwrap_or(app_config.metrics_window);
    let mut panel = PerformancePanel::new(window);
    for sample in samples {
        panel.record(sample);
    }

    let mut out = std::io::stdout().lock();
    writeln!(out, "{}", terminal::render_summary(&panel.summary(), panel.window()))
        .map_err(stdout_err)?;
    out.flush().map_err(stdout_err)
}
