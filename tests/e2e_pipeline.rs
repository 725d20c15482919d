// LogSift - tests/e2e_pipeline.rs
//
// End-to-end tests for the read -> parse -> filter -> highlight -> output
// pipeline, using the on-disk fixtures and the real `logsift` binary.

use logsift::app::state::{LogPanel, PerformancePanel};
use logsift::core::export;
use logsift::core::filter::{filter, FilterState};
use logsift::core::highlight::{annotate, Span};
use logsift::core::metrics::{average_duration, parse_duration_samples};
use logsift::core::model::{LogRecord, Severity};
use logsift::core::parser::{parse_content, ParseConfig};
use logsift::platform::fs::read_file_lossy;
use logsift::util::error::ParseError;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

// =============================================================================
// Helpers
// =============================================================================

/// Absolute path to the on-disk fixture files.
fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn load_service_log() -> Vec<LogRecord> {
    let content = read_file_lossy(&fixture("service.log")).unwrap();
    parse_content(&content, &ParseConfig::default()).records
}

fn messages<'a>(records: &[&'a LogRecord]) -> Vec<&'a str> {
    records.iter().map(|r| r.message.as_str()).collect()
}

// =============================================================================
// Library pipeline
// =============================================================================

#[test]
fn e2e_parses_fixture() {
    let content = read_file_lossy(&fixture("service.log")).unwrap();
    let result = parse_content(&content, &ParseConfig::default());

    assert_eq!(result.records.len(), 9);
    assert_eq!(result.errors.len(), 1);
    assert!(matches!(
        result.errors[0],
        ParseError::TimestampParse { line_number: 11, .. }
    ));
    assert_eq!(result.records[5].level, Severity::Warn);
    assert_eq!(result.records[5].message, "retrying request [id=42]");
    assert_eq!(result.records[7].level, Severity::Unknown);
    assert_eq!(result.records[8].level, Severity::Critical);
}

#[test]
fn e2e_level_filter_keeps_file_order() {
    let records = load_service_log();
    let state = FilterState::new([Severity::Error, Severity::Warn], "");
    let result = filter(&records, &state);

    assert_eq!(result.total_count, 9);
    assert_eq!(result.match_count, 4);
    let msgs = messages(&result.matched);
    assert!(msgs[0].starts_with("cache miss"));
    assert!(msgs[1].starts_with("payment failed"));
    assert!(msgs[2].starts_with("stack trace follows"));
    assert_eq!(msgs[3], "retrying request [id=42]");
    assert_eq!(result.count_for(Severity::Error), 2);
    assert_eq!(result.count_for(Severity::Warn), 2);
}

#[test]
fn e2e_search_with_metacharacters() {
    let records = load_service_log();
    let state = FilterState::all_levels().with_search("$5.00");
    let result = filter(&records, &state);
    assert_eq!(result.match_count, 1);

    let annotated = annotate(&result, &state);
    let hits: Vec<&Span<'_>> = annotated[0].spans.iter().filter(|s| s.is_matched()).collect();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].text, "$5.00");

    let state = FilterState::all_levels().with_search("[id=42]");
    assert_eq!(filter(&records, &state).match_count, 1);

    let state = FilterState::all_levels().with_search("(max $4.99)");
    assert_eq!(filter(&records, &state).match_count, 1);
}

#[test]
fn e2e_search_matches_message_not_level() {
    let records = load_service_log();
    let state = FilterState::all_levels().with_search("error");
    let result = filter(&records, &state);
    assert_eq!(messages(&result.matched), vec!["Error budget exhausted"]);
}

#[test]
fn e2e_search_reaches_continuation_lines() {
    let records = load_service_log();
    let state = FilterState::all_levels().with_search("ROUTER.RS");
    let result = filter(&records, &state);
    assert_eq!(result.match_count, 1);
    assert!(result.matched[0].message.starts_with("stack trace follows\n"));
}

#[test]
fn e2e_panel_copy_includes_continuations() {
    let mut panel = LogPanel::new(FilterState::errors_only());
    panel.extend(load_service_log());
    panel.set_search("stack");
    let copied = panel.copy_visible();
    assert_eq!(
        copied,
        "2024-03-02T08:01:10+00:00 ERROR stack trace follows\n    \
         at billing::charge (billing.rs:88)\n    at router::dispatch (router.rs:41)"
    );
}

#[test]
fn e2e_csv_export_to_file() {
    let records = load_service_log();
    let result = filter(&records, &FilterState::errors_and_warnings());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");
    let file = std::fs::File::create(&path).unwrap();
    let count = export::export_csv(&result.matched, file, &path).unwrap();
    assert_eq!(count, 5);

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 5);
    assert_eq!(&rows[4][1], "CRITICAL");
    assert!(rows[2][2].contains("billing.rs:88"));
}

#[test]
fn e2e_metrics_from_fixture() {
    let content = read_file_lossy(&fixture("durations.txt")).unwrap();
    let (samples, errors) = parse_duration_samples(&content);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].line_number(), 4);
    assert_eq!(samples.len(), 4);

    assert_eq!(average_duration(&samples, 3), Duration::from_millis(160));
    assert_eq!(average_duration(&samples, 10), Duration::from_millis(150));

    let mut panel = PerformancePanel::new(2);
    for s in samples {
        panel.record(s);
    }
    assert_eq!(panel.average(), Duration::from_millis(200));
}

// =============================================================================
// Binary
// =============================================================================

fn logsift(args: &[&str], config_dir: &Path) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_logsift"))
        .args(args)
        .arg("--config")
        .arg(config_dir.join("config.toml"))
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn e2e_cli_filter_text_output() {
    let dir = tempfile::tempdir().unwrap();
    let log = fixture("service.log");
    let output = logsift(
        &[
            "filter",
            log.to_str().unwrap(),
            "-l",
            "error",
            "-s",
            "$5.00",
            "--no-color",
            "--counts",
        ],
        dir.path(),
    );
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(
        stdout,
        "2024-03-02T08:01:10+00:00 ERROR    payment failed: cost: $5.00 exceeds limit (max $4.99)\n\
         1 of 9 records shown (ERROR: 1)\n"
    );
}

#[test]
fn e2e_cli_filter_json_output() {
    let dir = tempfile::tempdir().unwrap();
    let log = fixture("service.log");
    let output = logsift(
        &["filter", log.to_str().unwrap(), "--level", "warn,critical", "--format", "json"],
        dir.path(),
    );
    assert!(output.status.success());

    let records: Vec<LogRecord> = serde_json::from_slice(&output.stdout).unwrap();
    let levels: Vec<Severity> = records.iter().map(|r| r.level).collect();
    assert_eq!(levels, vec![Severity::Warn, Severity::Warn, Severity::Critical]);
}

#[test]
fn e2e_cli_config_default_levels() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[filter]\nlevels = [\"debug\"]\n[output]\ncolor = false\n",
    )
    .unwrap();
    let log = fixture("service.log");
    let output = logsift(&["filter", log.to_str().unwrap()], dir.path());
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 1);
    assert!(stdout.contains("heartbeat ok"));
}

#[test]
fn e2e_cli_rejects_unknown_level() {
    let dir = tempfile::tempdir().unwrap();
    let log = fixture("service.log");
    let output = logsift(&["filter", log.to_str().unwrap(), "-l", "loud"], dir.path());
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown level 'loud'"));
}

#[test]
fn e2e_cli_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = logsift(&["filter", "/nonexistent/logsift/none.log"], dir.path());
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn e2e_cli_metrics() {
    let dir = tempfile::tempdir().unwrap();
    let samples = fixture("durations.txt");
    let output = logsift(&["metrics", samples.to_str().unwrap(), "-w", "2"], dir.path());
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("samples: 2 (window 2)\naverage: 200 ms\n"));
    assert!(stdout.contains("latest:  300 ms"));
}

#[test]
fn e2e_cli_metrics_rejects_window_out_of_range() {
    let dir = tempfile::tempdir().unwrap();
    let samples = fixture("durations.txt");
    for window in ["0", "10001"] {
        let output = logsift(&["metrics", samples.to_str().unwrap(), "-w", window], dir.path());
        assert!(!output.status.success(), "window {window} accepted");
        assert!(String::from_utf8_lossy(&output.stderr).contains("window must be"));
    }
}

#[test]
fn e2e_cli_metrics_full_window_at_limit() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("many.txt");
    // 12 000 samples: 2 000 of 1 ms followed by 10 000 of 3 ms.
    let mut content = "1\n".repeat(2_000);
    content.push_str(&"3\n".repeat(10_000));
    std::fs::write(&path, content).unwrap();

    let output = logsift(&["metrics", path.to_str().unwrap(), "-w", "10000"], dir.path());
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("samples: 10000 (window 10000)\naverage: 3 ms\n"));
}

#[test]
fn e2e_cli_unparseable_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.toml"), "[metrics\nwindow = ").unwrap();
    let samples = fixture("durations.txt");
    let output = logsift(&["metrics", samples.to_str().unwrap()], dir.path());
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Configuration error"));
}

#[test]
fn e2e_cli_file_without_records_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garbage.log");
    std::fs::write(&path, "not a log line\n").unwrap();

    let output = logsift(&["filter", path.to_str().unwrap()], dir.path());
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Parse error: line 1"));

    let output = logsift(&["metrics", path.to_str().unwrap()], dir.path());
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Parse error: line 1"));
}
