// LogSift - lib.rs
//
// Library entry point. The filter/highlight engine lives in `core`; the
// remaining layers exist for the `logsift` binary and integration tests.

pub mod app;
pub mod core;
pub mod platform;
pub mod ui;
pub mod util;
