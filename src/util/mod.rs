// LogSift - util/mod.rs
//
// Shared utilities: error types, logging, constants.

pub mod constants;
pub mod error;
pub mod logging;
