// LogSift - ui/mod.rs
//
// UI layer: terminal presentation only.
// Dependencies: core (read-only models).
// Must NOT depend on: platform, app, direct I/O.

pub mod terminal;
pub mod theme;
