// LogSift - app/mod.rs
//
// Application layer: caller-owned state that drives the core engine.
// Dependencies: core layer.
// Must NOT depend on: ui, platform specifics.

pub mod state;
