//! Core library for the `regiondash` CLI.
//!
//! Consumes a stream of per-region aggregate statistics from a distributed
//! load-test engine, renders them on a live terminal dashboard, and writes
//! a console summary plus an optional JSON export once the run ends. The
//! binary wires these pieces together in [`entry`].
pub mod args;
pub mod config;
pub mod engine;
pub mod entry;
pub mod error;
pub mod logger;
pub mod monitor;
pub mod report;
pub mod shutdown;
pub mod shutdown_handlers;
pub mod snapshot;
pub mod ui;
