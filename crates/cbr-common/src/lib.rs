//! Shared infrastructure for the CBR receiver workspace.
//!
//! Currently this is the logging layer: a [`logging::LogConfig`] built from
//! the environment (or a builder) and a single [`logging::init_logging`]
//! call made once at process start. Service crates construct their handles
//! explicitly and pass them down; nothing here is a global singleton.

pub mod logging;
