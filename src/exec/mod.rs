// src/exec/mod.rs

//! Process execution layer.
//!
//! This module is responsible for actually running a batch artifact as a
//! child process and handing its standard output back to the engine.
//!
//! - [`backend`] provides the `ProcessBackend` trait the engine talks to, so
//!   tests can swap in backends that fail or panic on demand.
//! - [`shell`] holds `ShellBackend`, the production implementation built on
//!   `std::process::Command`.

pub mod backend;
pub mod shell;

pub use backend::{CapturedOutput, ProcessBackend};
pub use shell::ShellBackend;
