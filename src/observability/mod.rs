//! Structured logging to a rotating file.
//!
//! Stdout carries the selected line and the terminal carries the interface,
//! so log output has nowhere else to go: events from the `tracing` macros
//! are formatted as plain text and appended to a size-rotated file.
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer → FileWriter → sift.log (+ 3 backups)
//! ```
//!
//! # Configuration
//!
//! Level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` in the config file or `--log-level`
//! 3. Default: `"info"`
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`file_writer`]: Rotating file writer with size-based rotation

pub mod file_writer;
mod init;

pub use file_writer::FileWriter;
pub use init::init_tracing;
