//! Infrastructure layer for filesystem and environment interactions.
//!
//! This module resolves where sift keeps its configuration, history and log
//! files on the host platform.

pub mod paths;

pub use paths::{config_dir, data_dir, default_config_path, default_history_path, log_path};
