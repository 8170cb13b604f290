//! Platform directory resolution.
//!
//! Config lives under the platform config directory and history and logs
//! under the data directory, both in a `sift` subdirectory. When the
//! platform reports no home directory the current directory is used.

use std::path::PathBuf;

const APP_DIR: &str = "sift";

/// Returns the data directory for history and log files.
///
/// Typically `~/.local/share/sift` on Linux.
#[must_use]
pub fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Returns the configuration directory.
///
/// Typically `~/.config/sift` on Linux.
#[must_use]
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Default location of the configuration file.
#[must_use]
pub fn default_config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Default location of the selection history log.
#[must_use]
pub fn default_history_path() -> PathBuf {
    data_dir().join("history")
}

/// Location of the rotating log file.
#[must_use]
pub fn log_path() -> PathBuf {
    data_dir().join("sift.log")
}
