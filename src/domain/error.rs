//! Error types for sift.
//!
//! This module defines the centralized error type [`SiftError`] and a type alias
//! [`Result`] used throughout the crate. All errors are implemented using the
//! `thiserror` crate for automatic `Error` trait implementation.
//!
//! Most conditions inside the filter engine are not errors at all: an
//! over-long query is silently rejected, and a read failure on the input is
//! treated as end of input. What remains here are startup and persistence
//! failures.

use thiserror::Error;

/// The main error type for sift operations.
///
/// # Examples
///
/// ```
/// use sift::SiftError;
///
/// fn validate() -> Result<(), SiftError> {
///     Err(SiftError::Config("window_size must be positive".to_string()))
/// }
/// assert!(validate().is_err());
/// ```
#[derive(Debug, Error)]
pub enum SiftError {
    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations, including terminal
    /// writes performed through crossterm.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file is missing or malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reading or writing the recency log failed.
    #[error("History error: {0}")]
    History(String),

    /// The terminal could not be prepared for interactive use.
    #[error("Terminal error: {0}")]
    Terminal(String),
}

/// A specialized `Result` type for sift operations.
pub type Result<T> = std::result::Result<T, SiftError>;
