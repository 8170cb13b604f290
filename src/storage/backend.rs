//! History backend abstraction.
//!
//! This module defines the [`HistoryBackend`] trait that the recency hook
//! reads from and writes to. Keeping it a trait lets tests and embedders
//! substitute an in-memory store for the on-disk log.
//!
//! The trait is deliberately small: the hook only ever needs the whole list
//! once at startup and one append per confirmed selection.

use crate::domain::error::Result;

/// Persistent store of previously selected item texts.
///
/// # Implementations
///
/// - [`FileHistory`](crate::storage::FileHistory): flat append-ordered log file (default)
///
/// # Examples
///
/// ```no_run
/// use sift::storage::{FileHistory, HistoryBackend};
///
/// let mut history = FileHistory::new("/tmp/sift-history", 100);
/// let recent = history.load()?;
/// history.record(b"cargo test")?;
/// # Ok::<(), sift::SiftError>(())
/// ```
pub trait HistoryBackend: Send {
    /// Returns stored entries, most recent first, without duplicates.
    ///
    /// # Errors
    ///
    /// Returns an error if the store exists but cannot be read.
    fn load(&mut self) -> Result<Vec<Vec<u8>>>;

    /// Records `entry` as the most recent selection.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn record(&mut self, entry: &[u8]) -> Result<()>;
}
