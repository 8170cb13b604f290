//! Flat-file history backend.
//!
//! The log holds one selected item per line, oldest first, and is only ever
//! appended to. Reading it back reverses the order, keeps the most recent
//! occurrence of each entry and caps the result. When the file grows past
//! twice the cap it is compacted with a write-to-temp-then-rename, so the
//! log is never left half written.
//!
//! # File Format
//!
//! ```text
//! cargo build
//! git status
//! cargo build
//! ```
//!
//! loads as `["cargo build", "git status"]`.

use crate::domain::error::{Result, SiftError};
use crate::storage::backend::HistoryBackend;
use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// History stored in a plain append-ordered text file.
#[derive(Debug)]
pub struct FileHistory {
    /// Path to the log file on disk.
    file_path: PathBuf,

    /// Entries kept after loading and compaction.
    max_entries: usize,

    /// Number of lines in the file, once known.
    lines_on_disk: Option<usize>,
}

impl FileHistory {
    /// Creates a backend for `file_path`. Nothing is read or created until
    /// the first [`load`](HistoryBackend::load) or
    /// [`record`](HistoryBackend::record).
    pub fn new(file_path: impl Into<PathBuf>, max_entries: usize) -> Self {
        Self {
            file_path: file_path.into(),
            max_entries,
            lines_on_disk: None,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Reads every non-empty line, oldest first. A missing file is empty.
    fn read_raw(&self) -> Result<Vec<Vec<u8>>> {
        let contents = match fs::read(&self.file_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = ?self.file_path, "no history file yet");
                return Ok(Vec::new());
            }
            Err(e) => return Err(self.error("read", &e)),
        };

        Ok(contents
            .split(|&b| b == b'\n')
            .filter(|line| !line.is_empty())
            .map(<[u8]>::to_vec)
            .collect())
    }

    /// Rewrites the file with only the entries [`load`](HistoryBackend::load)
    /// would return.
    fn compact(&mut self) -> Result<()> {
        let _span = tracing::debug_span!("history_compact", path = ?self.file_path).entered();

        let mut entries = newest_unique(self.read_raw()?, self.max_entries);
        entries.reverse();

        let mut contents = Vec::with_capacity(entries.iter().map(|e| e.len() + 1).sum());
        for entry in &entries {
            contents.extend_from_slice(entry);
            contents.push(b'\n');
        }

        let tmp_path = self.file_path.with_extension("tmp");

        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        fs::write(&tmp_path, contents).map_err(|e| self.error("write", &e))?;

        tracing::trace!("renaming temporary file to final location");
        fs::rename(&tmp_path, &self.file_path).map_err(|e| self.error("replace", &e))?;

        self.lines_on_disk = Some(entries.len());
        tracing::debug!(kept = entries.len(), "history compacted");
        Ok(())
    }

    fn error(&self, op: &str, e: &std::io::Error) -> SiftError {
        SiftError::History(format!("failed to {op} {}: {e}", self.file_path.display()))
    }
}

impl HistoryBackend for FileHistory {
    fn load(&mut self) -> Result<Vec<Vec<u8>>> {
        let _span = tracing::debug_span!("history_load", path = ?self.file_path).entered();

        let raw = self.read_raw()?;
        self.lines_on_disk = Some(raw.len());
        let entries = newest_unique(raw, self.max_entries);

        tracing::debug!(entries = entries.len(), "history loaded");
        Ok(entries)
    }

    fn record(&mut self, entry: &[u8]) -> Result<()> {
        let _span = tracing::debug_span!("history_record", bytes = entry.len()).entered();

        if entry.is_empty() || entry.contains(&b'\n') {
            tracing::debug!("entry not representable in the log, skipping");
            return Ok(());
        }

        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.error("create directory for", &e))?;
        }

        let lines = match self.lines_on_disk {
            Some(n) => n,
            None => self.read_raw()?.len(),
        };

        let mut line = Vec::with_capacity(entry.len() + 1);
        line.extend_from_slice(entry);
        line.push(b'\n');

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.file_path)
            .and_then(|mut file| file.write_all(&line))
            .map_err(|e| self.error("append to", &e))?;

        let lines = lines + 1;
        self.lines_on_disk = Some(lines);
        tracing::debug!(lines, "history entry appended");

        if lines > self.max_entries.saturating_mul(2) {
            self.compact()?;
        }
        Ok(())
    }
}

/// Reverses `raw` (oldest first) into most-recent-first order, keeping the
/// first occurrence of each entry, up to `max` entries.
fn newest_unique(raw: Vec<Vec<u8>>, max: usize) -> Vec<Vec<u8>> {
    let mut seen = HashSet::new();
    let mut entries = Vec::new();
    for entry in raw.into_iter().rev() {
        if entries.len() >= max {
            break;
        }
        if seen.insert(entry.clone()) {
            entries.push(entry);
        }
    }
    entries
}
