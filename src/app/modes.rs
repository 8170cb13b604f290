//! Ingestion state machine.
//!
//! The application starts in [`IngestionState::Loading`] and moves to
//! [`IngestionState::Ready`] exactly once, when the input has ended and its
//! queue is drained. While loading, only cancellation is accepted.
//!
//! [`IngestionTracker`] owns the state and exposes only forward transitions,
//! so there is no way to return to `Loading` once `Ready` is reached.
//!
//! # Example
//!
//! ```rust
//! use sift::app::modes::{IngestionState, IngestionTracker};
//!
//! let mut tracker = IngestionTracker::new();
//! tracker.record_loaded(3);
//! assert_eq!(tracker.state(), IngestionState::Loading { items_loaded: 3 });
//! tracker.finish();
//! assert_eq!(tracker.state(), IngestionState::Ready);
//! ```

/// Whether input is still arriving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestionState {
    /// Input is still being read.
    ///
    /// Only cancellation is accepted. The count is displayed while waiting.
    Loading {
        /// Items appended to the item list so far.
        items_loaded: usize,
    },

    /// Input has ended and every queued line was processed. Terminal.
    Ready,
}

impl IngestionState {
    #[must_use]
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }
}

/// Owner of the ingestion state with forward-only transitions.
#[derive(Debug, Clone)]
pub struct IngestionTracker {
    state: IngestionState,
}

impl IngestionTracker {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: IngestionState::Loading { items_loaded: 0 },
        }
    }

    #[must_use]
    pub const fn state(&self) -> IngestionState {
        self.state
    }

    /// Counts newly appended items. Ignored once ready.
    pub fn record_loaded(&mut self, count: usize) {
        if let IngestionState::Loading { items_loaded } = &mut self.state {
            *items_loaded += count;
        }
    }

    /// Moves to `Ready`. Returns `true` only on the first call.
    pub fn finish(&mut self) -> bool {
        if self.state.is_ready() {
            return false;
        }
        tracing::debug!(state = ?self.state, "ingestion complete");
        self.state = IngestionState::Ready;
        true
    }
}

impl Default for IngestionTracker {
    fn default() -> Self {
        Self::new()
    }
}
