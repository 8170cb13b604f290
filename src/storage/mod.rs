//! Storage layer for the selection history.
//!
//! This module persists which items the user picked and turns that history
//! into a post-filter hook that floats recent picks to the top.
//!
//! # Modules
//!
//! - `backend`: History trait abstraction for backend implementations
//! - `history`: Append-ordered log file implementation
//! - `recency`: Post-filter hook ranking items by history position

pub mod backend;
pub mod history;
pub mod recency;

pub use backend::HistoryBackend;
pub use history::FileHistory;
pub use recency::RecencyBoost;
