//! Actions representing side effects to be executed by the main loop.
//!
//! The event handler never touches the terminal or stdout. It returns a
//! `Vec<Action>` after each event and the main loop in `main.rs` carries
//! them out in order.
//!
//! # Example
//!
//! ```rust
//! use sift::app::Action;
//!
//! let actions = vec![Action::Relayout, Action::Emit(b"src/lib.rs".to_vec())];
//! assert_eq!(actions.len(), 2);
//! ```

/// Commands representing side effects for the main loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// The user confirmed a choice; write these bytes plus `\n` to stdout
    /// and exit successfully.
    Emit(Vec<u8>),

    /// The user cancelled; exit successfully without output.
    Quit,

    /// Input ended without a single usable line; exit with failure.
    NoItems,

    /// The number of filtered entries changed, so the whole frame must be
    /// redrawn rather than patched.
    Relayout,
}
