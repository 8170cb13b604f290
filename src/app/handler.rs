//! Event handling and state transition logic.
//!
//! This module implements the event handler that processes keyboard input,
//! ingestion ticks and terminal resizes, translating them into state changes
//! and action sequences.
//!
//! # Architecture
//!
//! 1. The main loop translates terminal events and reader batches into [`Event`]s
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` methods
//! 4. Actions are collected and returned for execution
//!
//! While input is still loading, only cancellation, resizes and further
//! input batches are processed; editing and navigation wait for `Ready`.

use crate::app::{Action, AppState};
use crate::domain::error::Result;

/// Events triggered by user input or the ingestion tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Lines drained from the reader this tick, plus its end-of-input flag.
    LinesReceived {
        lines: Vec<Vec<u8>>,
        eof: bool,
    },
    /// Appends a character to the query.
    Char(char),
    /// Appends pasted text to the query as one edit.
    Paste(String),
    /// Removes the last character of the query.
    Backspace,
    /// Removes the last word of the query.
    DeleteWord,
    /// Empties the query.
    ClearQuery,
    /// Moves the cursor up one row.
    MoveUp,
    /// Moves the cursor down one row.
    MoveDown,
    /// Moves the cursor up one window.
    PageUp,
    /// Moves the cursor down one window.
    PageDown,
    /// Moves the cursor to the first row.
    First,
    /// Moves the cursor to the last row.
    Last,
    /// Emits the selected item.
    Confirm,
    /// Exits without output.
    Cancel,
    /// The number of rows available for the list changed.
    Resize {
        window: usize,
    },
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// The boolean is `true` when the frame must be redrawn.
///
/// # Errors
///
/// Currently infallible; the `Result` leaves room for handlers that persist
/// state.
///
/// # Example
///
/// ```rust
/// use sift::app::{handle_event, Action, AppState, Event};
/// use sift::Config;
///
/// let mut state = AppState::new(&Config::default());
/// let (_, actions) = handle_event(&mut state, &Event::Cancel)?;
/// assert_eq!(actions, vec![Action::Quit]);
/// # Ok::<(), sift::SiftError>(())
/// ```
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::trace_span!("handle_event").entered();

    match event {
        Event::Cancel => {
            tracing::debug!("selection cancelled");
            return Ok((false, vec![Action::Quit]));
        }
        Event::LinesReceived { lines, eof } => {
            let absorbed = state.absorb(lines, *eof);
            if absorbed.became_ready && state.items().is_empty() {
                tracing::info!("no items available");
                return Ok((false, vec![Action::NoItems]));
            }
            let actions = if absorbed.count_changed {
                vec![Action::Relayout]
            } else {
                vec![]
            };
            return Ok((absorbed.changed(), actions));
        }
        Event::Resize { window } => {
            state.set_window_size(*window);
            return Ok((true, vec![Action::Relayout]));
        }
        _ => {}
    }

    if !state.ingestion().is_ready() {
        tracing::trace!(event = ?event, "ignored while loading");
        return Ok((false, vec![]));
    }

    let edit = |(changed, count_changed): (bool, bool)| {
        let actions = if count_changed {
            vec![Action::Relayout]
        } else {
            vec![]
        };
        (changed, actions)
    };

    let outcome = match event {
        Event::Char(c) => edit(state.edit_query(|q| q.push_char(*c))),
        Event::Paste(text) => {
            let text = text.replace(['\r', '\n'], " ");
            edit(state.edit_query(|q| q.append(text.as_bytes())))
        }
        Event::Backspace => edit(state.edit_query(|q| q.delete_last_codepoint())),
        Event::DeleteWord => edit(state.edit_query(|q| q.delete_last_word())),
        Event::ClearQuery => edit(state.edit_query(|q| q.clear())),
        Event::MoveUp => navigate(state, |s| s.move_by(-1)),
        Event::MoveDown => navigate(state, |s| s.move_by(1)),
        Event::PageUp => navigate(state, |s| s.move_page(false)),
        Event::PageDown => navigate(state, |s| s.move_page(true)),
        Event::First => navigate(state, AppState::move_to_first),
        Event::Last => navigate(state, AppState::move_to_last),
        Event::Confirm => match state.confirm() {
            Some(bytes) => (false, vec![Action::Emit(bytes)]),
            None => {
                tracing::debug!("nothing to confirm");
                (false, vec![])
            }
        },
        Event::Cancel | Event::LinesReceived { .. } | Event::Resize { .. } => (false, vec![]),
    };

    Ok(outcome)
}

/// Runs a cursor movement and reports whether it moved anything.
fn navigate(state: &mut AppState, movement: impl FnOnce(&mut AppState)) -> (bool, Vec<Action>) {
    let before = *state.selection();
    movement(state);
    (*state.selection() != before, vec![])
}
