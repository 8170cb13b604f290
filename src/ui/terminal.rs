//! Terminal session management.
//!
//! The interface is drawn on stderr so stdout stays free for the selected
//! line. Keyboard input comes from the controlling terminal, which crossterm
//! opens directly when stdin is a pipe.

use crate::domain::error::{Result, SiftError};
use crossterm::{
    cursor::Show,
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, BufWriter, Stderr, Write};

/// Raw mode plus alternate screen, restored on drop.
///
/// Restoration also happens when the main loop returns early with an error,
/// so the user's shell is never left in raw mode.
pub struct TerminalGuard {
    out: BufWriter<Stderr>,
}

impl TerminalGuard {
    /// Switches the terminal into interactive mode.
    ///
    /// # Errors
    ///
    /// Returns [`SiftError::Terminal`] if there is no usable terminal.
    pub fn enter() -> Result<Self> {
        enable_raw_mode().map_err(|e| SiftError::Terminal(format!("failed to enable raw mode: {e}")))?;

        let mut out = BufWriter::new(io::stderr());
        if let Err(e) = execute!(out, EnterAlternateScreen, EnableBracketedPaste) {
            let _ = disable_raw_mode();
            return Err(SiftError::Terminal(format!("failed to set up screen: {e}")));
        }

        tracing::debug!("terminal entered");
        Ok(Self { out })
    }

    /// Current terminal size as `(cols, rows)`.
    ///
    /// # Errors
    ///
    /// Returns [`SiftError::Terminal`] if the size cannot be queried.
    pub fn size() -> Result<(u16, u16)> {
        terminal::size().map_err(|e| SiftError::Terminal(format!("failed to query size: {e}")))
    }

    /// Writer for frame output.
    pub fn writer(&mut self) -> &mut impl Write {
        &mut self.out
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = execute!(self.out, Show, DisableBracketedPaste, LeaveAlternateScreen) {
            tracing::warn!(error = %e, "failed to restore screen");
        }
        if let Err(e) = disable_raw_mode() {
            tracing::warn!(error = %e, "failed to disable raw mode");
        }
        tracing::debug!("terminal restored");
    }
}

impl std::fmt::Debug for TerminalGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalGuard").finish_non_exhaustive()
    }
}

/// Number of list rows that fit: the configured size, limited by the
/// terminal height minus the prompt and status lines, and never zero.
///
/// ```rust
/// use sift::ui::window_for;
///
/// assert_eq!(window_for(10, 40), 10);
/// assert_eq!(window_for(10, 6), 4);
/// assert_eq!(window_for(10, 1), 1);
/// ```
#[must_use]
pub fn window_for(configured: usize, rows: u16) -> usize {
    configured.min(usize::from(rows).saturating_sub(2)).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_follows_smaller_of_config_and_terminal() {
        assert_eq!(window_for(10, 12), 10);
        assert_eq!(window_for(10, 11), 9);
        assert_eq!(window_for(3, 100), 3);
        assert_eq!(window_for(0, 100), 1);
        assert_eq!(window_for(10, 0), 1);
    }
}
