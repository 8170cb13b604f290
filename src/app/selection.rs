//! Selection and scroll invariants over the filtered list.
//!
//! Whenever the filtered list is non-empty:
//!
//! ```text
//! selected < len
//! scroll <= selected < scroll + window
//! ```
//!
//! and both are `0` when it is empty. Scrolling is adjusted minimally rather
//! than recomputed, so the visible window only moves when the selection
//! would leave it.

/// Cursor position and first visible row within the filtered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    selected: usize,
    scroll: usize,
    window: usize,
}

impl Selection {
    /// Creates a selection at the top. A window size of `0` is treated as `1`.
    #[must_use]
    pub fn new(window: usize) -> Self {
        Self {
            selected: 0,
            scroll: 0,
            window: window.max(1),
        }
    }

    #[must_use]
    pub const fn selected(&self) -> usize {
        self.selected
    }

    #[must_use]
    pub const fn scroll(&self) -> usize {
        self.scroll
    }

    #[must_use]
    pub const fn window(&self) -> usize {
        self.window
    }

    /// Changes the number of visible rows and restores the invariants.
    pub fn set_window(&mut self, window: usize, len: usize) {
        self.window = window.max(1);
        self.clamp(len);
    }

    /// Restores the invariants for a list of `len` entries.
    pub fn clamp(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
            self.scroll = 0;
            return;
        }
        if self.selected >= len {
            self.selected = len - 1;
        }
        self.adjust_scroll();
    }

    fn adjust_scroll(&mut self) {
        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if self.selected >= self.scroll.saturating_add(self.window) {
            self.scroll = self.selected + 1 - self.window;
        }
    }

    /// Moves by `delta` rows, stopping at either end.
    pub fn move_by(&mut self, delta: isize, len: usize) {
        if len == 0 {
            self.clamp(len);
            return;
        }
        let target = if delta < 0 {
            self.selected.saturating_sub(delta.unsigned_abs())
        } else {
            self.selected.saturating_add(delta.unsigned_abs())
        };
        self.selected = target.min(len - 1);
        self.adjust_scroll();
    }

    pub fn move_to_first(&mut self, len: usize) {
        self.selected = 0;
        self.clamp(len);
    }

    pub fn move_to_last(&mut self, len: usize) {
        self.selected = len.saturating_sub(1);
        self.clamp(len);
    }

    /// Moves one window up (`down == false`) or down.
    pub fn move_page(&mut self, down: bool, len: usize) {
        let step = isize::try_from(self.window).unwrap_or(isize::MAX);
        self.move_by(if down { step } else { -step }, len);
    }

    /// Checks the invariants; used by tests.
    #[must_use]
    pub fn holds_for(&self, len: usize) -> bool {
        if len == 0 {
            return self.selected == 0 && self.scroll == 0;
        }
        self.selected < len
            && self.scroll <= self.selected
            && self.selected < self.scroll.saturating_add(self.window)
    }
}
