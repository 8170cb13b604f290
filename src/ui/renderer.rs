//! Frame rendering.
//!
//! Draws a [`UIViewModel`] with crossterm commands: the prompt line on top,
//! the visible window of rows below it, and a status line after the last
//! row. Commands are queued and flushed once per frame.
//!
//! ```text
//! > que|
//!   first match
//! ▌ selected match
//!   another match
//! 3/120
//! ```

use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DisplayItem, UIViewModel};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io::{self, Write};

/// Marker drawn before the selected row.
const SELECTED_MARKER: &str = "▌ ";
const UNSELECTED_MARKER: &str = "  ";

/// Draws one frame to `out`.
///
/// With `full` set the whole screen is cleared first, which is what a
/// relayout needs; otherwise each line is overwritten in place.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn render(
    vm: &UIViewModel,
    theme: &Theme,
    out: &mut impl Write,
    cols: u16,
    full: bool,
) -> io::Result<()> {
    let width = usize::from(cols);

    queue!(out, Hide)?;
    if full {
        queue!(out, Clear(ClearType::All))?;
    }

    // Prompt line
    let prompt = truncate(&vm.prompt.prompt, width);
    let query = truncate(&vm.prompt.query, width - prompt.chars().count());
    queue!(
        out,
        MoveTo(0, 0),
        Clear(ClearType::CurrentLine),
        SetForegroundColor(Theme::color(&theme.prompt_fg)),
        Print(prompt),
        SetForegroundColor(Theme::color(&theme.query_fg)),
        Print(query),
        ResetColor,
    )?;
    let cursor_col = prompt.chars().count() + query.chars().count();

    let mut row: u16 = 1;
    for item in &vm.display_items {
        queue!(out, MoveTo(0, row), Clear(ClearType::CurrentLine))?;
        render_row(item, theme, out, width)?;
        row = row.saturating_add(1);
    }

    queue!(
        out,
        MoveTo(0, row),
        Clear(ClearType::CurrentLine),
        SetForegroundColor(Theme::color(&theme.text_dim)),
        Print(truncate(&vm.status.text, width)),
        ResetColor,
        Clear(ClearType::FromCursorDown),
    )?;

    let cursor_col = u16::try_from(cursor_col).unwrap_or(cols);
    queue!(out, MoveTo(cursor_col, 0), Show)?;
    out.flush()
}

/// Draws one list row: marker, then segments with match highlighting.
fn render_row(item: &DisplayItem, theme: &Theme, out: &mut impl Write, width: usize) -> io::Result<()> {
    let (marker, fg) = if item.is_selected {
        (SELECTED_MARKER, Theme::color(&theme.selection_fg))
    } else {
        (UNSELECTED_MARKER, Theme::color(&theme.text_normal))
    };
    if item.is_selected {
        queue!(out, SetBackgroundColor(Theme::color(&theme.selection_bg)))?;
    }

    let marker = truncate(marker, width);
    queue!(out, SetForegroundColor(fg), Print(marker))?;

    let mut budget = width - marker.chars().count();
    for segment in &item.segments {
        if budget == 0 {
            break;
        }
        let text = truncate(&segment.text, budget);
        budget -= text.chars().count();

        let color = if segment.highlighted {
            Theme::color(&theme.match_highlight_fg)
        } else {
            fg
        };
        queue!(out, SetForegroundColor(color), Print(text))?;
    }

    queue!(out, ResetColor)
}

/// Cuts `text` to at most `max_chars` characters.
fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::viewmodel::{PromptInfo, Segment, StatusInfo};

    fn viewmodel() -> UIViewModel {
        UIViewModel {
            prompt: PromptInfo {
                prompt: "> ".to_string(),
                query: "ma".to_string(),
            },
            display_items: vec![
                DisplayItem {
                    segments: vec![
                        Segment { text: "src/".to_string(), highlighted: false },
                        Segment { text: "ma".to_string(), highlighted: true },
                        Segment { text: "in.rs".to_string(), highlighted: false },
                    ],
                    is_selected: true,
                },
                DisplayItem {
                    segments: vec![Segment { text: "Makefile".to_string(), highlighted: false }],
                    is_selected: false,
                },
            ],
            selected_index: 0,
            status: StatusInfo {
                text: "2/9".to_string(),
                loading: false,
            },
        }
    }

    fn rendered(cols: u16, full: bool) -> String {
        let mut out = Vec::new();
        render(&viewmodel(), &Theme::default(), &mut out, cols, full).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn draws_prompt_rows_and_status() {
        let frame = rendered(80, false);
        assert!(frame.contains("> "));
        assert!(frame.contains("src/"));
        assert!(frame.contains("in.rs"));
        assert!(frame.contains("Makefile"));
        assert!(frame.contains("2/9"));
        assert!(frame.contains(SELECTED_MARKER));
    }

    #[test]
    fn full_redraw_clears_screen() {
        let clear_all = "\u{1b}[2J";
        assert!(rendered(80, true).contains(clear_all));
        assert!(!rendered(80, false).contains(clear_all));
    }

    #[test]
    fn rows_are_cut_to_width() {
        let frame = rendered(6, false);
        // Marker takes two columns, leaving "src/" for the first row
        assert!(frame.contains("src/"));
        assert!(!frame.contains("in.rs"));
        assert!(frame.contains("Make"));
        assert!(!frame.contains("Makef"));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("héllo", 2), "hé");
        assert_eq!(truncate("abc", 10), "abc");
        assert_eq!(truncate("abc", 0), "");
    }
}
