//! Color scheme for the selector.
//!
//! Colors are hex strings so they can be written naturally in the `[colors]`
//! table of the configuration file. Every field has a default (a Catppuccin
//! Mocha palette), so a partial table only overrides what it names.
//!
//! ```toml
//! [colors]
//! prompt_fg = "#f5c2e7"
//! selection_bg = "#313244"
//! ```

use crossterm::style::Color;
use serde::Deserialize;

/// Color definitions for all UI elements, as hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Prompt marker before the query.
    pub prompt_fg: String,
    /// Query text.
    pub query_fg: String,
    /// Unselected rows.
    pub text_normal: String,
    /// Status line and loading counter.
    pub text_dim: String,
    /// Selected row foreground.
    pub selection_fg: String,
    /// Selected row background.
    pub selection_bg: String,
    /// Matched bytes foreground.
    pub match_highlight_fg: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            prompt_fg: "#f5c2e7".to_string(),
            query_fg: "#cdd6f4".to_string(),
            text_normal: "#cdd6f4".to_string(),
            text_dim: "#6c7086".to_string(),
            selection_fg: "#cdd6f4".to_string(),
            selection_bg: "#45475a".to_string(),
            match_highlight_fg: "#f9e2af".to_string(),
        }
    }
}

impl Theme {
    /// Parses `#rrggbb` (the `#` is optional) into a terminal color.
    ///
    /// Malformed values fall back to the terminal's default color instead of
    /// failing, so a typo in the config never prevents the selector from
    /// starting.
    ///
    /// # Example
    ///
    /// ```rust
    /// use crossterm::style::Color;
    /// use sift::ui::Theme;
    ///
    /// assert_eq!(Theme::color("#ff8000"), Color::Rgb { r: 255, g: 128, b: 0 });
    /// assert_eq!(Theme::color("oops"), Color::Reset);
    /// ```
    #[must_use]
    pub fn color(hex: &str) -> Color {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Color::Reset;
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        match (channel(0..2), channel(2..4), channel(4..6)) {
            (Some(r), Some(g), Some(b)) => Color::Rgb { r, g, b },
            _ => Color::Reset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_and_without_hash() {
        assert_eq!(Theme::color("#1e1e2e"), Color::Rgb { r: 0x1e, g: 0x1e, b: 0x2e });
        assert_eq!(Theme::color("CDD6F4"), Color::Rgb { r: 0xcd, g: 0xd6, b: 0xf4 });
    }

    #[test]
    fn malformed_falls_back_to_reset() {
        assert_eq!(Theme::color(""), Color::Reset);
        assert_eq!(Theme::color("#12345"), Color::Reset);
        assert_eq!(Theme::color("#gggggg"), Color::Reset);
        assert_eq!(Theme::color("#ééé"), Color::Reset);
    }

    #[test]
    fn partial_table_keeps_defaults() {
        let theme: Theme = toml::from_str("prompt_fg = \"#000000\"").unwrap();
        assert_eq!(theme.prompt_fg, "#000000");
        assert_eq!(theme.selection_bg, Theme::default().selection_bg);
    }
}
