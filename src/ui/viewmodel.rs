//! View model types representing renderable UI state.
//!
//! View models are computed from [`AppState`](crate::app::AppState) by
//! `compute_viewmodel` and consumed by the renderer. They contain no logic,
//! only display-ready data: the visible window of rows already split into
//! highlighted and plain segments.

use crate::domain::item::is_continuation;

/// Complete frame description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    /// Prompt line with the current query.
    pub prompt: PromptInfo,

    /// Rows of the visible window, top to bottom.
    pub display_items: Vec<DisplayItem>,

    /// Position of the selected row within `display_items`.
    pub selected_index: usize,

    /// Status line below the list.
    pub status: StatusInfo,
}

/// Prompt line contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptInfo {
    pub prompt: String,
    pub query: String,
}

/// One visible row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    /// Text split at highlight boundaries.
    pub segments: Vec<Segment>,

    pub is_selected: bool,
}

/// A run of text that is either entirely matched or entirely unmatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub highlighted: bool,
}

/// Status line contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusInfo {
    pub text: String,

    /// Whether input is still loading.
    pub loading: bool,
}

/// Coalesces sorted byte positions into `(start, end)` ranges, end exclusive.
#[must_use]
pub fn coalesce_positions(positions: &[usize]) -> Vec<(usize, usize)> {
    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for &pos in positions {
        match ranges.last_mut() {
            Some((_, end)) if *end == pos => *end = pos + 1,
            _ => ranges.push((pos, pos + 1)),
        }
    }
    ranges
}

/// Widens byte ranges outward to whole characters and merges any that then
/// touch or overlap.
///
/// Matching compares bytes, so a multi-byte query character can match
/// bytes spread over several characters of `bytes`.
#[must_use]
pub fn widen_to_char_boundaries(bytes: &[u8], ranges: &[(usize, usize)]) -> Vec<(usize, usize)> {
    let mut widened: Vec<(usize, usize)> = Vec::with_capacity(ranges.len());
    for &(start, end) in ranges {
        let mut start = start.min(bytes.len());
        let mut end = end.min(bytes.len());
        while start > 0 && is_continuation(bytes[start]) {
            start -= 1;
        }
        while end < bytes.len() && is_continuation(bytes[end]) {
            end += 1;
        }
        match widened.last_mut() {
            Some((_, last_end)) if start <= *last_end => *last_end = (*last_end).max(end),
            _ => widened.push((start, end)),
        }
    }
    widened
}

/// Splits `bytes` into alternating plain and highlighted segments.
///
/// Ranges are byte ranges; each segment is decoded lossily on its own so a
/// range edge inside a multi-byte character can never panic.
#[must_use]
pub fn split_segments(bytes: &[u8], ranges: &[(usize, usize)]) -> Vec<Segment> {
    let mut segments = Vec::with_capacity(ranges.len() * 2 + 1);
    let mut cursor = 0;

    let mut push = |from: usize, to: usize, highlighted: bool| {
        if from < to {
            segments.push(Segment {
                text: String::from_utf8_lossy(&bytes[from..to]).into_owned(),
                highlighted,
            });
        }
    };

    for &(start, end) in ranges {
        let start = start.min(bytes.len());
        let end = end.min(bytes.len());
        push(cursor, start, false);
        push(start, end, true);
        cursor = end;
    }
    push(cursor, bytes.len(), false);

    segments
}
