//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the single owner of everything the main
//! loop works on: the item list, the query, the filtered order, the hooks,
//! the selection and the ingestion state. None of it is shared with the
//! background reader; new lines are handed over by value through
//! [`AppState::absorb`].
//!
//! # State Components
//!
//! - **Items**: Every accepted input line, in read order
//! - **Query**: The live search text
//! - **Filter**: Indices of matching items after hook reordering
//! - **Hooks**: Post-filter reordering steps and selection observers
//! - **Selection**: Cursor and scroll position inside the filtered order
//! - **Ingestion**: `Loading { items_loaded }` until input ends, then `Ready`
//!
//! # Example
//!
//! ```rust
//! use sift::app::AppState;
//! use sift::Config;
//!
//! let mut state = AppState::new(&Config::default());
//! state.absorb(&[b"alpha".to_vec(), b"beta".to_vec()], false);
//! state.absorb(&[], true);
//! assert!(state.ingestion().is_ready());
//! assert_eq!(state.filtered(), &[0, 1]);
//! ```

use super::filter::FilterPipeline;
use super::hooks::{HookRegistry, PostFilterHook};
use super::modes::{IngestionState, IngestionTracker};
use super::selection::Selection;
use crate::domain::{match_positions, Item, QueryBuffer};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    coalesce_positions, split_segments, widen_to_char_boundaries, DisplayItem, PromptInfo,
    StatusInfo, UIViewModel,
};
use crate::Config;

/// What a call to [`AppState::absorb`] changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Absorbed {
    /// Items were appended to the item list.
    pub appended: usize,
    /// The filtered count changed, so the layout must be redone.
    pub count_changed: bool,
    /// This call moved the ingestion state to `Ready`.
    pub became_ready: bool,
}

impl Absorbed {
    #[must_use]
    pub const fn changed(&self) -> bool {
        self.appended > 0 || self.became_ready
    }
}

/// Central application state container.
#[derive(Debug)]
pub struct AppState {
    items: Vec<Item>,
    query: QueryBuffer,
    filter: FilterPipeline,
    hooks: HookRegistry,
    selection: Selection,
    ingestion: IngestionTracker,
    max_item_len: usize,
    prompt: String,

    /// Color scheme used by the renderer.
    pub theme: Theme,
}

impl AppState {
    /// Creates an empty state in `Loading { items_loaded: 0 }`.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            items: Vec::new(),
            query: QueryBuffer::new(config.max_query_len),
            filter: FilterPipeline::new(),
            hooks: HookRegistry::new(),
            selection: Selection::new(config.window_size),
            ingestion: IngestionTracker::new(),
            max_item_len: config.max_item_len,
            prompt: config.prompt.clone(),
            theme: config.colors.clone(),
        }
    }

    /// Adds a post-filter hook after those already registered.
    pub fn register_hook(&mut self, hook: Box<dyn PostFilterHook>) {
        self.hooks.register(hook);
        self.recompute();
    }

    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Filtered item indices in display order.
    #[must_use]
    pub fn filtered(&self) -> &[usize] {
        self.filter.order()
    }

    #[must_use]
    pub const fn query(&self) -> &QueryBuffer {
        &self.query
    }

    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    #[must_use]
    pub const fn ingestion(&self) -> IngestionState {
        self.ingestion.state()
    }

    /// The item under the cursor, if the filtered list is not empty.
    #[must_use]
    pub fn selected_item(&self) -> Option<&Item> {
        self.filter
            .order()
            .get(self.selection.selected())
            .map(|&i| &self.items[i])
    }

    /// Takes one tick's worth of raw lines from the reader.
    ///
    /// Lines become items in read order; blank lines are dropped. The state
    /// becomes `Ready` only when `eof` is reported for a tick that delivered
    /// no lines, so every line read is processed before the transition.
    pub fn absorb(&mut self, lines: &[Vec<u8>], eof: bool) -> Absorbed {
        let mut result = Absorbed::default();

        if !lines.is_empty() {
            let _span = tracing::debug_span!("absorb", lines = lines.len()).entered();
            let before = self.items.len();
            self.items.extend(
                lines
                    .iter()
                    .filter_map(|line| Item::from_line(line, self.max_item_len)),
            );
            result.appended = self.items.len() - before;
            self.ingestion.record_loaded(result.appended);
            if result.appended > 0 {
                result.count_changed = self.recompute();
            }
            tracing::debug!(
                received = lines.len(),
                appended = result.appended,
                total = self.items.len(),
                "lines absorbed"
            );
        } else if eof {
            result.became_ready = self.ingestion.finish();
            if result.became_ready {
                tracing::debug!(total = self.items.len(), "input exhausted");
            }
        }

        result
    }

    /// Recomputes the filtered order and restores the selection invariants.
    ///
    /// Returns `true` if the filtered count changed.
    pub fn recompute(&mut self) -> bool {
        let count_changed = self
            .filter
            .recompute(&self.items, self.query.as_bytes(), &self.hooks);
        self.selection.clamp(self.filter.len());
        count_changed
    }

    /// Applies a query edit and re-filters if it changed anything.
    ///
    /// Returns `(query_changed, count_changed)`.
    pub fn edit_query(&mut self, edit: impl FnOnce(&mut QueryBuffer) -> bool) -> (bool, bool) {
        if !edit(&mut self.query) {
            return (false, false);
        }
        tracing::trace!(query = %self.query.as_text(), "query updated");
        (true, self.recompute())
    }

    pub fn move_by(&mut self, delta: isize) {
        self.selection.move_by(delta, self.filter.len());
    }

    pub fn move_to_first(&mut self) {
        self.selection.move_to_first(self.filter.len());
    }

    pub fn move_to_last(&mut self) {
        self.selection.move_to_last(self.filter.len());
    }

    pub fn move_page(&mut self, down: bool) {
        self.selection.move_page(down, self.filter.len());
    }

    pub fn set_window_size(&mut self, window: usize) {
        self.selection.set_window(window, self.filter.len());
    }

    /// Confirms the current selection.
    ///
    /// Notifies every hook and returns the item's bytes, or `None` if there
    /// is nothing to select.
    pub fn confirm(&mut self) -> Option<Vec<u8>> {
        let item = self.selected_item()?.clone();
        tracing::debug!(item = %item, "selection confirmed");
        self.hooks.notify_select(&item);
        Some(item.as_bytes().to_vec())
    }

    /// Computes a renderable view model for the current state.
    ///
    /// Only the rows inside the selection's scroll window are materialized.
    #[must_use]
    pub fn compute_viewmodel(&self) -> UIViewModel {
        let order = self.filter.order();
        let start = self.selection.scroll().min(order.len());
        let end = start.saturating_add(self.selection.window()).min(order.len());
        let query = self.query.as_bytes();

        let display_items = order[start..end]
            .iter()
            .enumerate()
            .map(|(offset, &index)| {
                let bytes = self.items[index].as_bytes();
                let ranges = match_positions(bytes, query)
                    .map(|positions| {
                        widen_to_char_boundaries(bytes, &coalesce_positions(&positions))
                    })
                    .unwrap_or_default();
                DisplayItem {
                    segments: split_segments(bytes, &ranges),
                    is_selected: start + offset == self.selection.selected(),
                }
            })
            .collect();

        let status = match self.ingestion.state() {
            IngestionState::Loading { items_loaded } => StatusInfo {
                text: format!("loading… {items_loaded}"),
                loading: true,
            },
            IngestionState::Ready => StatusInfo {
                text: format!("{}/{}", order.len(), self.items.len()),
                loading: false,
            },
        };

        UIViewModel {
            prompt: PromptInfo {
                prompt: self.prompt.clone(),
                query: self.query.as_text().into_owned(),
            },
            display_items,
            selected_index: self.selection.selected().saturating_sub(start),
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(names: &[&str]) -> Vec<Vec<u8>> {
        names.iter().map(|n| n.as_bytes().to_vec()).collect()
    }

    fn config(window_size: usize) -> Config {
        Config {
            window_size,
            ..Config::default()
        }
    }

    #[test]
    fn loading_counts_then_ready_after_empty_eof_tick() {
        let mut state = AppState::new(&Config::default());
        assert_eq!(state.ingestion(), IngestionState::Loading { items_loaded: 0 });

        let absorbed = state.absorb(&lines(&["a", "b", "c"]), false);
        assert_eq!(absorbed.appended, 3);
        assert_eq!(state.ingestion(), IngestionState::Loading { items_loaded: 3 });

        // Lines and EOF in the same tick: lines first, transition later
        let absorbed = state.absorb(&lines(&["d"]), true);
        assert!(!absorbed.became_ready);
        assert_eq!(state.ingestion(), IngestionState::Loading { items_loaded: 4 });

        let absorbed = state.absorb(&[], true);
        assert!(absorbed.became_ready);
        assert_eq!(state.ingestion(), IngestionState::Ready);

        let absorbed = state.absorb(&[], true);
        assert!(!absorbed.changed());
        assert_eq!(state.ingestion(), IngestionState::Ready);
    }

    #[test]
    fn blank_lines_are_not_counted() {
        let mut state = AppState::new(&Config::default());
        let absorbed = state.absorb(&lines(&["  ", "x", "", "\t"]), false);
        assert_eq!(absorbed.appended, 1);
        assert_eq!(state.ingestion(), IngestionState::Loading { items_loaded: 1 });
        assert_eq!(state.items().len(), 1);
    }

    #[test]
    fn new_items_are_filtered_against_current_query() {
        let mut state = AppState::new(&Config::default());
        state.edit_query(|q| q.append(b"rs"));
        state.absorb(&lines(&["main.rs", "README", "lib.rs"]), false);
        assert_eq!(state.filtered(), &[0, 2]);
    }

    #[test]
    fn editing_query_refilters_and_clamps() {
        let mut state = AppState::new(&config(2));
        state.absorb(&lines(&["apple", "banana", "cherry", "date"]), false);
        state.move_to_last();
        assert_eq!(state.selection().selected(), 3);

        let (changed, count_changed) = state.edit_query(|q| q.append(b"an"));
        assert!(changed && count_changed);
        assert_eq!(state.filtered(), &[1]);
        assert_eq!(state.selection().selected(), 0);
        assert!(state.selection().holds_for(state.filtered().len()));

        let (changed, _) = state.edit_query(|q| q.append(&[b'x'; 1024]));
        assert!(!changed);
    }

    #[test]
    fn confirm_returns_selected_bytes() {
        let mut state = AppState::new(&Config::default());
        assert!(state.confirm().is_none());

        state.absorb(&lines(&["first", "second"]), false);
        state.move_by(1);
        assert_eq!(state.confirm(), Some(b"second".to_vec()));
    }

    #[test]
    fn viewmodel_shows_scroll_window_with_highlights() {
        let mut state = AppState::new(&config(2));
        state.absorb(&lines(&["one", "two", "three", "four"]), false);
        state.absorb(&[], true);
        state.move_by(2);

        let vm = state.compute_viewmodel();
        assert_eq!(vm.display_items.len(), 2);
        assert_eq!(vm.selected_index, 1);
        assert!(vm.display_items[1].is_selected);
        assert_eq!(vm.status.text, "4/4");

        state.edit_query(|q| q.append(b"t"));
        let vm = state.compute_viewmodel();
        assert_eq!(vm.prompt.query, "t");
        let first = &vm.display_items[0];
        assert_eq!(first.segments[0].text, "t");
        assert!(first.segments[0].highlighted);
    }

    #[test]
    fn viewmodel_keeps_non_ascii_rows_readable() {
        let mut state = AppState::new(&Config::default());
        state.absorb(&lines(&["ãé"]), false);
        state.absorb(&[], true);
        state.edit_query(|q| q.push_char('é'));
        assert_eq!(state.filtered(), &[0]);

        let vm = state.compute_viewmodel();
        let row: String = vm.display_items[0]
            .segments
            .iter()
            .map(|s| s.text.as_str())
            .collect();
        assert_eq!(row, "ãé");
        assert!(!row.contains('\u{fffd}'));
    }

    #[test]
    fn huge_window_does_not_overflow() {
        let mut state = AppState::new(&config(usize::MAX));
        state.absorb(&lines(&["a", "b", "c"]), false);
        state.move_to_last();
        assert_eq!(state.compute_viewmodel().display_items.len(), 3);
        assert!(state.selection().holds_for(3));
    }

    #[test]
    fn viewmodel_reports_loading() {
        let mut state = AppState::new(&Config::default());
        state.absorb(&lines(&["x", "y"]), false);
        let vm = state.compute_viewmodel();
        assert!(vm.status.loading);
        assert_eq!(vm.status.text, "loading… 2");
    }
}
