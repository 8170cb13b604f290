//! Filter pipeline.
//!
//! Recomputes the filtered order from scratch on every change: all item
//! indices in ascending order when the query is empty, otherwise the indices
//! whose item fuzzy-matches the query. The hooks then reorder the result.
//! There is no incremental diffing; a full rescan keeps the result exact.

use super::hooks::HookRegistry;
use crate::domain::{fuzzy_match, Item};

/// Ordered indices of the items currently shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPipeline {
    order: Vec<usize>,
}

impl FilterPipeline {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The filtered order, in display order.
    #[must_use]
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Rebuilds the order against `items` and `query`, then runs the hooks.
    ///
    /// Returns `true` if the number of filtered entries changed.
    pub fn recompute(&mut self, items: &[Item], query: &[u8], hooks: &HookRegistry) -> bool {
        let _span = tracing::debug_span!(
            "recompute",
            total_items = items.len(),
            query_len = query.len()
        )
        .entered();

        let previous = self.order.len();
        self.order.clear();

        if query.is_empty() {
            self.order.extend(0..items.len());
        } else {
            self.order.extend(
                items
                    .iter()
                    .enumerate()
                    .filter(|(_, item)| fuzzy_match(item.as_bytes(), query))
                    .map(|(i, _)| i),
            );
        }

        hooks.apply(&mut self.order, items);

        tracing::trace!(filtered_count = self.order.len(), "filter applied");
        self.order.len() != previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::hooks::PostFilterHook;

    fn items(names: &[&str]) -> Vec<Item> {
        names
            .iter()
            .map(|n| Item::from_line(n.as_bytes(), 64).unwrap())
            .collect()
    }

    struct Reverse;

    impl PostFilterHook for Reverse {
        fn name(&self) -> &'static str {
            "reverse"
        }

        fn reorder(&self, order: &mut [usize], _items: &[Item]) {
            order.reverse();
        }
    }

    #[test]
    fn empty_query_keeps_everything_in_input_order() {
        let items = items(&["one", "two", "three"]);
        let mut filter = FilterPipeline::new();
        assert!(filter.recompute(&items, b"", &HookRegistry::new()));
        assert_eq!(filter.order(), &[0, 1, 2]);
    }

    #[test]
    fn query_selects_matching_indices_ascending() {
        let items = items(&["src/main.rs", "README.md", "src/lib.rs", "Cargo.toml"]);
        let mut filter = FilterPipeline::new();
        filter.recompute(&items, b"srs", &HookRegistry::new());
        assert_eq!(filter.order(), &[0, 2]);

        filter.recompute(&items, b"md", &HookRegistry::new());
        assert_eq!(filter.order(), &[1]);
    }

    #[test]
    fn reports_count_changes_only() {
        let items = items(&["alpha", "beta", "gamma"]);
        let hooks = HookRegistry::new();
        let mut filter = FilterPipeline::new();

        assert!(filter.recompute(&items, b"a", &hooks));
        assert!(!filter.recompute(&items, b"a", &hooks));
        assert!(filter.recompute(&items, b"al", &hooks));
        assert!(filter.recompute(&items, b"zzz", &hooks));
        assert!(filter.is_empty());
    }

    #[test]
    fn hooks_see_filtered_result() {
        let items = items(&["ab", "b", "abc", "c"]);
        let mut hooks = HookRegistry::new();
        hooks.register(Box::new(Reverse));
        let mut filter = FilterPipeline::new();
        filter.recompute(&items, b"ab", &hooks);
        assert_eq!(filter.order(), &[2, 0]);
    }

    #[test]
    fn indices_are_unique_and_in_range() {
        let items = items(&["x1", "y2", "x3", "z4", "x5"]);
        let mut filter = FilterPipeline::new();
        for query in [&b""[..], b"x", b"4", b"nothing"] {
            filter.recompute(&items, query, &HookRegistry::new());
            let mut seen = std::collections::HashSet::new();
            assert!(filter.order().iter().all(|&i| i < items.len() && seen.insert(i)));
        }
        assert_eq!(filter.len(), 0);
    }
}
