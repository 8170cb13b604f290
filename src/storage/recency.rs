//! Recency boost hook.
//!
//! Promotes previously selected items to the top of the filtered list, most
//! recent first. Items never selected keep their relative order below them.
//! The history is loaded once when the hook is built; `reorder` only does
//! hash lookups.

use crate::app::hooks::PostFilterHook;
use crate::domain::error::Result;
use crate::domain::Item;
use crate::storage::backend::HistoryBackend;
use std::collections::HashMap;

/// Rank for items that are not in the history.
const ABSENT: usize = usize::MAX;

/// Post-filter hook ordering matches by how recently they were chosen.
///
/// # Example
///
/// ```rust
/// use sift::app::PostFilterHook;
/// use sift::domain::Item;
/// use sift::storage::RecencyBoost;
///
/// let items: Vec<Item> = ["Apple", "Banana", "Cherry"]
///     .iter()
///     .filter_map(|s| Item::from_line(s.as_bytes(), 64))
///     .collect();
/// let boost = RecencyBoost::new(vec![b"Cherry".to_vec()], 100);
///
/// let mut order = vec![0, 1, 2];
/// boost.reorder(&mut order, &items);
/// assert_eq!(order, vec![2, 0, 1]);
/// ```
pub struct RecencyBoost {
    /// Entries, most recent first.
    entries: Vec<Box<[u8]>>,
    /// Entry text to its position in `entries`.
    positions: HashMap<Box<[u8]>, usize>,
    max_entries: usize,
    backend: Option<Box<dyn HistoryBackend>>,
}

impl RecencyBoost {
    /// Builds an in-memory hook from `history`, most recent first.
    ///
    /// Duplicates keep their first (most recent) position.
    #[must_use]
    pub fn new(history: Vec<Vec<u8>>, max_entries: usize) -> Self {
        let mut boost = Self {
            entries: Vec::new(),
            positions: HashMap::new(),
            max_entries,
            backend: None,
        };
        for entry in history {
            if boost.entries.len() >= max_entries {
                break;
            }
            let entry = entry.into_boxed_slice();
            if !boost.positions.contains_key(&entry) {
                boost.positions.insert(entry.clone(), boost.entries.len());
                boost.entries.push(entry);
            }
        }
        boost
    }

    /// Loads the history from `backend` and keeps it for recording
    /// selections.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    pub fn from_backend(mut backend: Box<dyn HistoryBackend>, max_entries: usize) -> Result<Self> {
        let history = backend.load()?;
        let mut boost = Self::new(history, max_entries);
        boost.backend = Some(backend);
        Ok(boost)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// History position of `bytes`, or `usize::MAX` if absent.
    #[must_use]
    pub fn rank(&self, bytes: &[u8]) -> usize {
        self.positions.get(bytes).copied().unwrap_or(ABSENT)
    }

    /// Moves `bytes` to the front of the in-memory history.
    fn promote(&mut self, bytes: &[u8]) {
        if let Some(pos) = self.positions.get(bytes).copied() {
            self.entries.remove(pos);
        }
        self.entries.insert(0, Box::from(bytes));
        self.entries.truncate(self.max_entries);

        self.positions.clear();
        for (pos, entry) in self.entries.iter().enumerate() {
            self.positions.insert(entry.clone(), pos);
        }
    }
}

impl PostFilterHook for RecencyBoost {
    fn name(&self) -> &'static str {
        "recency"
    }

    /// Stable insertion sort on history rank.
    fn reorder(&self, order: &mut [usize], items: &[Item]) {
        if self.entries.is_empty() {
            return;
        }

        let rank = |index: usize| self.rank(items[index].as_bytes());
        for i in 1..order.len() {
            let current = order[i];
            let current_rank = rank(current);
            let mut j = i;
            while j > 0 && rank(order[j - 1]) > current_rank {
                order[j] = order[j - 1];
                j -= 1;
            }
            order[j] = current;
        }
    }

    fn on_select(&mut self, item: &Item) -> Result<()> {
        self.promote(item.as_bytes());
        match self.backend.as_mut() {
            Some(backend) => backend.record(item.as_bytes()),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for RecencyBoost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecencyBoost")
            .field("entries", &self.entries.len())
            .field("max_entries", &self.max_entries)
            .field("persistent", &self.backend.is_some())
            .finish()
    }
}
