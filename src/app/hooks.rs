//! Post-filter hooks.
//!
//! After the filter computes which items match, every registered
//! [`PostFilterHook`] may reorder the result. Hooks run in registration
//! order, each seeing the output of the previous one.
//!
//! # Contract
//!
//! A hook receives the filtered order as a slice, so it cannot add or remove
//! entries. It must also not duplicate indices; the filter relies on that but
//! does not check it. Hooks run on every keystroke: any loading of backing
//! state belongs in the hook's constructor, not in [`PostFilterHook::reorder`].
//!
//! When the user confirms a choice, every hook is told through
//! [`PostFilterHook::on_select`].

use crate::domain::{Item, Result};

/// A reordering step applied after filtering.
pub trait PostFilterHook: Send {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Permutes `order`, a list of indices into `items`, in place.
    fn reorder(&self, order: &mut [usize], items: &[Item]);

    /// Called once when the user confirms `item`.
    ///
    /// # Errors
    ///
    /// Returns an error if the hook fails to persist the selection. The
    /// caller logs it; the selection is still emitted.
    fn on_select(&mut self, item: &Item) -> Result<()> {
        let _ = item;
        Ok(())
    }
}

/// Ordered list of hooks.
#[derive(Default)]
pub struct HookRegistry {
    hooks: Vec<Box<dyn PostFilterHook>>,
}

impl HookRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a hook; it runs after every hook registered before it.
    pub fn register(&mut self, hook: Box<dyn PostFilterHook>) {
        tracing::debug!(hook = hook.name(), position = self.hooks.len(), "hook registered");
        self.hooks.push(hook);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Runs every hook over `order` in registration order.
    pub fn apply(&self, order: &mut [usize], items: &[Item]) {
        for hook in &self.hooks {
            hook.reorder(order, items);
        }
    }

    /// Notifies every hook of a confirmed selection.
    ///
    /// Failures are logged and do not stop later hooks from being notified.
    pub fn notify_select(&mut self, item: &Item) {
        for hook in &mut self.hooks {
            if let Err(e) = hook.on_select(item) {
                tracing::warn!(hook = hook.name(), error = %e, "hook failed to record selection");
            }
        }
    }
}

impl std::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.hooks.iter().map(|h| h.name()))
            .finish()
    }
}
