//! Cached inclusion state of an item in the emitted API variants.

use std::cell::Cell;

/// Per-item hidden/removed/doc-only state.
///
/// Each flag starts unresolved and is computed on first read (see
/// [`Codebase::is_hidden`](super::Codebase::is_hidden) and friends), then
/// cached. A flag can later be forced on, never off.
#[derive(Clone, Debug, Default)]
pub struct ApiVariantSelectors {
    originally_hidden: Cell<Option<bool>>,
    hidden: Cell<Option<bool>>,
    removed: Cell<Option<bool>>,
    doc_only: Cell<Option<bool>>,
}

impl ApiVariantSelectors {
    /// Selectors that compute their state lazily from the item and its containers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selectors whose state is already known, for inputs that were filtered
    /// before they reached the model (such as signature text).
    pub fn resolved(hidden: bool, removed: bool, doc_only: bool) -> Self {
        Self {
            originally_hidden: Cell::new(Some(hidden)),
            hidden: Cell::new(Some(hidden)),
            removed: Cell::new(Some(removed)),
            doc_only: Cell::new(Some(doc_only)),
        }
    }

    pub(crate) fn originally_hidden(&self, compute: impl FnOnce() -> bool) -> bool {
        cached(&self.originally_hidden, compute)
    }

    pub(crate) fn hidden(&self, compute: impl FnOnce() -> bool) -> bool {
        cached(&self.hidden, compute)
    }

    pub(crate) fn removed(&self, compute: impl FnOnce() -> bool) -> bool {
        cached(&self.removed, compute)
    }

    pub(crate) fn doc_only(&self, compute: impl FnOnce() -> bool) -> bool {
        cached(&self.doc_only, compute)
    }

    pub(crate) fn force_hidden(&self) {
        self.hidden.set(Some(true));
    }

    pub(crate) fn force_removed(&self) {
        self.removed.set(Some(true));
    }

    pub(crate) fn force_doc_only(&self) {
        self.doc_only.set(Some(true));
    }

    /// A fresh copy for a duplicated item: nothing resolved yet.
    pub(crate) fn duplicate(&self) -> Self {
        Self::default()
    }
}

fn cached(cell: &Cell<Option<bool>>, compute: impl FnOnce() -> bool) -> bool {
    if let Some(value) = cell.get() {
        return value;
    }
    let value = compute();
    // Forcing during `compute` wins over the computed value.
    let value = cell.get().map_or(value, |forced| forced || value);
    cell.set(Some(value));
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_computed_once() {
        let selectors = ApiVariantSelectors::new();
        assert!(!selectors.hidden(|| false));
        // Cached: a different answer from `compute` is ignored.
        assert!(!selectors.hidden(|| true));
    }

    #[test]
    fn test_force_never_unforces() {
        let selectors = ApiVariantSelectors::new();
        assert!(!selectors.removed(|| false));
        selectors.force_removed();
        assert!(selectors.removed(|| false));
    }

    #[test]
    fn test_resolved() {
        let selectors = ApiVariantSelectors::resolved(true, false, false);
        assert!(selectors.hidden(|| false));
        assert!(selectors.originally_hidden(|| false));
        assert!(!selectors.doc_only(|| true));
    }
}
