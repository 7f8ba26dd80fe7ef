//! Getter - pure derivation of the presentation list
//!
//! Combines the reducer's `elements` and `is_next_loading` into the one
//! observable the UI renders: every element mapped to a row, plus a
//! trailing loading sentinel while a fetch is in flight. Memoryless:
//! each recomputation emits the full sequence, and the underlying
//! [`Variable`] suppresses emissions that equal the previous one.

use tracing::trace;

use crate::reducer::PagingReducer;
use crate::state::ListItem;
use crate::variable::Variable;

/// Derives `list_items` from the reducer's state variables.
pub struct ListGetter {
    list_items: Variable<Vec<ListItem>>,
}

impl ListGetter {
    pub fn new(reducer: &PagingReducer) -> Self {
        Self {
            list_items: Variable::new(derive_list_items(reducer)),
        }
    }

    /// The presentation rows the UI observes.
    pub fn list_items(&self) -> &Variable<Vec<ListItem>> {
        &self.list_items
    }

    /// Re-derive from the reducer's latest values.
    ///
    /// Called by the store after every applied change; a recomputation
    /// that lands on the same sequence does not notify.
    pub fn recompute(&mut self, reducer: &PagingReducer) -> bool {
        let items = derive_list_items(reducer);
        trace!(rows = items.len(), "recompute list items");
        self.list_items.set(items)
    }
}

fn derive_list_items(reducer: &PagingReducer) -> Vec<ListItem> {
    let mut items: Vec<ListItem> = reducer
        .elements()
        .value()
        .iter()
        .cloned()
        .map(ListItem::Element)
        .collect();
    if reducer.is_next_loading().get() {
        items.push(ListItem::Loading);
    }
    items
}
