//! Data model shared between the reducer and the getter
//!
//! `Element` is what the fetch capability returns; `ListItem` is what the
//! UI renders. Only the getter produces `ListItem` values.

/// A single fetched list entry, identified by a numeric id.
///
/// Immutable once fetched. The id is assigned by the fetch capability
/// and is opaque to the core.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    pub id: u64,
}

impl Element {
    pub fn new(id: u64) -> Self {
        Self { id }
    }
}

/// A presentation row: either a fetched element or the trailing loading
/// sentinel the UI renders while a fetch is in flight.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListItem {
    Element(Element),
    Loading,
}

impl ListItem {
    pub fn is_loading(&self) -> bool {
        matches!(self, ListItem::Loading)
    }
}
