//! Reducer - the sole owner and mutator of the paging session state
//!
//! State transitions, driven by action kind:
//!
//! | Action             | Transition                                              |
//! |--------------------|---------------------------------------------------------|
//! | StartInitialLoad   | is_next_loading <- true                                 |
//! | SuccessInitialLoad | loading <- false; elements <- new; page <- 1            |
//! | StartNextLoad      | is_next_loading <- true                                 |
//! | SuccessNextLoad    | loading <- false; elements <- elements ++ new; page + 1 |
//! | Error              | is_next_loading <- false, nothing else                  |
//!
//! Each field is exposed as a read-only [`Variable`]: external callers
//! may read and observe, never write.

use tracing::{debug, warn};

use crate::action::{Action, PagingAction};
use crate::state::Element;
use crate::variable::Variable;

/// Page numbering is 1-based; a fresh session sits on the first page.
pub const FIRST_PAGE: u64 = 1;

/// Owns `page`, `elements` and `is_next_loading`, mutating them only in
/// response to [`PagingAction`]s.
pub struct PagingReducer {
    page: Variable<u64>,
    elements: Variable<Vec<Element>>,
    is_next_loading: Variable<bool>,
}

impl PagingReducer {
    pub fn new() -> Self {
        Self {
            page: Variable::new(FIRST_PAGE),
            elements: Variable::new(Vec::new()),
            is_next_loading: Variable::new(false),
        }
    }

    /// Current page number; >= 1, monotonic within a session.
    pub fn page(&self) -> &Variable<u64> {
        &self.page
    }

    /// Accumulated elements, in fetch order.
    pub fn elements(&self) -> &Variable<Vec<Element>> {
        &self.elements
    }

    /// True iff a fetch is in flight.
    pub fn is_next_loading(&self) -> &Variable<bool> {
        &self.is_next_loading
    }

    /// Apply one action. Returns `true` if any state field changed.
    ///
    /// Normally driven by the [`Store`](crate::Store); exposed for
    /// custom wiring and tests.
    pub fn apply(&mut self, action: PagingAction) -> bool {
        debug!(action = action.name(), "reduce");
        match action {
            PagingAction::StartInitialLoad | PagingAction::StartNextLoad => {
                self.is_next_loading.set(true)
            }
            PagingAction::SuccessInitialLoad { elements } => {
                // A refresh replaces the whole session.
                let mut changed = self.is_next_loading.set(false);
                changed |= self.elements.set(elements);
                changed |= self.page.set(FIRST_PAGE);
                changed
            }
            PagingAction::SuccessNextLoad { elements } => {
                let mut changed = self.is_next_loading.set(false);
                let mut all = self.elements.get();
                all.extend(elements);
                changed |= self.elements.set(all);
                let next_page = self.page.get() + 1;
                changed |= self.page.set(next_page);
                changed
            }
            PagingAction::Error { cause } => {
                // Elements and page were never touched for this fetch,
                // so clearing the flag is the whole rollback.
                warn!(%cause, "fetch failed");
                self.is_next_loading.set(false)
            }
        }
    }
}

impl Default for PagingReducer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchError;

    fn elements(ids: std::ops::Range<u64>) -> Vec<Element> {
        ids.map(Element::new).collect()
    }

    #[test]
    fn test_initial_state() {
        let reducer = PagingReducer::new();
        assert_eq!(reducer.page().get(), 1);
        assert!(reducer.elements().value().is_empty());
        assert!(!reducer.is_next_loading().get());
    }

    #[test]
    fn test_start_next_load_raises_loading_flag() {
        let mut reducer = PagingReducer::new();
        assert!(reducer.apply(PagingAction::StartNextLoad));
        assert!(reducer.is_next_loading().get());

        // Already loading: applying again changes nothing.
        assert!(!reducer.apply(PagingAction::StartNextLoad));
    }

    #[test]
    fn test_success_next_load_appends_and_advances_page() {
        let mut reducer = PagingReducer::new();
        reducer.apply(PagingAction::StartNextLoad);
        reducer.apply(PagingAction::SuccessNextLoad {
            elements: elements(0..2),
        });

        assert!(!reducer.is_next_loading().get());
        assert_eq!(*reducer.elements().value(), elements(0..2));
        assert_eq!(reducer.page().get(), 2);

        reducer.apply(PagingAction::StartNextLoad);
        reducer.apply(PagingAction::SuccessNextLoad {
            elements: elements(2..4),
        });

        assert_eq!(*reducer.elements().value(), elements(0..4));
        assert_eq!(reducer.page().get(), 3);
    }

    #[test]
    fn test_success_initial_load_replaces_session() {
        let mut reducer = PagingReducer::new();
        reducer.apply(PagingAction::SuccessNextLoad {
            elements: elements(0..4),
        });
        assert_eq!(reducer.page().get(), 2);

        reducer.apply(PagingAction::StartInitialLoad);
        assert!(reducer.is_next_loading().get());
        // Refresh in flight: the old list is still showing.
        assert_eq!(*reducer.elements().value(), elements(0..4));

        reducer.apply(PagingAction::SuccessInitialLoad {
            elements: elements(10..12),
        });
        assert!(!reducer.is_next_loading().get());
        assert_eq!(*reducer.elements().value(), elements(10..12));
        assert_eq!(reducer.page().get(), 1);
    }

    #[test]
    fn test_error_clears_flag_and_nothing_else() {
        let mut reducer = PagingReducer::new();
        reducer.apply(PagingAction::SuccessNextLoad {
            elements: elements(0..2),
        });
        reducer.apply(PagingAction::StartNextLoad);

        let changed = reducer.apply(PagingAction::Error {
            cause: FetchError::new(3, "timeout"),
        });

        assert!(changed);
        assert!(!reducer.is_next_loading().get());
        assert_eq!(*reducer.elements().value(), elements(0..2));
        assert_eq!(reducer.page().get(), 2);
    }

    #[test]
    fn test_failed_refresh_preserves_previous_session() {
        let mut reducer = PagingReducer::new();
        reducer.apply(PagingAction::SuccessNextLoad {
            elements: elements(0..2),
        });

        reducer.apply(PagingAction::StartInitialLoad);
        reducer.apply(PagingAction::Error {
            cause: FetchError::new(1, "offline"),
        });

        assert_eq!(*reducer.elements().value(), elements(0..2));
        assert_eq!(reducer.page().get(), 2);
        assert!(!reducer.is_next_loading().get());
    }
}
