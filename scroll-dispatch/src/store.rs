//! Store - the owning composition of creator, reducer and getter
//!
//! One store per screen. Construction is explicitly two-phase: the
//! shared action channel is built first, then the reducer, then the
//! getter and creator that read from it. The store owns the receiving
//! end of the channel and pumps it on its own task; every applied
//! action runs the reducer and, on change, the getter recomputation -
//! synchronously, in dispatch order.
//!
//! Dropping the store tears everything down as one unit: the creator
//! aborts its in-flight fetch, the channel closes, and the reducer and
//! getter variables (with their observer lists) are released.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::action::PagingAction;
use crate::creator::ActionCreator;
use crate::dispatcher::action_channel;
use crate::fetch::Fetcher;
use crate::getter::ListGetter;
use crate::reducer::PagingReducer;
use crate::state::ListItem;
use crate::variable::Variable;

/// Composes one [`ActionCreator`], one [`PagingReducer`] and one
/// [`ListGetter`] around a single action stream.
///
/// # Example
/// ```no_run
/// use scroll_dispatch::{FixedDelayFetcher, Store};
/// use std::time::Duration;
///
/// # async fn example() {
/// let mut store = Store::new(FixedDelayFetcher::new(20, Duration::from_millis(300)));
/// store.on_refresh();
/// store.drain_pending(); // StartInitialLoad applied, sentinel showing
/// store.process_next().await; // first page applied
/// assert_eq!(store.list_items().value().len(), 20);
/// # }
/// ```
pub struct Store {
    reducer: PagingReducer,
    getter: ListGetter,
    creator: ActionCreator,
    actions: mpsc::UnboundedReceiver<PagingAction>,
}

impl Store {
    /// Build the store around the given fetch capability.
    ///
    /// Channel first, then reducer, then getter and creator - the
    /// latter two read reducer state from their first use.
    pub fn new(fetcher: impl Fetcher + 'static) -> Self {
        let (dispatcher, actions) = action_channel();
        let reducer = PagingReducer::new();
        let getter = ListGetter::new(&reducer);
        let creator = ActionCreator::new(dispatcher, Arc::new(fetcher));
        Self {
            reducer,
            getter,
            creator,
            actions,
        }
    }

    /// UI intent: the user scrolled to the last row.
    pub fn on_scroll_to_last(&mut self) {
        self.creator.on_scroll_to_last(&self.reducer);
    }

    /// UI intent: reload the first page.
    pub fn on_refresh(&mut self) {
        self.creator.on_refresh(&self.reducer);
    }

    pub fn reducer(&self) -> &PagingReducer {
        &self.reducer
    }

    pub fn getter(&self) -> &ListGetter {
        &self.getter
    }

    /// The UI boundary: the observable presentation rows.
    pub fn list_items(&self) -> &Variable<Vec<ListItem>> {
        self.getter.list_items()
    }

    /// Apply every action already sitting in the channel.
    ///
    /// Returns `true` if any of them changed state.
    pub fn drain_pending(&mut self) -> bool {
        let mut changed = false;
        while let Ok(action) = self.actions.try_recv() {
            changed |= self.apply(action);
        }
        changed
    }

    /// Wait for the next action (typically a fetch completion) and
    /// apply it. Returns whether state changed.
    ///
    /// Cancel-safe: dropping the future before an action arrives
    /// applies nothing.
    pub async fn process_next(&mut self) -> bool {
        match self.actions.recv().await {
            Some(action) => self.apply(action),
            // The creator holds a sender for the store's lifetime, so
            // this only happens mid-teardown.
            None => false,
        }
    }

    fn apply(&mut self, action: PagingAction) -> bool {
        if action.is_fetch_outcome() {
            self.creator.fetch_done();
        }
        let changed = self.reducer.apply(action);
        if changed {
            self.getter.recompute(&self.reducer);
        }
        changed
    }
}
