//! ActionCreator - translates intents and fetch outcomes into actions
//!
//! The only concurrency control in the system lives here: an intent is
//! suppressed while a fetch is in flight, so at most one fetch exists at
//! a time. The fetch itself runs on a spawned tokio task whose
//! completion only dispatches - it never touches reducer state.

use std::sync::Arc;

use tokio::task::AbortHandle;
use tracing::{debug, trace};

use crate::action::PagingAction;
use crate::dispatcher::Dispatcher;
use crate::fetch::Fetcher;
use crate::reducer::{PagingReducer, FIRST_PAGE};
use crate::state::Element;

/// Which success action a completed fetch maps to.
#[derive(Clone, Copy, Debug)]
enum FetchKind {
    Initial,
    Next,
}

impl FetchKind {
    fn success(self, elements: Vec<Element>) -> PagingAction {
        match self {
            FetchKind::Initial => PagingAction::SuccessInitialLoad { elements },
            FetchKind::Next => PagingAction::SuccessNextLoad { elements },
        }
    }
}

/// Turns UI intents into dispatched actions, invoking the fetch
/// capability for the paging ones.
///
/// Holds the abort handle of the in-flight fetch as its disposer: a
/// dropped creator aborts the task, so a torn-down store never receives
/// the completion.
pub struct ActionCreator {
    dispatcher: Dispatcher<PagingAction>,
    fetcher: Arc<dyn Fetcher>,
    in_flight: Option<AbortHandle>,
}

impl ActionCreator {
    pub fn new(dispatcher: Dispatcher<PagingAction>, fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            dispatcher,
            fetcher,
            in_flight: None,
        }
    }

    /// The user scrolled to the end of the list: fetch the next page.
    ///
    /// No-op while a fetch is in flight - the guard that enforces
    /// at-most-one concurrent fetch. Must be called within a tokio
    /// runtime.
    pub fn on_scroll_to_last(&mut self, reducer: &PagingReducer) {
        if self.is_fetch_in_flight(reducer) {
            trace!("scroll-to-last suppressed, fetch already in flight");
            return;
        }
        let page = reducer.page().get() + 1;
        self.dispatcher.dispatch(PagingAction::StartNextLoad);
        self.spawn_fetch(page, FetchKind::Next);
    }

    /// Reload the first page, replacing the session on success.
    ///
    /// Same guard as [`on_scroll_to_last`](Self::on_scroll_to_last).
    pub fn on_refresh(&mut self, reducer: &PagingReducer) {
        if self.is_fetch_in_flight(reducer) {
            trace!("refresh suppressed, fetch already in flight");
            return;
        }
        self.dispatcher.dispatch(PagingAction::StartInitialLoad);
        self.spawn_fetch(FIRST_PAGE, FetchKind::Initial);
    }

    /// True while a fetch has started and its outcome has not yet been
    /// applied by the store.
    pub fn is_fetch_in_flight(&self, reducer: &PagingReducer) -> bool {
        // The reducer flag flips when StartNextLoad is applied; the task
        // slot covers the window where the start action is still queued.
        reducer.is_next_loading().get() || self.in_flight.is_some()
    }

    /// Called by the store when a success/error action is applied.
    pub(crate) fn fetch_done(&mut self) {
        self.in_flight = None;
    }

    fn spawn_fetch(&mut self, page: u64, kind: FetchKind) {
        debug!(page, ?kind, "spawning fetch");
        let fetcher = Arc::clone(&self.fetcher);
        let dispatcher = self.dispatcher.clone();
        let handle = tokio::spawn(async move {
            match fetcher.fetch(page).await {
                Ok(elements) => dispatcher.dispatch(kind.success(elements)),
                Err(cause) => dispatcher.dispatch(PagingAction::Error { cause }),
            }
        })
        .abort_handle();
        self.in_flight = Some(handle);
    }
}

impl Drop for ActionCreator {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher::action_channel;
    use crate::fetch::{FetchError, FixedDelayFetcher};
    use crate::testing::{FailingFetcher, ScriptedFetcher};
    use std::time::Duration;

    fn elements(ids: std::ops::Range<u64>) -> Vec<Element> {
        ids.map(Element::new).collect()
    }

    #[tokio::test]
    async fn test_scroll_to_last_dispatches_start_then_success() {
        let (dispatcher, mut rx) = action_channel();
        let fetcher = ScriptedFetcher::new().with_page(elements(2..4));
        let mut creator = ActionCreator::new(dispatcher, Arc::new(fetcher.clone()));
        let reducer = PagingReducer::new();

        creator.on_scroll_to_last(&reducer);

        assert_eq!(rx.recv().await.unwrap(), PagingAction::StartNextLoad);
        assert_eq!(
            rx.recv().await.unwrap(),
            PagingAction::SuccessNextLoad {
                elements: elements(2..4)
            }
        );
        assert_eq!(fetcher.pages_fetched(), vec![2]);
    }

    #[tokio::test]
    async fn test_refresh_dispatches_initial_pair() {
        let (dispatcher, mut rx) = action_channel();
        let fetcher = ScriptedFetcher::new().with_page(elements(0..2));
        let mut creator = ActionCreator::new(dispatcher, Arc::new(fetcher.clone()));
        let reducer = PagingReducer::new();

        creator.on_refresh(&reducer);

        assert_eq!(rx.recv().await.unwrap(), PagingAction::StartInitialLoad);
        assert_eq!(
            rx.recv().await.unwrap(),
            PagingAction::SuccessInitialLoad {
                elements: elements(0..2)
            }
        );
        assert_eq!(fetcher.pages_fetched(), vec![1]);
    }

    #[tokio::test]
    async fn test_fetch_failure_maps_to_error_action() {
        let (dispatcher, mut rx) = action_channel();
        let mut creator = ActionCreator::new(
            dispatcher,
            Arc::new(FailingFetcher::new("connection reset")),
        );
        let reducer = PagingReducer::new();

        creator.on_scroll_to_last(&reducer);

        assert_eq!(rx.recv().await.unwrap(), PagingAction::StartNextLoad);
        assert_eq!(
            rx.recv().await.unwrap(),
            PagingAction::Error {
                cause: FetchError::new(2, "connection reset")
            }
        );
    }

    #[tokio::test]
    async fn test_second_intent_while_in_flight_is_a_no_op() {
        let (dispatcher, mut rx) = action_channel();
        let fetcher = ScriptedFetcher::new()
            .with_page(elements(2..4))
            .with_page(elements(4..6));
        let mut creator = ActionCreator::new(dispatcher, Arc::new(fetcher.clone()));
        let reducer = PagingReducer::new();

        creator.on_scroll_to_last(&reducer);
        // The reducer flag has not flipped yet; the task slot must still
        // block the duplicate.
        creator.on_scroll_to_last(&reducer);

        assert_eq!(rx.recv().await.unwrap(), PagingAction::StartNextLoad);
        assert!(rx.recv().await.unwrap().is_fetch_outcome());
        assert!(rx.try_recv().is_err());
        assert_eq!(fetcher.pages_fetched(), vec![2]);
    }

    #[tokio::test]
    async fn test_fetch_done_reopens_the_guard() {
        let (dispatcher, mut rx) = action_channel();
        let fetcher = ScriptedFetcher::new()
            .with_page(elements(2..4))
            .with_page(elements(4..6));
        let mut creator = ActionCreator::new(dispatcher, Arc::new(fetcher.clone()));
        let mut reducer = PagingReducer::new();

        creator.on_scroll_to_last(&reducer);
        reducer.apply(rx.recv().await.unwrap()); // StartNextLoad
        reducer.apply(rx.recv().await.unwrap()); // SuccessNextLoad
        creator.fetch_done();
        assert!(!creator.is_fetch_in_flight(&reducer));

        creator.on_scroll_to_last(&reducer);
        assert_eq!(rx.recv().await.unwrap(), PagingAction::StartNextLoad);
        rx.recv().await.unwrap(); // SuccessNextLoad - fetch has run
        assert_eq!(fetcher.pages_fetched(), vec![2, 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_creator_aborts_the_in_flight_fetch() {
        let (dispatcher, mut rx) = action_channel();
        let fetcher = FixedDelayFetcher::new(2, Duration::from_secs(1));
        let mut creator = ActionCreator::new(dispatcher, Arc::new(fetcher));
        let reducer = PagingReducer::new();

        creator.on_scroll_to_last(&reducer);
        assert_eq!(rx.recv().await.unwrap(), PagingAction::StartNextLoad);

        drop(creator);
        tokio::time::sleep(Duration::from_secs(2)).await;

        // The completion must never arrive.
        assert!(rx.try_recv().is_err());
    }
}
