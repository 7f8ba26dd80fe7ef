//! Flux-style state management core for infinite-scroll list views
//!
//! One screen's pagination flow, as a unidirectional data-flow engine:
//!
//! - **Action**: events describing things that happened (a load started,
//!   a page arrived, a fetch failed)
//! - **Dispatcher**: the shared, ordered action stream
//! - **ActionCreator**: translates UI intents into actions; the only
//!   place that invokes the async fetch and the only concurrency
//!   control (no duplicate fetches while one is in flight)
//! - **Reducer**: the sole owner and mutator of session state (page,
//!   elements, loading flag), each field a deduplicating observable
//!   [`Variable`]
//! - **Getter**: pure derivation of the presentation rows, a trailing
//!   loading sentinel included
//! - **Store**: composes all of the above around a single channel
//!
//! Control flow: intent -> `ActionCreator` -> channel -> `Reducer` ->
//! `Getter` -> UI observes `list_items`.
//!
//! # Example
//!
//! ```no_run
//! use scroll_dispatch::{FixedDelayFetcher, Store};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut store = Store::new(FixedDelayFetcher::new(20, Duration::from_millis(300)));
//!
//!     // Render on every change of the presentation rows.
//!     let _sub = store.list_items().observe(|items| {
//!         println!("{} rows", items.len());
//!     });
//!
//!     store.on_refresh();
//!     loop {
//!         // Fetch completions re-enter through the store's channel.
//!         store.process_next().await;
//!     }
//! }
//! ```
//!
//! # Concurrency model
//!
//! Single-threaded cooperative per store: dispatch, reduction and
//! recomputation all run synchronously on the task that pumps the
//! store. The only async operation is the fetch, spawned on the tokio
//! runtime; its completion comes back as an action through the channel,
//! so the start action is always applied strictly before the matching
//! success/error. Teardown is scoped: dropping the store aborts the
//! in-flight fetch and releases every subscription.

pub mod action;
pub mod creator;
pub mod dispatcher;
pub mod dispose;
pub mod fetch;
pub mod getter;
pub mod reducer;
pub mod state;
pub mod store;
pub mod testing;
pub mod variable;

pub use action::{Action, PagingAction};
pub use creator::ActionCreator;
pub use dispatcher::{action_channel, Dispatcher};
pub use dispose::{DisposeBag, Subscription};
pub use fetch::{FetchError, Fetcher, FixedDelayFetcher};
pub use getter::ListGetter;
pub use reducer::{PagingReducer, FIRST_PAGE};
pub use state::{Element, ListItem};
pub use store::Store;
pub use variable::Variable;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::{Action, PagingAction};
    pub use crate::creator::ActionCreator;
    pub use crate::dispatcher::{action_channel, Dispatcher};
    pub use crate::dispose::{DisposeBag, Subscription};
    pub use crate::fetch::{FetchError, Fetcher, FixedDelayFetcher};
    pub use crate::getter::ListGetter;
    pub use crate::reducer::{PagingReducer, FIRST_PAGE};
    pub use crate::state::{Element, ListItem};
    pub use crate::store::Store;
    pub use crate::variable::Variable;
}
