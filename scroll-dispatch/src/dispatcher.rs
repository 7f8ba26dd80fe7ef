//! The shared action stream
//!
//! One unbounded channel per store. Every action producer holds a
//! [`Dispatcher`] clone; the store owns the receiving end and pumps it.
//! `dispatch` is synchronous and fire-and-forget: it never blocks and
//! never fails (rates are human-interaction-bound, so backpressure is
//! not a concern). The channel preserves dispatch order.

use tokio::sync::mpsc;
use tracing::debug;

use crate::action::Action;

/// Create the shared action stream for one store.
///
/// Returns the sending handle and the receiver the store pumps.
pub fn action_channel<A: Action>() -> (Dispatcher<A>, mpsc::UnboundedReceiver<A>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Dispatcher { tx }, rx)
}

/// Sending handle of the action stream.
///
/// Cheap to clone; clones feed the same receiver.
#[derive(Clone, Debug)]
pub struct Dispatcher<A: Action> {
    tx: mpsc::UnboundedSender<A>,
}

impl<A: Action> Dispatcher<A> {
    /// Publish an action onto the stream.
    ///
    /// A send after the receiving store is gone is logged and dropped;
    /// nothing is left to react to it.
    pub fn dispatch(&self, action: A) {
        debug!(action = action.name(), "dispatch");
        if self.tx.send(action).is_err() {
            debug!("action channel closed, dropping action");
        }
    }

    /// True once the receiving store has been dropped.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
