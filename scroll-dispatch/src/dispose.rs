//! Cancellation handles for observer registrations
//!
//! A [`Subscription`] undoes one registration when dropped (or when
//! [`dispose`](Subscription::dispose) is called explicitly). A
//! [`DisposeBag`] collects subscriptions so an owner can release them
//! all together on teardown.

use std::fmt;

/// A handle that cancels one registration.
///
/// Disposal runs exactly once: on explicit [`dispose`](Self::dispose),
/// or on drop. Keep the handle (typically in a [`DisposeBag`]) for as
/// long as the observer should stay registered.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Wrap a cancellation closure.
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Cancel the registration now.
    pub fn dispose(mut self) {
        self.run();
    }

    fn run(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("disposed", &self.cancel.is_none())
            .finish()
    }
}

/// An explicit list of cancellation handles released together.
///
/// Dropping the bag (or calling [`dispose`](Self::dispose)) disposes
/// every subscription it holds.
#[derive(Debug, Default)]
pub struct DisposeBag {
    subscriptions: Vec<Subscription>,
}

impl DisposeBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep a subscription alive until the bag is disposed.
    pub fn insert(&mut self, subscription: Subscription) {
        self.subscriptions.push(subscription);
    }

    /// Release all held subscriptions now.
    pub fn dispose(&mut self) {
        self.subscriptions.clear();
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}
