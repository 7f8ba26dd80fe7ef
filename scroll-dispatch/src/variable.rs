//! Observable value holder with change deduplication
//!
//! `Variable<T>` is the reactive primitive of this crate: it stores the
//! current value and an explicit observer list. Setting a value equal to
//! the current one is a no-op; observers are notified synchronously, in
//! registration order. Observing replays the current value immediately
//! (replay-latest), so a late subscriber starts from a known state.
//!
//! Mutation requires `&mut Variable`, so an observer callback can read
//! but never write the variable it observes - re-entrant mutation is
//! ruled out at compile time.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::dispose::Subscription;

type Callback<T> = Rc<RefCell<dyn FnMut(&T)>>;

struct Observer<T> {
    id: u64,
    callback: Callback<T>,
}

struct ObserverList<T> {
    next_id: u64,
    entries: Vec<Observer<T>>,
}

impl<T> ObserverList<T> {
    fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }
}

/// A mutable holder broadcasting value changes to observers.
///
/// # Example
/// ```
/// use scroll_dispatch::Variable;
///
/// let mut counter = Variable::new(0u32);
/// let _sub = counter.observe(|value| println!("counter is {value}"));
///
/// assert!(counter.set(1)); // notifies
/// assert!(!counter.set(1)); // deduplicated, no notification
/// ```
pub struct Variable<T> {
    value: T,
    // Shared with subscriptions so deregistration does not need to
    // borrow the variable itself.
    observers: Rc<RefCell<ObserverList<T>>>,
}

impl<T: Clone + PartialEq + 'static> Variable<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            observers: Rc::new(RefCell::new(ObserverList::new())),
        }
    }

    /// Borrow the current value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Clone the current value out.
    pub fn get(&self) -> T {
        self.value.clone()
    }

    /// Replace the value, notifying observers iff it actually changed.
    ///
    /// Returns `true` when the new value differed from the previous one.
    pub fn set(&mut self, next: T) -> bool {
        if self.value == next {
            return false;
        }
        self.value = next;
        self.notify();
        true
    }

    /// Register an observer; it is called immediately with the current
    /// value, then on every subsequent change.
    ///
    /// Dropping the returned [`Subscription`] deregisters the observer.
    pub fn observe(&self, observer: impl FnMut(&T) + 'static) -> Subscription {
        let callback: Callback<T> = Rc::new(RefCell::new(observer));
        // Replay-latest before joining the notification list.
        (callback.borrow_mut())(&self.value);

        let id = {
            let mut list = self.observers.borrow_mut();
            let id = list.next_id;
            list.next_id += 1;
            list.entries.push(Observer {
                id,
                callback: Rc::clone(&callback),
            });
            id
        };

        let weak: Weak<RefCell<ObserverList<T>>> = Rc::downgrade(&self.observers);
        Subscription::new(move || {
            if let Some(list) = weak.upgrade() {
                list.borrow_mut().entries.retain(|entry| entry.id != id);
            }
        })
    }

    /// Number of registered observers.
    pub fn observer_count(&self) -> usize {
        self.observers.borrow().entries.len()
    }

    fn notify(&self) {
        // Snapshot the callbacks so an observer registering another
        // observer mid-notification does not invalidate the iteration.
        let callbacks: Vec<Callback<T>> = self
            .observers
            .borrow()
            .entries
            .iter()
            .map(|entry| Rc::clone(&entry.callback))
            .collect();
        for callback in callbacks {
            (callback.borrow_mut())(&self.value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_set_deduplicates() {
        let mut var = Variable::new(1);
        assert!(!var.set(1));
        assert!(var.set(2));
        assert!(!var.set(2));
        assert_eq!(var.get(), 2);
    }

    #[test]
    fn test_observe_replays_current_value() {
        let var = Variable::new(7);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = seen.clone();
        let _sub = var.observe(move |v| s.borrow_mut().push(*v));

        assert_eq!(*seen.borrow(), vec![7]);
    }

    #[test]
    fn test_observers_notified_in_registration_order() {
        let mut var = Variable::new(0);
        let order = Rc::new(RefCell::new(Vec::new()));

        let o = order.clone();
        let _first = var.observe(move |_| o.borrow_mut().push("first"));
        let o = order.clone();
        let _second = var.observe(move |_| o.borrow_mut().push("second"));

        order.borrow_mut().clear();
        var.set(1);
        assert_eq!(*order.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_no_notification_for_equal_value() {
        let mut var = Variable::new(String::from("a"));
        let count = Rc::new(RefCell::new(0));
        let c = count.clone();
        let _sub = var.observe(move |_| *c.borrow_mut() += 1);
        assert_eq!(*count.borrow(), 1); // replay

        var.set("a".into());
        assert_eq!(*count.borrow(), 1);

        var.set("b".into());
        assert_eq!(*count.borrow(), 2);
    }

    #[test]
    fn test_dropping_subscription_deregisters() {
        let mut var = Variable::new(0);
        let count = Rc::new(RefCell::new(0));

        let c = count.clone();
        let sub = var.observe(move |_| *c.borrow_mut() += 1);
        assert_eq!(var.observer_count(), 1);

        drop(sub);
        assert_eq!(var.observer_count(), 0);

        var.set(1);
        assert_eq!(*count.borrow(), 1); // only the replay
    }

    #[test]
    fn test_two_observers_independent_disposal() {
        let mut var = Variable::new(0);
        let a = Rc::new(RefCell::new(0));
        let b = Rc::new(RefCell::new(0));

        let ca = a.clone();
        let sub_a = var.observe(move |v| *ca.borrow_mut() = *v);
        let cb = b.clone();
        let _sub_b = var.observe(move |v| *cb.borrow_mut() = *v);

        var.set(5);
        assert_eq!(*a.borrow(), 5);
        assert_eq!(*b.borrow(), 5);

        sub_a.dispose();
        var.set(9);
        assert_eq!(*a.borrow(), 5);
        assert_eq!(*b.borrow(), 9);
    }
}
