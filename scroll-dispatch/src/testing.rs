//! Test utilities: injectable fetch doubles and an observer recorder
//!
//! - [`ScriptedFetcher`]: returns programmed outcomes per call and
//!   records which pages were asked for
//! - [`FailingFetcher`]: always fails, for exercising the error path
//! - [`record`]: capture every emission of a [`Variable`] into a vec

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::dispose::Subscription;
use crate::fetch::{FetchError, Fetcher};
use crate::state::Element;
use crate::variable::Variable;

/// A fetcher that plays back programmed outcomes in order.
///
/// Clones share the same script and page log, so a test can keep a
/// handle while the store owns another.
///
/// An unscripted call fails with a `FetchError` naming the page, which
/// keeps a misconfigured test from hanging.
#[derive(Clone, Default)]
pub struct ScriptedFetcher {
    inner: Arc<ScriptedInner>,
}

#[derive(Default)]
struct ScriptedInner {
    script: Mutex<VecDeque<Result<Vec<Element>, FetchError>>>,
    pages: Mutex<Vec<u64>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a successful page to the script.
    pub fn with_page(self, elements: Vec<Element>) -> Self {
        self.inner.script.lock().unwrap().push_back(Ok(elements));
        self
    }

    /// Append a failure to the script.
    pub fn with_failure(self, cause: FetchError) -> Self {
        self.inner.script.lock().unwrap().push_back(Err(cause));
        self
    }

    /// Pages requested so far, in call order.
    pub fn pages_fetched(&self) -> Vec<u64> {
        self.inner.pages.lock().unwrap().clone()
    }

    /// Number of fetch invocations so far.
    pub fn calls(&self) -> usize {
        self.inner.pages.lock().unwrap().len()
    }
}

#[async_trait]
impl Fetcher for ScriptedFetcher {
    async fn fetch(&self, page: u64) -> Result<Vec<Element>, FetchError> {
        self.inner.pages.lock().unwrap().push(page);
        self.inner
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::new(page, "no scripted outcome")))
    }
}

/// A fetcher whose every call fails with the given message.
#[derive(Clone, Debug)]
pub struct FailingFetcher {
    message: String,
}

impl FailingFetcher {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl Fetcher for FailingFetcher {
    async fn fetch(&self, page: u64) -> Result<Vec<Element>, FetchError> {
        Err(FetchError::new(page, self.message.clone()))
    }
}

/// Build elements with the given id range, the way the synthetic
/// fetcher numbers them.
pub fn elements(ids: std::ops::Range<u64>) -> Vec<Element> {
    ids.map(Element::new).collect()
}

/// Record every emission of a variable (including the replay of the
/// current value) for later assertion.
pub fn record<T: Clone + PartialEq + 'static>(
    variable: &Variable<T>,
) -> (Rc<RefCell<Vec<T>>>, Subscription) {
    let emissions = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&emissions);
    let subscription = variable.observe(move |value| sink.borrow_mut().push(value.clone()));
    (emissions, subscription)
}
