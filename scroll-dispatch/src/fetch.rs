//! The consumed fetch capability
//!
//! The core never talks to a network itself; it consumes a [`Fetcher`]
//! and maps its outcome to actions. [`FixedDelayFetcher`] is the
//! synthetic implementation used by the demo and by paused-clock tests;
//! injectable failing/scripted fetchers live in [`crate::testing`].

use std::time::Duration;

use async_trait::async_trait;

use crate::state::Element;

/// The one error kind this core models: a page fetch that failed.
///
/// Carried inside `PagingAction::Error`; the reducer reacts by clearing
/// the loading flag and nothing else.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchError {
    /// The page whose fetch failed.
    pub page: u64,
    /// Human-readable cause.
    pub message: String,
}

impl FetchError {
    pub fn new(page: u64, message: impl Into<String>) -> Self {
        Self {
            page,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "fetch for page {} failed: {}", self.page, self.message)
    }
}

impl std::error::Error for FetchError {}

/// Asynchronous page-fetch capability consumed by the [`ActionCreator`].
///
/// Contract: a fixed element count per page, any latency. Pages are
/// 1-based. Implementations must be shareable across tasks; the creator
/// holds one behind an `Arc` and calls it from spawned fetches.
///
/// [`ActionCreator`]: crate::ActionCreator
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, page: u64) -> Result<Vec<Element>, FetchError>;
}

/// Synthetic fetcher: fixed latency, fixed page size, deterministic ids.
///
/// Page `p` yields ids `(p - 1) * page_size .. p * page_size`.
#[derive(Clone, Debug)]
pub struct FixedDelayFetcher {
    page_size: u64,
    delay: Duration,
}

impl FixedDelayFetcher {
    pub fn new(page_size: u64, delay: Duration) -> Self {
        Self { page_size, delay }
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }
}

#[async_trait]
impl Fetcher for FixedDelayFetcher {
    async fn fetch(&self, page: u64) -> Result<Vec<Element>, FetchError> {
        tokio::time::sleep(self.delay).await;
        let first = page.saturating_sub(1) * self.page_size;
        Ok((first..first + self.page_size).map(Element::new).collect())
    }
}
