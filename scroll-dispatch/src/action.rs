//! Actions describing everything that can happen to the paging session

use std::fmt::Debug;

use crate::fetch::FetchError;
use crate::state::Element;

/// Marker trait for actions that can travel through a [`Dispatcher`].
///
/// Actions represent things that happened. They should be:
/// - Clone: actions may be logged or handed to multiple observers
/// - Debug: for debugging and logging
/// - Send + 'static: fetch completions dispatch from spawned tasks
///
/// [`Dispatcher`]: crate::Dispatcher
pub trait Action: Clone + Debug + Send + 'static {
    /// Get the action name for logging and filtering
    fn name(&self) -> &'static str;
}

/// The closed set of events driving the pagination state machine.
///
/// Start/Success pairs bracket one fetch; `Error` terminates a fetch of
/// either kind. Created only by the [`ActionCreator`], consumed only by
/// the [`PagingReducer`].
///
/// [`ActionCreator`]: crate::ActionCreator
/// [`PagingReducer`]: crate::PagingReducer
#[derive(Clone, Debug, PartialEq)]
pub enum PagingAction {
    /// A refresh fetch of the first page began.
    StartInitialLoad,
    /// The first page arrived; replaces the session.
    SuccessInitialLoad { elements: Vec<Element> },
    /// A next-page fetch began.
    StartNextLoad,
    /// The next page arrived; appended to the session.
    SuccessNextLoad { elements: Vec<Element> },
    /// A fetch of either kind failed.
    Error { cause: FetchError },
}

impl Action for PagingAction {
    fn name(&self) -> &'static str {
        match self {
            PagingAction::StartInitialLoad => "StartInitialLoad",
            PagingAction::SuccessInitialLoad { .. } => "SuccessInitialLoad",
            PagingAction::StartNextLoad => "StartNextLoad",
            PagingAction::SuccessNextLoad { .. } => "SuccessNextLoad",
            PagingAction::Error { .. } => "Error",
        }
    }
}

impl PagingAction {
    /// True for the actions that conclude an in-flight fetch.
    pub fn is_fetch_outcome(&self) -> bool {
        matches!(
            self,
            PagingAction::SuccessInitialLoad { .. }
                | PagingAction::SuccessNextLoad { .. }
                | PagingAction::Error { .. }
        )
    }
}
