mod mock;

use std::{fmt::Display, sync::Arc};

use tokio::sync::mpsc::UnboundedSender;

use crate::view::View;

pub use mock::{MockData, MockDelegate};

/// An opaque load failure reported by a [`Delegate`].
///
/// The core only looks at whether an error is present; its content is passed
/// on to placeholder construction for display. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct LoadError(Arc<anyhow::Error>);

impl LoadError {
    pub fn new(error: anyhow::Error) -> Self {
        Self(Arc::new(error))
    }

    /// Builds an error from a plain message.
    pub fn msg<M: Display + std::fmt::Debug + Send + Sync + 'static>(message: M) -> Self {
        Self::new(anyhow::Error::msg(message))
    }

    pub fn inner(&self) -> &anyhow::Error {
        &self.0
    }
}

impl Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<anyhow::Error> for LoadError {
    fn from(value: anyhow::Error) -> Self {
        Self::new(value)
    }
}

/// The result of a finished load, as delivered back to the list owner.
#[derive(Debug, Clone)]
pub enum Completion {
    InitialLoad {
        is_empty: bool,
        error: Option<LoadError>,
    },
    Refresh {
        is_empty: bool,
        error: Option<LoadError>,
    },
    LoadMore {
        can_load_more: bool,
        error: Option<LoadError>,
        show_error_view: bool,
    },
}

/// Which load a [`LoadHandler`] answers for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadKind {
    Initial,
    Refresh,
}

/// Completion handler for the initial load and for pull-to-refresh.
///
/// Finishing consumes the handler, so every load completes at most once. The
/// handler may be moved to and finished from any task or thread; the result is
/// queued and applied by the list owner.
#[derive(Debug)]
pub struct LoadHandler {
    kind: LoadKind,
    tx: UnboundedSender<Completion>,
}

impl LoadHandler {
    pub(crate) fn new(kind: LoadKind, tx: UnboundedSender<Completion>) -> Self {
        Self { kind, tx }
    }

    pub fn kind(&self) -> LoadKind {
        self.kind
    }

    /// Reports the outcome of the load.
    ///
    /// # Arguments
    /// * `is_empty` - Whether the list has no items after the load
    /// * `error` - The failure, if the load failed
    pub fn finish(self, is_empty: bool, error: Option<LoadError>) {
        let completion = match self.kind {
            LoadKind::Initial => Completion::InitialLoad { is_empty, error },
            LoadKind::Refresh => Completion::Refresh { is_empty, error },
        };
        // The owner is gone, nobody is left to care about the result.
        let _ = self.tx.send(completion);
    }
}

/// Completion handler for a load-more.
#[derive(Debug)]
pub struct LoadMoreHandler {
    tx: UnboundedSender<Completion>,
}

impl LoadMoreHandler {
    pub(crate) fn new(tx: UnboundedSender<Completion>) -> Self {
        Self { tx }
    }

    /// Reports the outcome of the page load.
    ///
    /// # Arguments
    /// * `can_load_more` - Whether further pages exist
    /// * `error` - The failure, if the page failed to load
    /// * `show_error_view` - Whether a failure should be surfaced in the footer
    pub fn finish(self, can_load_more: bool, error: Option<LoadError>, show_error_view: bool) {
        let _ = self.tx.send(Completion::LoadMore {
            can_load_more,
            error,
            show_error_view,
        });
    }
}

/// Performs the actual loads on behalf of a stateful list.
///
/// Each `begin_*` hook receives a handler that must be finished once the
/// load resolves. Hooks are called from the list owner and must not block;
/// slow work belongs on another task.
///
/// The view suppliers are optional. Returning `None` makes the list fall back
/// to the defaults in [`View`].
pub trait Delegate: Send {
    fn begin_initial_load(&mut self, handler: LoadHandler);

    fn begin_refresh(&mut self, handler: LoadHandler);

    fn begin_load_more(&mut self, handler: LoadMoreHandler);

    fn view_for_initial_load(&self) -> Option<View> {
        None
    }

    fn view_for_empty_or_error(&self, _error: Option<&LoadError>) -> Option<View> {
        None
    }

    fn view_for_load_more_footer(&self, _error: Option<&LoadError>) -> Option<View> {
        None
    }
}
