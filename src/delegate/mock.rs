use std::sync::{Arc, Mutex, MutexGuard};

use super::{Delegate, LoadError, LoadHandler, LoadMoreHandler};
use crate::view::View;

/// State shared between a [`MockDelegate`] and the test holding a clone of it.
#[derive(Debug, Default)]
pub struct MockData {
    /// Handlers of initial loads that have not been taken yet
    pub initial_loads: Vec<LoadHandler>,
    /// Handlers of refreshes that have not been taken yet
    pub refreshes: Vec<LoadHandler>,
    /// Handlers of load-mores that have not been taken yet
    pub load_mores: Vec<LoadMoreHandler>,
    /// How many initial loads were begun in total
    pub initial_load_count: usize,
    /// How many refreshes were begun in total
    pub refresh_count: usize,
    /// How many load-mores were begun in total
    pub load_more_count: usize,
    /// Custom initial-load placeholder
    pub initial_view: Option<View>,
    /// Custom empty/error placeholder
    pub empty_view: Option<View>,
    /// Custom load-more footer
    pub footer_view: Option<View>,
    /// Errors passed to the view suppliers, most recent last
    pub seen_errors: Vec<Option<String>>,
}

/// Delegate that records every begun load and keeps its handler so a test
/// can finish it whenever it likes.
#[derive(Debug, Clone, Default)]
pub struct MockDelegate {
    data: Arc<Mutex<MockData>>,
}

impl MockDelegate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_views(initial: Option<View>, empty: Option<View>, footer: Option<View>) -> Self {
        let delegate = Self::new();
        {
            let mut data = delegate.lock();
            data.initial_view = initial;
            data.empty_view = empty;
            data.footer_view = footer;
        }
        delegate
    }

    /// Direct access to the recorded state.
    pub fn lock(&self) -> MutexGuard<'_, MockData> {
        self.data
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Takes the oldest pending initial-load handler.
    pub fn take_initial_load(&self) -> Option<LoadHandler> {
        let mut data = self.lock();
        (!data.initial_loads.is_empty()).then(|| data.initial_loads.remove(0))
    }

    pub fn take_refresh(&self) -> Option<LoadHandler> {
        let mut data = self.lock();
        (!data.refreshes.is_empty()).then(|| data.refreshes.remove(0))
    }

    pub fn take_load_more(&self) -> Option<LoadMoreHandler> {
        let mut data = self.lock();
        (!data.load_mores.is_empty()).then(|| data.load_mores.remove(0))
    }

    pub fn initial_load_count(&self) -> usize {
        self.lock().initial_load_count
    }

    pub fn refresh_count(&self) -> usize {
        self.lock().refresh_count
    }

    pub fn load_more_count(&self) -> usize {
        self.lock().load_more_count
    }
}

impl Delegate for MockDelegate {
    fn begin_initial_load(&mut self, handler: LoadHandler) {
        let mut data = self.lock();
        data.initial_load_count += 1;
        data.initial_loads.push(handler);
    }

    fn begin_refresh(&mut self, handler: LoadHandler) {
        let mut data = self.lock();
        data.refresh_count += 1;
        data.refreshes.push(handler);
    }

    fn begin_load_more(&mut self, handler: LoadMoreHandler) {
        let mut data = self.lock();
        data.load_more_count += 1;
        data.load_mores.push(handler);
    }

    fn view_for_initial_load(&self) -> Option<View> {
        self.lock().initial_view.clone()
    }

    fn view_for_empty_or_error(&self, error: Option<&LoadError>) -> Option<View> {
        let mut data = self.lock();
        data.seen_errors.push(error.map(ToString::to_string));
        data.empty_view.clone()
    }

    fn view_for_load_more_footer(&self, error: Option<&LoadError>) -> Option<View> {
        let mut data = self.lock();
        data.seen_errors.push(error.map(ToString::to_string));
        data.footer_view.clone()
    }
}
