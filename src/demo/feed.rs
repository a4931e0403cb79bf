use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::ArcStr;
use crate::delegate::{Delegate, LoadError, LoadHandler, LoadMoreHandler};
use crate::log::Log;
use crate::view::{Retry, View};

const SCOPE: &str = "demo.feed";

/// Shape of the fake feed.
#[derive(Debug, Clone)]
pub struct FeedOptions {
    /// Number of pages the feed has
    pub pages: usize,
    /// Items per page
    pub page_size: usize,
    /// Simulated network latency of every load
    pub latency: Duration,
    /// Page (0-based) whose first attempt fails; the retry succeeds
    pub failing_page: Option<usize>,
    /// Make the first load come back empty
    pub empty: bool,
}

impl Default for FeedOptions {
    fn default() -> Self {
        Self {
            pages: 5,
            page_size: 20,
            latency: Duration::from_millis(700),
            failing_page: None,
            empty: false,
        }
    }
}

impl FeedOptions {
    fn page(&self, page: usize) -> Vec<ArcStr> {
        (0..self.page_size)
            .map(|i| {
                let n = page * self.page_size + i + 1;
                ArcStr::from(format!("Item {n} (page {})", page + 1))
            })
            .collect()
    }
}

#[derive(Debug, Default)]
pub struct FeedData {
    pub items: Vec<ArcStr>,
    /// Pages loaded so far
    pub pages: usize,
    failure_pending: bool,
    empty_pending: bool,
}

/// The items loaded so far, shared between the delegate and the screen.
#[derive(Debug, Clone, Default)]
pub struct Feed {
    data: Arc<Mutex<FeedData>>,
}

impl Feed {
    pub fn new(options: &FeedOptions) -> Self {
        Self {
            data: Arc::new(Mutex::new(FeedData {
                failure_pending: options.failing_page.is_some(),
                empty_pending: options.empty,
                ..FeedData::default()
            })),
        }
    }

    pub fn lock(&self) -> MutexGuard<'_, FeedData> {
        self.data
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Items in `range`, clamped to what is loaded.
    pub fn slice(&self, range: std::ops::Range<usize>) -> Vec<ArcStr> {
        let data = self.lock();
        let end = range.end.min(data.items.len());
        let start = range.start.min(end);
        data.items[start..end].to_vec()
    }
}

/// A paged feed served from memory after a delay.
#[derive(Debug, Clone)]
pub struct FeedDelegate {
    options: FeedOptions,
    feed: Feed,
    log: Log,
}

impl FeedDelegate {
    pub fn new(options: FeedOptions, feed: Feed, log: Log) -> Self {
        Self { options, feed, log }
    }

    fn should_fail(&self, page: usize) -> bool {
        let mut data = self.feed.lock();
        if self.options.failing_page == Some(page) && data.failure_pending {
            data.failure_pending = false;
            true
        } else {
            false
        }
    }

    /// Loads page one in place of whatever was loaded before.
    fn load_first_page(&self, handler: LoadHandler) {
        let delegate = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delegate.options.latency).await;

            if delegate.should_fail(0) {
                delegate.log.warn(SCOPE, "Page 1 failed");
                handler.finish(true, Some(LoadError::msg("Could not reach the feed")));
                return;
            }

            let is_empty = {
                let mut data = delegate.feed.lock();
                if std::mem::take(&mut data.empty_pending) {
                    data.items.clear();
                    data.pages = 0;
                } else {
                    data.items = delegate.options.page(0);
                    data.pages = 1;
                }
                data.items.is_empty()
            };
            delegate.log.info(SCOPE, format!("Loaded page 1 (empty: {is_empty})"));
            handler.finish(is_empty, None);
        });
    }
}

impl Delegate for FeedDelegate {
    fn begin_initial_load(&mut self, handler: LoadHandler) {
        self.load_first_page(handler);
    }

    fn begin_refresh(&mut self, handler: LoadHandler) {
        self.load_first_page(handler);
    }

    fn begin_load_more(&mut self, handler: LoadMoreHandler) {
        let delegate = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delegate.options.latency).await;

            let next = delegate.feed.lock().pages;
            if next >= delegate.options.pages {
                handler.finish(false, None, false);
                return;
            }
            if delegate.should_fail(next) {
                delegate.log.warn(SCOPE, format!("Page {} failed", next + 1));
                let error = LoadError::msg(format!("Page {} failed to load", next + 1));
                handler.finish(true, Some(error), true);
                return;
            }

            {
                let mut data = delegate.feed.lock();
                data.items.extend(delegate.options.page(next));
                data.pages = next + 1;
            }
            delegate.log.info(SCOPE, format!("Loaded page {}", next + 1));
            handler.finish(next + 1 < delegate.options.pages, None, false);
        });
    }

    fn view_for_empty_or_error(&self, error: Option<&LoadError>) -> Option<View> {
        match error {
            Some(_) => None,
            None => Some(View::Notice {
                message: ArcStr::from("Nothing in the feed yet"),
                retry: Some(Retry::Refresh),
            }),
        }
    }
}
