use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::mpsc::UnboundedReceiver;

use crate::controller::{Controller, Settings};
use crate::delegate::{Completion, MockDelegate};
use crate::error::Error;
use crate::log::Log;
use crate::presenter::MockPresenter;

type MockController = Controller<MockDelegate, MockPresenter>;

#[derive(Debug)]
struct Inner {
    controller: MockController,
    completions: UnboundedReceiver<Completion>,
}

/// Runs the controller inline instead of on a task.
///
/// Completions reported through handlers are applied before and after every
/// call, so a test sees their effect on its next request.
#[derive(Debug, Clone)]
pub struct Mock {
    inner: Arc<Mutex<Inner>>,
}

impl Mock {
    pub fn new(
        delegate: MockDelegate,
        presenter: MockPresenter,
        settings: Settings,
    ) -> Result<Self, Error> {
        let (controller, completions) =
            Controller::new(delegate, presenter, settings, Log::mock())?;
        Ok(Self {
            inner: Arc::new(Mutex::new(Inner {
                controller,
                completions,
            })),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut MockController) -> R) -> R {
        let mut inner = self.lock();
        let Inner {
            controller,
            completions,
        } = &mut *inner;

        while let Ok(completion) = completions.try_recv() {
            controller.complete(completion);
        }
        let result = f(controller);
        while let Ok(completion) = completions.try_recv() {
            controller.complete(completion);
        }
        result
    }
}
