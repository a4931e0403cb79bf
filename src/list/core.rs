use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::task::JoinHandle;

use super::StatefulList;
use super::message::Message;
use crate::controller::{Controller, Settings};
use crate::delegate::{Completion, Delegate};
use crate::error::Error;
use crate::log::Log;
use crate::presenter::ViewPresenter;

const SCOPE: &str = "list.actor";

/// Owner of a [`Controller`]. Requests and delegate completions are applied
/// one at a time by the same task.
pub struct Core<D, P> {
    controller: Controller<D, P>,
    completions: UnboundedReceiver<Completion>,
    log: Log,
}

impl<D, P> Core<D, P>
where
    D: Delegate + 'static,
    P: ViewPresenter + 'static,
{
    pub fn new(delegate: D, presenter: P, settings: Settings, log: Log) -> Result<Self, Error> {
        let (controller, completions) = Controller::new(delegate, presenter, settings, log.clone())?;
        Ok(Self {
            controller,
            completions,
            log,
        })
    }

    /// Spawns the actor and returns the public interface and join handle.
    ///
    /// The task stops once every [`StatefulList`] handle is dropped.
    pub fn spawn(self) -> (StatefulList, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::channel(crate::BUFFER_SIZE);
        let Self {
            mut controller,
            mut completions,
            log,
        } = self;

        let handle = tokio::spawn(async move {
            loop {
                tokio::select! {
                    // Completions first, so a result reported before a request
                    // is applied before that request.
                    biased;
                    Some(completion) = completions.recv() => controller.complete(completion),
                    message = rx.recv() => match message {
                        Some(message) => Self::handle(&mut controller, message),
                        None => break,
                    },
                }
            }
            log.info(SCOPE, "All handles dropped, stopping");
        });

        (StatefulList::Actual(tx), handle)
    }

    fn handle(controller: &mut Controller<D, P>, message: Message) {
        match message {
            Message::TriggerInitialLoad {
                show_list_underneath,
                tx,
            } => {
                let _ = tx.send(controller.trigger_initial_load(show_list_underneath));
            }
            Message::TriggerPullToRefresh { tx } => {
                let _ = tx.send(controller.trigger_pull_to_refresh());
            }
            Message::TriggerLoadMore => controller.trigger_load_more(),
            Message::ScrollPositionChanged { geometry, tx } => {
                let _ = tx.send(controller.scroll_position_changed(geometry));
            }
            Message::SetCanPullToRefresh(enabled) => controller.set_can_pull_to_refresh(enabled),
            Message::SetCanLoadMore(enabled) => controller.set_can_load_more(enabled),
            Message::SetLoadMoreThreshold { threshold, tx } => {
                let _ = tx.send(controller.set_load_more_threshold(threshold));
            }
            Message::RegisterCellTemplate(identifier) => {
                controller.register_cell_template(identifier)
            }
            Message::Snapshot { tx } => {
                let _ = tx.send(controller.snapshot());
            }
        }
    }
}
