mod core;
mod message;
mod mock;

use tokio::sync::{mpsc::Sender, oneshot};

use message::Message;

use crate::ArcStr;
use crate::controller::{Settings, Snapshot};
use crate::delegate::{Delegate, MockDelegate};
use crate::error::Error;
use crate::log::Log;
use crate::presenter::{MockPresenter, ViewPresenter};
use crate::trigger::ScrollGeometry;

/// The StatefulList actor: owns the loading state machine of one list and
/// applies every trigger, scroll event, setting change and load completion in
/// order.
///
/// # Examples
/// ```ignore
/// let list = StatefulList::spawn(delegate, presenter, config.settings().await?, log)?;
/// list.trigger_initial_load(false).await?;
/// list.scroll_position_changed(ScrollGeometry::new(40.0, 60.0, 20.0)).await?;
/// ```
///
/// # Thread Safety
/// Cloning is cheap as it only copies the channel sender. The actor stops
/// when the last handle is dropped.
#[derive(Debug, Clone)]
pub enum StatefulList {
    Actual(Sender<Message>),
    Mock(mock::Mock),
}

impl StatefulList {
    /// Spawns the actor for a delegate and a presenter.
    ///
    /// # Errors
    /// Fails if the settings carry an invalid threshold.
    pub fn spawn<D, P>(
        delegate: D,
        presenter: P,
        settings: Settings,
        log: Log,
    ) -> anyhow::Result<Self>
    where
        D: Delegate + 'static,
        P: ViewPresenter + 'static,
    {
        let (list, _) = self::core::Core::new(delegate, presenter, settings, log)?.spawn();
        Ok(list)
    }

    /// A list driven inline, without a task, over the mock collaborators.
    pub fn mock(
        delegate: MockDelegate,
        presenter: MockPresenter,
        settings: Settings,
    ) -> anyhow::Result<Self> {
        Ok(Self::Mock(mock::Mock::new(delegate, presenter, settings)?))
    }

    async fn ask<T>(
        sender: &Sender<Message>,
        request: impl FnOnce(oneshot::Sender<T>) -> Message,
    ) -> anyhow::Result<T> {
        let (tx, rx) = oneshot::channel();
        sender
            .send(request(tx))
            .await
            .map_err(|_| Error::ActorGone("list"))?;
        Ok(rx.await.map_err(|_| Error::ActorGone("list"))?)
    }

    async fn tell(sender: &Sender<Message>, message: Message) -> anyhow::Result<()> {
        sender
            .send(message)
            .await
            .map_err(|_| Error::ActorGone("list"))?;
        Ok(())
    }

    /// Starts the first load.
    ///
    /// # Returns
    /// `false` if a load is already outstanding.
    pub async fn trigger_initial_load(&self, show_list_underneath: bool) -> anyhow::Result<bool> {
        match self {
            Self::Actual(sender) => {
                Self::ask(sender, |tx| Message::TriggerInitialLoad {
                    show_list_underneath,
                    tx,
                })
                .await
            }
            Self::Mock(mock) => Ok(mock.with(|c| c.trigger_initial_load(show_list_underneath))),
        }
    }

    /// Starts a pull-to-refresh.
    ///
    /// # Returns
    /// `false` if a load is outstanding or pull-to-refresh is disabled.
    pub async fn trigger_pull_to_refresh(&self) -> anyhow::Result<bool> {
        match self {
            Self::Actual(sender) => {
                Self::ask(sender, |tx| Message::TriggerPullToRefresh { tx }).await
            }
            Self::Mock(mock) => Ok(mock.with(|c| c.trigger_pull_to_refresh())),
        }
    }

    /// Starts loading the next page, unless a load is outstanding.
    pub async fn trigger_load_more(&self) -> anyhow::Result<()> {
        match self {
            Self::Actual(sender) => Self::tell(sender, Message::TriggerLoadMore).await,
            Self::Mock(mock) => {
                mock.with(|c| c.trigger_load_more());
                Ok(())
            }
        }
    }

    /// Reports the scroll position of the list.
    ///
    /// # Returns
    /// Whether load-more was started by this position.
    pub async fn scroll_position_changed(&self, geometry: ScrollGeometry) -> anyhow::Result<bool> {
        match self {
            Self::Actual(sender) => {
                Self::ask(sender, |tx| Message::ScrollPositionChanged { geometry, tx }).await
            }
            Self::Mock(mock) => Ok(mock.with(|c| c.scroll_position_changed(geometry))),
        }
    }

    pub async fn set_can_pull_to_refresh(&self, enabled: bool) -> anyhow::Result<()> {
        match self {
            Self::Actual(sender) => Self::tell(sender, Message::SetCanPullToRefresh(enabled)).await,
            Self::Mock(mock) => {
                mock.with(|c| c.set_can_pull_to_refresh(enabled));
                Ok(())
            }
        }
    }

    pub async fn set_can_load_more(&self, enabled: bool) -> anyhow::Result<()> {
        match self {
            Self::Actual(sender) => Self::tell(sender, Message::SetCanLoadMore(enabled)).await,
            Self::Mock(mock) => {
                mock.with(|c| c.set_can_load_more(enabled));
                Ok(())
            }
        }
    }

    /// # Errors
    /// Fails with [`Error::InvalidThreshold`] if the threshold is negative or
    /// not finite; the previous threshold stays in effect.
    pub async fn set_load_more_threshold(&self, threshold: f64) -> anyhow::Result<()> {
        let result = match self {
            Self::Actual(sender) => {
                Self::ask(sender, |tx| Message::SetLoadMoreThreshold { threshold, tx }).await?
            }
            Self::Mock(mock) => mock.with(|c| c.set_load_more_threshold(threshold)),
        };
        Ok(result?)
    }

    pub async fn register_cell_template(&self, identifier: ArcStr) -> anyhow::Result<()> {
        match self {
            Self::Actual(sender) => {
                Self::tell(sender, Message::RegisterCellTemplate(identifier)).await
            }
            Self::Mock(mock) => {
                mock.with(|c| c.register_cell_template(identifier));
                Ok(())
            }
        }
    }

    /// The current state of the list.
    pub async fn snapshot(&self) -> anyhow::Result<Snapshot> {
        match self {
            Self::Actual(sender) => Self::ask(sender, |tx| Message::Snapshot { tx }).await,
            Self::Mock(mock) => Ok(mock.with(|c| c.snapshot())),
        }
    }
}
