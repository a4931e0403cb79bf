mod core;
mod data;
mod message;
mod mock;

use anyhow::Context;
use tokio::sync::{mpsc::Sender, oneshot};

pub use data::{BoolOpt, Data, PathOpt, USizeOpt};
use message::Message;

use crate::{
    ArcPath, controller::Settings, error::Error, log::LogLevel, trigger::validate_threshold,
};

/// The configuration actor that provides a thread-safe interface for configuration operations.
///
/// This enum represents either a real configuration actor backed by a TOML
/// file or a mock implementation for testing purposes.
///
/// # Examples
/// ```ignore
/// let config = Config::spawn(config_path);
/// if config.load().await.is_err() {
///     config.save().await?;
/// }
/// let settings = config.settings().await?;
/// ```
///
/// # Thread Safety
/// Cloning is cheap as it only copies the channel sender.
#[derive(Debug, Clone)]
pub enum Config {
    /// A real configuration actor that reads from and writes to a file
    Actual(Sender<Message>),
    /// A mock implementation for testing that stores data in memory
    Mock(mock::Mock),
}

impl Config {
    /// Spawns a configuration actor for the file at `path`. Nothing is read
    /// until [`Config::load`] is called.
    pub fn spawn(path: ArcPath) -> Self {
        let (config, _) = self::core::Core::new(path).spawn();
        config
    }

    pub fn mock(data: Data) -> Self {
        Self::Mock(mock::Mock::new(data))
    }

    /// Sends a request to the actor and waits for its answer.
    async fn ask<T>(
        sender: &Sender<Message>,
        request: impl FnOnce(oneshot::Sender<T>) -> Message,
    ) -> anyhow::Result<T> {
        let (tx, rx) = oneshot::channel();
        sender
            .send(request(tx))
            .await
            .map_err(|_| Error::ActorGone("config"))?;
        Ok(rx.await.map_err(|_| Error::ActorGone("config"))?)
    }

    /// Sends a message that has no answer.
    async fn tell(sender: &Sender<Message>, message: Message) -> anyhow::Result<()> {
        sender
            .send(message)
            .await
            .map_err(|_| Error::ActorGone("config"))?;
        Ok(())
    }

    /// Loads the configuration from the file.
    ///
    /// # Errors
    /// Fails when the file is missing, is not valid TOML, or holds an invalid
    /// threshold. The mock always succeeds.
    pub async fn load(&self) -> anyhow::Result<()> {
        match self {
            Self::Actual(sender) => Self::ask(sender, |tx| Message::Load { tx })
                .await
                .context("Loading config with Config actor")?,
            Self::Mock(_) => Ok(()),
        }
    }

    /// Saves the current configuration to the file.
    pub async fn save(&self) -> anyhow::Result<()> {
        match self {
            Self::Actual(sender) => Self::ask(sender, |tx| Message::Save { tx })
                .await
                .context("Saving config with Config actor")?,
            Self::Mock(_) => Ok(()),
        }
    }

    /// A snapshot of every configured value.
    pub async fn data(&self) -> anyhow::Result<Data> {
        match self {
            Self::Actual(sender) => Self::ask(sender, |tx| Message::GetData { tx }).await,
            Self::Mock(mock) => Ok(mock.data().await),
        }
    }

    pub async fn path(&self, opt: PathOpt) -> anyhow::Result<ArcPath> {
        match self {
            Self::Actual(sender) => Self::ask(sender, |tx| Message::GetPath { opt, tx }).await,
            Self::Mock(mock) => Ok(mock.path(opt).await),
        }
    }

    pub async fn set_path(&self, opt: PathOpt, path: ArcPath) -> anyhow::Result<()> {
        match self {
            Self::Actual(sender) => Self::tell(sender, Message::SetPath { opt, path }).await,
            Self::Mock(mock) => {
                mock.set_path(opt, path).await;
                Ok(())
            }
        }
    }

    pub async fn log_level(&self) -> anyhow::Result<LogLevel> {
        match self {
            Self::Actual(sender) => Self::ask(sender, |tx| Message::GetLogLevel { tx }).await,
            Self::Mock(mock) => Ok(mock.log_level().await),
        }
    }

    pub async fn set_log_level(&self, level: LogLevel) -> anyhow::Result<()> {
        match self {
            Self::Actual(sender) => Self::tell(sender, Message::SetLogLevel { level }).await,
            Self::Mock(mock) => {
                mock.set_log_level(level).await;
                Ok(())
            }
        }
    }

    pub async fn usize(&self, opt: USizeOpt) -> anyhow::Result<usize> {
        match self {
            Self::Actual(sender) => Self::ask(sender, |tx| Message::GetUSize { opt, tx }).await,
            Self::Mock(mock) => Ok(mock.usize(opt).await),
        }
    }

    pub async fn set_usize(&self, opt: USizeOpt, value: usize) -> anyhow::Result<()> {
        match self {
            Self::Actual(sender) => {
                Self::tell(sender, Message::SetUSize { opt, size: value }).await
            }
            Self::Mock(mock) => {
                mock.set_usize(opt, value).await;
                Ok(())
            }
        }
    }

    pub async fn bool(&self, opt: BoolOpt) -> anyhow::Result<bool> {
        match self {
            Self::Actual(sender) => Self::ask(sender, |tx| Message::GetBool { opt, tx }).await,
            Self::Mock(mock) => Ok(mock.bool(opt).await),
        }
    }

    pub async fn set_bool(&self, opt: BoolOpt, value: bool) -> anyhow::Result<()> {
        match self {
            Self::Actual(sender) => Self::tell(sender, Message::SetBool { opt, value }).await,
            Self::Mock(mock) => {
                mock.set_bool(opt, value).await;
                Ok(())
            }
        }
    }

    pub async fn load_more_threshold(&self) -> anyhow::Result<f64> {
        match self {
            Self::Actual(sender) => Self::ask(sender, |tx| Message::GetThreshold { tx }).await,
            Self::Mock(mock) => Ok(mock.load_more_threshold().await),
        }
    }

    /// Sets the load-more threshold.
    ///
    /// # Errors
    /// [`Error::InvalidThreshold`] for negative or non-finite values.
    pub async fn set_load_more_threshold(&self, threshold: f64) -> anyhow::Result<()> {
        match self {
            Self::Actual(sender) => {
                Self::ask(sender, |tx| Message::SetThreshold { threshold, tx }).await??
            }
            Self::Mock(mock) => mock.set_load_more_threshold(threshold).await?,
        }
        Ok(())
    }

    /// The list settings described by this configuration.
    pub async fn settings(&self) -> anyhow::Result<Settings> {
        let data = self.data().await?;
        Ok(Settings {
            can_pull_to_refresh: data.bool(BoolOpt::CanPullToRefresh),
            can_load_more: data.bool(BoolOpt::CanLoadMore),
            load_more_threshold: validate_threshold(data.load_more_threshold())?,
        })
    }
}
