mod core;
mod data;
mod message;
mod mock;

use std::fmt::Display;

use tokio::sync::mpsc::{Sender, error::TrySendError};
use tokio::task::JoinHandle;

pub use self::core::{LOG_PREFIX, LogCore};
pub use data::{LogLevel, LogMessage};
use message::Message;

use crate::ArcPath;

/// The logging actor that provides a thread-safe interface for logging operations.
///
/// This enum represents either a real logging actor or a mock implementation
/// for testing purposes. Every message carries a scope naming the part of the
/// program that produced it.
///
/// # Examples
/// ```ignore
/// let log = Log::spawn(LogLevel::Warning, 7, log_dir).await?;
/// log.info("list", "phase idle -> loading-more");
/// ```
///
/// # Thread Safety
/// Cloning is cheap as it only copies the channel sender or the mock reference.
#[derive(Debug, Clone)]
pub enum Log {
    /// A real logging actor that writes to files and stderr
    Actual(Sender<Message>),
    /// A mock implementation for testing that keeps messages in memory
    Mock(mock::Mock),
}

impl Log {
    /// Builds a [`LogCore`] and spawns it.
    ///
    /// # Errors
    /// Returns an error if the log directory or files cannot be created.
    pub async fn spawn(level: LogLevel, max_age: usize, log_dir: ArcPath) -> anyhow::Result<Self> {
        let (log, _) = LogCore::build(level, max_age, log_dir).await?.spawn();
        Ok(log)
    }

    pub fn mock() -> Self {
        Self::Mock(mock::Mock::new())
    }

    /// Queues a message without blocking the caller. Messages sent after a
    /// flush are dropped.
    fn log(&self, scope: &'static str, message: String, level: LogLevel) {
        let sender = match self {
            Self::Mock(mock) => return mock.log(scope, message, level),
            Self::Actual(sender) => sender,
        };

        let message = Message::Log(LogMessage {
            level,
            scope,
            message,
        });
        if let Err(TrySendError::Full(message)) = sender.try_send(message) {
            let sender = sender.clone();
            if let Ok(runtime) = tokio::runtime::Handle::try_current() {
                runtime.spawn(async move {
                    let _ = sender.send(message).await;
                });
            }
        }
    }

    /// Log a message with the `INFO` level
    pub fn info<M: Display>(&self, scope: &'static str, message: M) {
        self.log(scope, message.to_string(), LogLevel::Info);
    }

    /// Log a message with the `WARNING` level
    pub fn warn<M: Display>(&self, scope: &'static str, message: M) {
        self.log(scope, message.to_string(), LogLevel::Warning);
    }

    /// Log a message with the `ERROR` level
    pub fn error<M: Display>(&self, scope: &'static str, message: M) {
        self.log(scope, message.to_string(), LogLevel::Error);
    }

    /// Log an info message if the result is an error
    /// and return the result as is
    pub fn info_on_error<T, E: Display>(
        &self,
        scope: &'static str,
        result: Result<T, E>,
    ) -> Result<T, E> {
        if let Err(err) = &result {
            self.log(scope, err.to_string(), LogLevel::Info);
        }
        result
    }

    /// Log a warning message if the result is an error
    /// and return the result as is
    pub fn warn_on_error<T, E: Display>(
        &self,
        scope: &'static str,
        result: Result<T, E>,
    ) -> Result<T, E> {
        if let Err(err) = &result {
            self.log(scope, err.to_string(), LogLevel::Warning);
        }
        result
    }

    /// Log an error message if the result is an error
    /// and return the result as is
    pub fn error_on_error<T, E: Display>(
        &self,
        scope: &'static str,
        result: Result<T, E>,
    ) -> Result<T, E> {
        if let Err(err) = &result {
            self.log(scope, err.to_string(), LogLevel::Error);
        }
        result
    }

    /// Flushes the logger by printing its buffered messages to stderr. After
    /// this the actor is gone and further messages are dropped.
    pub fn flush(self) -> JoinHandle<()> {
        match self {
            Self::Mock(mock) => {
                mock.flush();
                tokio::spawn(async {})
            }
            Self::Actual(sender) => tokio::spawn(async move {
                let _ = sender.send(Message::Flush).await;
                // The actor closes its end once everything is printed.
                sender.closed().await;
            }),
        }
    }

    /// Deletes log files older than the configured maximum age.
    pub async fn collect_garbage(&self) {
        if let Self::Actual(sender) = self {
            let _ = sender.send(Message::CollectGarbage).await;
        }
    }

    /// Messages recorded by a mock logger. `None` for the real actor.
    pub fn messages(&self) -> Option<Vec<LogMessage>> {
        match self {
            Self::Mock(mock) => Some(mock.messages()),
            Self::Actual(_) => None,
        }
    }
}
