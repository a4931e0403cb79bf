use anyhow::Context;
use tokio::{
    fs::{File, OpenOptions},
    io::AsyncWriteExt,
    task::JoinHandle,
};

use super::data::{LogLevel, LogMessage};
use super::message::Message;
use crate::ArcPath;

/// Prefix of the timestamped log files, also used to recognize them during
/// garbage collection.
pub const LOG_PREFIX: &str = "stateful-list_";

/// The core of the logging system that manages logging to both stderr and log files.
///
/// This struct provides thread-safe logging capabilities through an actor pattern.
/// It handles writing messages to both a timestamped log file and a "latest" log file,
/// while also maintaining a buffer of messages to be printed to stderr when requested.
/// Printing is deferred so a terminal host owning the screen is not disturbed.
///
/// # Examples
/// ```ignore
/// let (log, _) = LogCore::build(LogLevel::Info, 7, log_dir).await?.spawn();
/// log.info("app", "Application started");
/// ```
#[derive(Debug)]
pub struct LogCore {
    /// Directory where log files are stored
    log_dir: ArcPath,
    /// Path to the current timestamped log file
    log_path: ArcPath,
    /// Handle to the current log file
    log_file: File,
    /// Handle to the "latest" log file
    latest_log_file: File,
    /// Buffer of messages to be printed to stderr
    pub(super) logs_to_print: Vec<LogMessage>,
    /// Minimum level of messages to be printed to stderr
    print_level: LogLevel,
    /// Maximum age of log files in days before they are deleted
    max_age: usize,
    /// Number of entries that could not be written to disk
    write_failures: usize,
}

impl LogCore {
    /// Creates the log directory and both log files.
    ///
    /// # Arguments
    /// * `level` - Minimum log level for messages to be printed to stderr
    /// * `max_age` - Maximum age of log files in days before they are deleted
    /// * `log_dir` - Directory where log files will be stored
    ///
    /// # Errors
    /// Returns an error if the directory or either log file cannot be created.
    pub async fn build(level: LogLevel, max_age: usize, log_dir: ArcPath) -> anyhow::Result<Self> {
        let log_path = ArcPath::from(
            log_dir
                .join(format!(
                    "{}{}.log",
                    LOG_PREFIX,
                    chrono::Utc::now().format("%Y-%m-%d-%H-%M-%S")
                ))
                .as_path(),
        );
        let latest_log_path = log_dir.join("latest.log");

        tokio::fs::create_dir_all(&log_dir)
            .await
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

        let log_file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .await
            .with_context(|| format!("Failed to create log file: {}", log_path.display()))?;

        let latest_log_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&latest_log_path)
            .await
            .with_context(|| {
                format!(
                    "Failed to create latest log file: {}",
                    latest_log_path.display()
                )
            })?;

        Ok(Self {
            log_dir,
            log_path,
            log_file,
            latest_log_file,
            logs_to_print: Vec::new(),
            print_level: level,
            max_age,
            write_failures: 0,
        })
    }

    /// Path of the timestamped log file of this session.
    pub fn log_path(&self) -> ArcPath {
        self.log_path.clone()
    }

    /// Transforms the logger core instance into an actor.
    ///
    /// Commands are processed sequentially. A [`Message::Flush`] prints the
    /// buffered messages and stops the actor.
    pub fn spawn(mut self) -> (super::Log, JoinHandle<()>) {
        let (tx, mut rx) = tokio::sync::mpsc::channel(crate::BUFFER_SIZE);
        let handle = tokio::spawn(async move {
            while let Some(command) = rx.recv().await {
                match command {
                    Message::Log(msg) => {
                        self.log(msg).await;
                    }
                    Message::Flush => {
                        self.flush();
                        rx.close();
                        break;
                    }
                    Message::CollectGarbage => {
                        self.collect_garbage().await;
                    }
                }
            }
        });
        (super::Log::Actual(tx), handle)
    }

    /// Writes a message to both log files and buffers it for stderr when its
    /// level reaches the print level.
    pub(super) async fn log(&mut self, message: LogMessage) {
        let line = format!("{}\n", &message);

        for file in [&mut self.log_file, &mut self.latest_log_file] {
            let res = match file.write_all(line.as_bytes()).await {
                Ok(()) => file.flush().await,
                Err(e) => Err(e),
            };
            if res.is_err() {
                self.write_failures += 1;
            }
        }

        if message.level >= self.print_level {
            self.logs_to_print.push(message);
        }
    }

    /// Prints the buffered messages to stderr and destroys the logger.
    fn flush(self) {
        for message in &self.logs_to_print {
            eprintln!("{}", message);
        }

        if self.write_failures > 0 {
            eprintln!("{} log entries could not be written to disk", self.write_failures);
        }

        if !self.logs_to_print.is_empty() {
            eprintln!("Check the full log file: {}", self.log_path.display());
        }
    }

    /// Deletes this program's log files older than `max_age` days. A
    /// `max_age` of 0 keeps everything.
    pub(super) async fn collect_garbage(&mut self) {
        if self.max_age == 0 {
            return;
        }

        let now = std::time::SystemTime::now();

        let Ok(mut entries) = tokio::fs::read_dir(&self.log_dir).await else {
            self.log(LogMessage {
                level: LogLevel::Error,
                scope: "log",
                message: "Failed to read the logs directory during garbage collection".into(),
            })
            .await;
            return;
        };

        while let Ok(Some(entry)) = entries.next_entry().await {
            let filename = entry.file_name();
            let filename = filename.to_string_lossy();
            if !filename.ends_with(".log") || !filename.starts_with(LOG_PREFIX) {
                continue;
            }

            let path = entry.path();
            if path.as_path() == &*self.log_path {
                continue;
            }

            let Ok(meta) = entry.metadata().await else {
                continue;
            };
            let Ok(stamp) = meta.created().or_else(|_| meta.modified()) else {
                continue;
            };
            let Ok(age) = now.duration_since(stamp) else {
                continue;
            };
            let age = age.as_secs() / 60 / 60 / 24;

            if age as usize > self.max_age && tokio::fs::remove_file(&path).await.is_err() {
                self.log(LogMessage {
                    level: LogLevel::Warning,
                    scope: "log",
                    message: format!("Failed to remove the log file: {}", path.display()),
                })
                .await;
            }
        }
    }
}
