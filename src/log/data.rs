use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// A single log entry: level, the scope it came from, and the text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct LogMessage {
    pub level: LogLevel,
    pub scope: &'static str,
    pub message: String,
}

impl Display for LogMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
        write!(
            f,
            "[{}] [{}] [{}] {}",
            timestamp, self.level, self.scope, self.message
        )
    }
}

/// Severity of a log message.
///
/// # Ordering
/// The levels are ordered by severity: `Info` < `Warning` < `Error`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum LogLevel {
    /// Regular operational information, such as phase transitions.
    #[default]
    Info,
    /// Something went wrong but the list keeps working, such as a failed load
    /// or a dropped stale completion.
    Warning,
    /// Something that needs attention, such as a collaborator that went away.
    Error,
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warning => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

impl FromStr for LogLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            _ => Err(anyhow::anyhow!("Invalid log level: {}", s)),
        }
    }
}
