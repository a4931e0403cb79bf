use std::sync::{Arc, Mutex};

use crate::log::{LogLevel, LogMessage};

/// In-memory stand-in for the Log actor.
///
/// Messages are recorded synchronously so tests can assert on them right
/// after the call that produced them.
#[derive(Debug, Clone, Default)]
pub struct Mock {
    messages: Arc<Mutex<Vec<LogMessage>>>,
}

impl Mock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self, scope: &'static str, message: String, level: LogLevel) {
        let mut lock = self
            .messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        lock.push(LogMessage {
            level,
            scope,
            message,
        });
    }

    /// Prints the recorded messages to stderr.
    pub fn flush(&self) {
        for message in self.messages() {
            eprintln!("{message}");
        }
    }

    /// All recorded messages, oldest first.
    pub fn messages(&self) -> Vec<LogMessage> {
        self.messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}
