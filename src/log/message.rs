use super::data::LogMessage;

/// Messages that can be sent to a [`LogCore`](super::LogCore) actor.
#[derive(Debug)]
pub enum Message {
    /// Logs a message with the specified level and content
    Log(LogMessage),
    /// Prints the buffered messages to stderr and stops the actor
    Flush,
    /// Runs the log garbage collector to delete old log files
    CollectGarbage,
}
