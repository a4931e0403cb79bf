use tokio::sync::oneshot;

use crate::{ArcPath, error::Error, log::LogLevel};

use super::data::{BoolOpt, Data, PathOpt, USizeOpt};

/// Messages that can be sent to the configuration actor.
///
/// Operations that return a value carry a channel to send the result back to
/// the caller.
#[derive(Debug)]
pub enum Message {
    /// Load configuration from file
    Load {
        tx: oneshot::Sender<anyhow::Result<()>>,
    },
    /// Save configuration to file
    Save {
        tx: oneshot::Sender<anyhow::Result<()>>,
    },
    /// Get a snapshot of every value
    GetData { tx: oneshot::Sender<Data> },
    GetPath {
        opt: PathOpt,
        tx: oneshot::Sender<ArcPath>,
    },
    GetLogLevel { tx: oneshot::Sender<LogLevel> },
    GetUSize {
        opt: USizeOpt,
        tx: oneshot::Sender<usize>,
    },
    GetBool {
        opt: BoolOpt,
        tx: oneshot::Sender<bool>,
    },
    GetThreshold { tx: oneshot::Sender<f64> },
    SetPath { opt: PathOpt, path: ArcPath },
    SetLogLevel { level: LogLevel },
    SetUSize { opt: USizeOpt, size: usize },
    SetBool { opt: BoolOpt, value: bool },
    SetThreshold {
        threshold: f64,
        tx: oneshot::Sender<Result<(), Error>>,
    },
}
