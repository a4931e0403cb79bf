use std::sync::Arc;
use tokio::sync::Mutex;

use crate::{ArcPath, error::Error, log::LogLevel};

use super::data::{BoolOpt, Data, PathOpt, USizeOpt};

/// Mock implementation of the Config actor for testing purposes.
///
/// Values live in memory; `load` and `save` succeed without touching disk.
#[derive(Debug, Clone)]
pub struct Mock {
    data: Arc<Mutex<Data>>,
}

impl Mock {
    pub fn new(data: Data) -> Self {
        Self {
            data: Arc::new(Mutex::new(data)),
        }
    }

    pub async fn data(&self) -> Data {
        self.data.lock().await.clone()
    }

    pub async fn path(&self, opt: PathOpt) -> ArcPath {
        self.data.lock().await.path(opt)
    }

    pub async fn set_path(&self, opt: PathOpt, path: ArcPath) {
        self.data.lock().await.set_path(opt, path);
    }

    pub async fn log_level(&self) -> LogLevel {
        self.data.lock().await.log_level()
    }

    pub async fn set_log_level(&self, level: LogLevel) {
        self.data.lock().await.set_log_level(level);
    }

    pub async fn usize(&self, opt: USizeOpt) -> usize {
        self.data.lock().await.usize(opt)
    }

    pub async fn set_usize(&self, opt: USizeOpt, value: usize) {
        self.data.lock().await.set_usize(opt, value);
    }

    pub async fn bool(&self, opt: BoolOpt) -> bool {
        self.data.lock().await.bool(opt)
    }

    pub async fn set_bool(&self, opt: BoolOpt, value: bool) {
        self.data.lock().await.set_bool(opt, value);
    }

    pub async fn load_more_threshold(&self) -> f64 {
        self.data.lock().await.load_more_threshold()
    }

    pub async fn set_load_more_threshold(&self, threshold: f64) -> Result<(), Error> {
        self.data.lock().await.set_load_more_threshold(threshold)
    }
}
