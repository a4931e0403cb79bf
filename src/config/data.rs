use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{
    ArcPath,
    error::Error,
    log::LogLevel,
    trigger::{DEFAULT_THRESHOLD, validate_threshold},
};

/// Options for path-based configuration values.
#[derive(Debug, Clone, Copy)]
pub enum PathOpt {
    /// Directory where log files are stored
    LogDir,
}

/// Options for numeric configuration values.
#[derive(Debug, Clone, Copy)]
pub enum USizeOpt {
    /// Maximum age of log files in days before they are deleted
    MaxAge,
}

/// Options for the list's switches.
#[derive(Debug, Clone, Copy)]
pub enum BoolOpt {
    /// Whether pull-to-refresh is offered
    CanPullToRefresh,
    /// Whether pagination is attempted when scrolling near the end
    CanLoadMore,
}

/// All configurable values, as stored in the TOML file.
///
/// Missing keys fall back to [`Data::default`], so partial files load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Data {
    /// Directory where log files are stored
    log_dir: PathBuf,
    /// Minimum level printed to stderr when the logger is flushed
    log_level: LogLevel,
    /// Maximum age of log files in days before they are deleted
    max_age: usize,
    /// Whether pull-to-refresh is offered
    can_pull_to_refresh: bool,
    /// Whether pagination is attempted when scrolling near the end
    can_load_more: bool,
    /// Distance from the end of the content under which pagination starts
    load_more_threshold: f64,
}

impl Default for Data {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("/tmp/stateful-list/logs"),
            log_level: LogLevel::Warning,
            max_age: 0,
            can_pull_to_refresh: true,
            can_load_more: true,
            load_more_threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl Data {
    pub fn path(&self, opt: PathOpt) -> ArcPath {
        match opt {
            PathOpt::LogDir => ArcPath::from(self.log_dir.as_path()),
        }
    }

    pub fn set_path(&mut self, opt: PathOpt, path: ArcPath) {
        match opt {
            PathOpt::LogDir => self.log_dir = path.to_path_buf(),
        }
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }

    pub fn set_log_level(&mut self, level: LogLevel) {
        self.log_level = level;
    }

    pub fn usize(&self, opt: USizeOpt) -> usize {
        match opt {
            USizeOpt::MaxAge => self.max_age,
        }
    }

    pub fn set_usize(&mut self, opt: USizeOpt, value: usize) {
        match opt {
            USizeOpt::MaxAge => self.max_age = value,
        }
    }

    pub fn bool(&self, opt: BoolOpt) -> bool {
        match opt {
            BoolOpt::CanPullToRefresh => self.can_pull_to_refresh,
            BoolOpt::CanLoadMore => self.can_load_more,
        }
    }

    pub fn set_bool(&mut self, opt: BoolOpt, value: bool) {
        match opt {
            BoolOpt::CanPullToRefresh => self.can_pull_to_refresh = value,
            BoolOpt::CanLoadMore => self.can_load_more = value,
        }
    }

    pub fn load_more_threshold(&self) -> f64 {
        self.load_more_threshold
    }

    /// Sets the load-more threshold.
    ///
    /// # Errors
    /// Rejects negative, infinite and NaN distances.
    pub fn set_load_more_threshold(&mut self, threshold: f64) -> Result<(), Error> {
        validate_threshold(threshold)?;
        self.load_more_threshold = threshold;
        Ok(())
    }
}
