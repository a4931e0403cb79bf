//! Library entry point for the stateful-list crate.
//! The loading lifecycle of a paginated list, independent of any UI toolkit,
//! plus the actors and the terminal demo host built around it.

pub mod config;
pub mod controller;
pub mod delegate;
pub mod demo;
pub mod error;
pub mod list;
pub mod log;
pub mod phase;
pub mod presenter;
pub mod trigger;
pub mod utils;
pub mod view;

pub use controller::{Controller, Settings, Snapshot};
pub use delegate::{Completion, Delegate, LoadError, LoadHandler, LoadMoreHandler};
pub use error::Error;
pub use list::StatefulList;
pub use phase::{LoadPhase, ViewMode};
pub use presenter::ViewPresenter;
pub use trigger::{LoadMoreTrigger, ScrollGeometry};
pub use utils::*;
pub use view::{Retry, View};

/// Channel capacity of the actors.
pub const BUFFER_SIZE: usize = 128;
