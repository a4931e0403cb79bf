use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// The loading phase of a stateful list.
///
/// Exactly one phase is active at a time. The phase is created as
/// [`LoadPhase::Idle`] and only ever changed by the controller's transition
/// function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LoadPhase {
    /// Resting. The list is visible and pull-to-refresh / load-more are armed
    /// according to the settings.
    #[default]
    Idle,
    /// First load in progress with the placeholder covering the list.
    InitialLoading,
    /// First load in progress while the list stays visible underneath.
    InitialLoadingTableView,
    /// The last initial load or refresh returned nothing or failed. Whether an
    /// error is attached is what tells "empty" and "error" apart.
    EmptyOrInitialLoadError,
    /// Pull-to-refresh in progress.
    LoadingFromPullToRefresh,
    /// Pagination in progress.
    LoadingMore,
}

impl LoadPhase {
    /// Whether a load of any kind is outstanding.
    pub fn is_loading(&self) -> bool {
        matches!(
            self,
            Self::InitialLoading
                | Self::InitialLoadingTableView
                | Self::LoadingFromPullToRefresh
                | Self::LoadingMore
        )
    }

    /// Whether the outstanding load is the first one.
    pub fn is_initial_loading(&self) -> bool {
        matches!(self, Self::InitialLoading | Self::InitialLoadingTableView)
    }
}

impl Display for LoadPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::InitialLoading => write!(f, "initial-loading"),
            Self::InitialLoadingTableView => write!(f, "initial-loading (list visible)"),
            Self::EmptyOrInitialLoadError => write!(f, "empty-or-error"),
            Self::LoadingFromPullToRefresh => write!(f, "refreshing"),
            Self::LoadingMore => write!(f, "loading-more"),
        }
    }
}

/// Which of the two contents is visible and interactive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ViewMode {
    /// The list itself.
    #[default]
    List,
    /// The placeholder (initial-load spinner, empty or error view).
    Placeholder,
}

impl ViewMode {
    /// The mode a phase calls for when the view is brought up to date.
    pub fn for_phase(phase: LoadPhase) -> Self {
        match phase {
            LoadPhase::InitialLoading | LoadPhase::EmptyOrInitialLoadError => Self::Placeholder,
            _ => Self::List,
        }
    }
}
