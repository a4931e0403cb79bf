use crate::ArcStr;
use crate::delegate::LoadError;

/// Text shown when a load returned nothing and no error was attached.
pub const NO_RECORDS: &str = "No records found";

/// Label of the retry affordance on error views.
pub const TRY_AGAIN: &str = "Try Again";

/// Entry point the host should call when the user taps a retry affordance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Retry {
    /// Retry through `trigger_pull_to_refresh`
    Refresh,
    /// Retry through `trigger_load_more`
    LoadMore,
}

/// A host-neutral description of placeholder or footer content.
///
/// The core never draws anything; presenters translate these into whatever
/// their toolkit uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// An activity indicator
    Spinner,
    /// A centered message, optionally with a "Try Again" affordance
    Notice {
        message: ArcStr,
        retry: Option<Retry>,
    },
    /// Content supplied by a delegate, identified by a host-defined key
    Custom(ArcStr),
}

impl View {
    /// Default placeholder for the initial-loading phases.
    pub fn initial_load() -> Self {
        Self::Spinner
    }

    /// Default placeholder for the empty-or-error phase.
    pub fn empty_or_error(error: Option<&LoadError>) -> Self {
        match error {
            Some(error) => Self::Notice {
                message: ArcStr::from(error.to_string()),
                retry: Some(Retry::Refresh),
            },
            None => Self::Notice {
                message: ArcStr::from(NO_RECORDS),
                retry: None,
            },
        }
    }

    /// Default load-more footer: a spinner while paginating, an error notice
    /// with a retry when the last page failed.
    pub fn load_more_footer(error: Option<&LoadError>) -> Self {
        match error {
            Some(error) => Self::Notice {
                message: ArcStr::from(error.to_string()),
                retry: Some(Retry::LoadMore),
            },
            None => Self::Spinner,
        }
    }

    /// The retry this view offers, if any.
    pub fn retry(&self) -> Option<Retry> {
        match self {
            Self::Notice { retry, .. } => *retry,
            _ => None,
        }
    }
}
