use tokio::sync::oneshot;

use crate::ArcStr;
use crate::controller::Snapshot;
use crate::error::Error;
use crate::trigger::ScrollGeometry;

/// Messages for the StatefulList actor.
#[derive(Debug)]
pub enum Message {
    /// Start the first load
    TriggerInitialLoad {
        show_list_underneath: bool,
        tx: oneshot::Sender<bool>,
    },
    /// Start a pull-to-refresh
    TriggerPullToRefresh { tx: oneshot::Sender<bool> },
    /// Start loading the next page
    TriggerLoadMore,
    /// Report the scroll position; answers whether load-more fired
    ScrollPositionChanged {
        geometry: ScrollGeometry,
        tx: oneshot::Sender<bool>,
    },
    SetCanPullToRefresh(bool),
    SetCanLoadMore(bool),
    SetLoadMoreThreshold {
        threshold: f64,
        tx: oneshot::Sender<Result<(), Error>>,
    },
    RegisterCellTemplate(ArcStr),
    /// Get the current state of the controller
    Snapshot { tx: oneshot::Sender<Snapshot> },
}
