use std::sync::{Arc, Mutex, MutexGuard};

use super::ViewPresenter;
use crate::ArcStr;
use crate::phase::ViewMode;
use crate::view::View;

/// One call received by a [`MockPresenter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    SetMode(ViewMode),
    SetPlaceholder(View),
    SetFooter(Option<View>),
    StartRefresh,
    StopRefresh,
    RefreshEnabled(bool),
    RegisterCell(ArcStr),
}

/// Presenter that records every call in order.
#[derive(Debug, Clone, Default)]
pub struct MockPresenter {
    calls: Arc<Mutex<Vec<Call>>>,
}

impl MockPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Call>> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn push(&self, call: Call) {
        self.lock().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.lock().clone()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// The last mode that was set, if any.
    pub fn mode(&self) -> Option<ViewMode> {
        self.lock().iter().rev().find_map(|call| match call {
            Call::SetMode(mode) => Some(*mode),
            _ => None,
        })
    }

    /// The last placeholder that was installed, if any.
    pub fn placeholder(&self) -> Option<View> {
        self.lock().iter().rev().find_map(|call| match call {
            Call::SetPlaceholder(view) => Some(view.clone()),
            _ => None,
        })
    }

    /// The footer as it currently stands; `None` when never set or cleared.
    pub fn footer(&self) -> Option<View> {
        self.lock()
            .iter()
            .rev()
            .find_map(|call| match call {
                Call::SetFooter(view) => Some(view.clone()),
                _ => None,
            })
            .flatten()
    }

    /// Whether the refresh affordance is running.
    pub fn is_refreshing(&self) -> bool {
        self.lock()
            .iter()
            .rev()
            .find_map(|call| match call {
                Call::StartRefresh => Some(true),
                Call::StopRefresh => Some(false),
                _ => None,
            })
            .unwrap_or(false)
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.lock().iter().filter(|call| predicate(call)).count()
    }
}

impl ViewPresenter for MockPresenter {
    fn set_mode(&mut self, mode: ViewMode) {
        self.push(Call::SetMode(mode));
    }

    fn set_placeholder_content(&mut self, view: View) {
        self.push(Call::SetPlaceholder(view));
    }

    fn set_footer_content(&mut self, view: Option<View>) {
        self.push(Call::SetFooter(view));
    }

    fn start_refresh_affordance(&mut self) {
        self.push(Call::StartRefresh);
    }

    fn stop_refresh_affordance(&mut self) {
        self.push(Call::StopRefresh);
    }

    fn set_refresh_enabled(&mut self, enabled: bool) {
        self.push(Call::RefreshEnabled(enabled));
    }

    fn register_cell_template(&mut self, identifier: ArcStr) {
        self.push(Call::RegisterCell(identifier));
    }
}
