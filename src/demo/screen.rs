use std::sync::{Arc, Mutex, MutexGuard};

use crate::ArcStr;
use crate::phase::ViewMode;
use crate::presenter::ViewPresenter;
use crate::trigger::ScrollGeometry;
use crate::view::{Retry, View};

/// What the terminal should show, as last told by the list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Screen {
    pub mode: ViewMode,
    pub placeholder: Option<View>,
    pub footer: Option<View>,
    pub refreshing: bool,
    pub refresh_enabled: bool,
    pub cell_templates: Vec<ArcStr>,
}

impl Screen {
    /// The retry offered by whatever notice is visible right now.
    pub fn visible_retry(&self) -> Option<Retry> {
        match self.mode {
            ViewMode::Placeholder => self.placeholder.as_ref().and_then(View::retry),
            ViewMode::List => self.footer.as_ref().and_then(View::retry),
        }
    }

    /// Scroll geometry in rows: one row per item plus one for the footer.
    pub fn geometry(&self, items: usize, viewport: usize, scroll: usize) -> ScrollGeometry {
        let content = items + usize::from(self.footer.is_some());
        ScrollGeometry::new(scroll as f64, content as f64, viewport as f64)
    }
}

/// [`ViewPresenter`] that writes into a [`Screen`] the draw loop reads.
#[derive(Debug, Clone, Default)]
pub struct TerminalPresenter {
    screen: Arc<Mutex<Screen>>,
}

impl TerminalPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Screen> {
        self.screen
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn screen(&self) -> Screen {
        self.lock().clone()
    }
}

impl ViewPresenter for TerminalPresenter {
    fn set_mode(&mut self, mode: ViewMode) {
        self.lock().mode = mode;
    }

    fn set_placeholder_content(&mut self, view: View) {
        self.lock().placeholder = Some(view);
    }

    fn set_footer_content(&mut self, view: Option<View>) {
        self.lock().footer = view;
    }

    fn start_refresh_affordance(&mut self) {
        self.lock().refreshing = true;
    }

    fn stop_refresh_affordance(&mut self) {
        self.lock().refreshing = false;
    }

    fn set_refresh_enabled(&mut self, enabled: bool) {
        self.lock().refresh_enabled = enabled;
    }

    fn register_cell_template(&mut self, identifier: ArcStr) {
        self.lock().cell_templates.push(identifier);
    }
}
