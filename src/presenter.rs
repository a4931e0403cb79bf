mod mock;

use crate::ArcStr;
use crate::phase::ViewMode;
use crate::view::View;

pub use mock::{Call, MockPresenter};

/// The host side of a stateful list: whatever actually shows the list, the
/// placeholder and the footer.
///
/// Calls come from the list owner, in the order the state machine needs them.
pub trait ViewPresenter: Send {
    /// Show either the list or the placeholder. Only called on change.
    fn set_mode(&mut self, mode: ViewMode);

    fn set_placeholder_content(&mut self, view: View);

    /// `None` clears the footer.
    fn set_footer_content(&mut self, view: Option<View>);

    fn start_refresh_affordance(&mut self);

    fn stop_refresh_affordance(&mut self);

    /// Installs or removes the pull-to-refresh affordance.
    fn set_refresh_enabled(&mut self, _enabled: bool) {}

    /// Pass-through for cell template registration; opaque to the core.
    fn register_cell_template(&mut self, _identifier: ArcStr) {}
}
