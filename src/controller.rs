#[cfg(test)]
mod tests;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::ArcStr;
use crate::delegate::{Completion, Delegate, LoadError, LoadHandler, LoadKind, LoadMoreHandler};
use crate::error::Error;
use crate::log::Log;
use crate::phase::{LoadPhase, ViewMode};
use crate::presenter::ViewPresenter;
use crate::trigger::{DEFAULT_THRESHOLD, LoadMoreTrigger, ScrollGeometry, validate_threshold};
use crate::view::View;

const SCOPE: &str = "list";

/// Host-facing switches of a stateful list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    /// Whether pull-to-refresh is offered
    pub can_pull_to_refresh: bool,
    /// Whether pagination is attempted. Overwritten by every load-more
    /// completion.
    pub can_load_more: bool,
    /// Distance from the end of the content under which pagination starts
    pub load_more_threshold: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            can_pull_to_refresh: false,
            can_load_more: false,
            load_more_threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// Everything observable about a controller at one point in time.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub phase: LoadPhase,
    pub view_mode: ViewMode,
    pub can_pull_to_refresh: bool,
    pub can_load_more: bool,
    pub load_more_threshold: f64,
    pub watching_for_load_more: bool,
    pub load_more_view_is_error_view: bool,
    pub last_load_more_error: Option<LoadError>,
}

/// The loading state machine of a stateful list.
///
/// All triggers are guarded: while a load is outstanding every new trigger is
/// rejected, so at most one load exists at any time. Completions are accepted
/// only while the phase is still the one their trigger entered, which makes
/// late or duplicate completions harmless.
///
/// The phase is changed in exactly one place, [`Controller::set_phase`].
///
/// The controller is plain data and is meant to be owned by a single task;
/// see [`StatefulList`](crate::list::StatefulList) for the actor that does so.
#[derive(Debug)]
pub struct Controller<D, P> {
    phase: LoadPhase,
    view_mode: ViewMode,
    can_pull_to_refresh: bool,
    can_load_more: bool,
    trigger: LoadMoreTrigger,
    watching_for_load_more: bool,
    load_more_view_is_error_view: bool,
    last_load_more_error: Option<LoadError>,
    delegate: D,
    presenter: P,
    completions: UnboundedSender<Completion>,
    log: Log,
}

impl<D: Delegate, P: ViewPresenter> Controller<D, P> {
    /// Creates a controller resting in [`LoadPhase::Idle`] with the list
    /// visible.
    ///
    /// The returned receiver yields the completions delegates report through
    /// their handlers; the owner feeds them back with
    /// [`Controller::complete`].
    ///
    /// # Errors
    /// [`Error::InvalidThreshold`] if the threshold is negative or not finite.
    pub fn new(
        delegate: D,
        mut presenter: P,
        settings: Settings,
        log: Log,
    ) -> Result<(Self, UnboundedReceiver<Completion>), Error> {
        let threshold = validate_threshold(settings.load_more_threshold)?;
        let (completions, rx) = mpsc::unbounded_channel();

        presenter.set_refresh_enabled(settings.can_pull_to_refresh);

        let controller = Self {
            phase: LoadPhase::Idle,
            view_mode: ViewMode::List,
            can_pull_to_refresh: settings.can_pull_to_refresh,
            can_load_more: settings.can_load_more,
            trigger: LoadMoreTrigger::new(threshold),
            watching_for_load_more: false,
            load_more_view_is_error_view: false,
            last_load_more_error: None,
            delegate,
            presenter,
            completions,
            log,
        };
        Ok((controller, rx))
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn can_pull_to_refresh(&self) -> bool {
        self.can_pull_to_refresh
    }

    pub fn can_load_more(&self) -> bool {
        self.can_load_more
    }

    pub fn load_more_threshold(&self) -> f64 {
        self.trigger.threshold()
    }

    pub fn is_watching_for_load_more(&self) -> bool {
        self.watching_for_load_more
    }

    pub fn load_more_view_is_error_view(&self) -> bool {
        self.load_more_view_is_error_view
    }

    pub fn last_load_more_error(&self) -> Option<&LoadError> {
        self.last_load_more_error.as_ref()
    }

    pub fn delegate(&self) -> &D {
        &self.delegate
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            view_mode: self.view_mode,
            can_pull_to_refresh: self.can_pull_to_refresh,
            can_load_more: self.can_load_more,
            load_more_threshold: self.trigger.threshold(),
            watching_for_load_more: self.watching_for_load_more,
            load_more_view_is_error_view: self.load_more_view_is_error_view,
            last_load_more_error: self.last_load_more_error.clone(),
        }
    }

    /// Turns pull-to-refresh on or off and tells the presenter to install or
    /// remove the affordance.
    pub fn set_can_pull_to_refresh(&mut self, enabled: bool) {
        if self.can_pull_to_refresh == enabled {
            return;
        }
        self.can_pull_to_refresh = enabled;
        self.presenter.set_refresh_enabled(enabled);
    }

    /// Turns pagination on or off.
    ///
    /// Disabling stops watching right away. Enabling while resting in
    /// [`LoadPhase::Idle`] starts watching right away; in any other phase the
    /// next transition into `Idle` picks the new value up.
    pub fn set_can_load_more(&mut self, enabled: bool) {
        self.can_load_more = enabled;
        if !enabled && self.watching_for_load_more {
            self.watch_for_load_more(false);
        } else if enabled && self.phase == LoadPhase::Idle && !self.watching_for_load_more {
            self.watch_for_load_more(true);
        }
    }

    /// # Errors
    /// [`Error::InvalidThreshold`] if the threshold is negative or not finite.
    pub fn set_load_more_threshold(&mut self, threshold: f64) -> Result<(), Error> {
        self.trigger.set_threshold(validate_threshold(threshold)?);
        Ok(())
    }

    /// Forwards a cell template registration to the presenter.
    pub fn register_cell_template(&mut self, identifier: ArcStr) {
        self.presenter.register_cell_template(identifier);
    }

    /// Starts the first load.
    ///
    /// # Arguments
    /// * `show_list_underneath` - Keep the list visible instead of covering it
    ///   with the initial-load placeholder
    ///
    /// # Returns
    /// `false`, with no side effect, if a load is already outstanding.
    pub fn trigger_initial_load(&mut self, show_list_underneath: bool) -> bool {
        if self.phase.is_loading() {
            self.log.info(
                SCOPE,
                format!("Initial load rejected while {}", self.phase),
            );
            return false;
        }

        let next = if show_list_underneath {
            LoadPhase::InitialLoadingTableView
        } else {
            LoadPhase::InitialLoading
        };
        self.set_phase(next, true, None);

        let handler = LoadHandler::new(LoadKind::Initial, self.completions.clone());
        self.delegate.begin_initial_load(handler);
        true
    }

    /// Starts a pull-to-refresh.
    ///
    /// The view mode is left alone so whatever is visible stays visible under
    /// the refresh affordance.
    ///
    /// # Returns
    /// `false` if a load is outstanding or pull-to-refresh is disabled.
    pub fn trigger_pull_to_refresh(&mut self) -> bool {
        if self.phase.is_loading() || !self.can_pull_to_refresh {
            self.log.info(
                SCOPE,
                format!(
                    "Refresh rejected while {} (pull-to-refresh {})",
                    self.phase,
                    if self.can_pull_to_refresh { "enabled" } else { "disabled" }
                ),
            );
            return false;
        }

        self.set_phase(LoadPhase::LoadingFromPullToRefresh, false, None);

        let handler = LoadHandler::new(LoadKind::Refresh, self.completions.clone());
        self.delegate.begin_refresh(handler);
        self.presenter.start_refresh_affordance();
        true
    }

    /// Starts loading the next page. Silently ignored while a load is
    /// outstanding.
    pub fn trigger_load_more(&mut self) {
        if self.phase.is_loading() {
            self.log.info(
                SCOPE,
                format!("Load more ignored while {}", self.phase),
            );
            return;
        }

        self.load_more_view_is_error_view = false;
        self.last_load_more_error = None;
        self.set_phase(LoadPhase::LoadingMore, true, None);
        self.update_load_more_footer();

        let handler = LoadMoreHandler::new(self.completions.clone());
        self.delegate.begin_load_more(handler);
    }

    /// Reports a new scroll position and starts pagination when the trigger
    /// fires. Positions reported while a load is outstanding are ignored and
    /// leave the trigger armed.
    ///
    /// # Returns
    /// Whether load-more was started by this position.
    pub fn scroll_position_changed(&mut self, geometry: ScrollGeometry) -> bool {
        if self.phase.is_loading() {
            return false;
        }
        let fired = self.trigger.evaluate(
            &geometry,
            self.watching_for_load_more,
            self.load_more_view_is_error_view,
        );
        if fired {
            self.trigger_load_more();
        }
        fired
    }

    /// Applies a completion produced by a handler.
    pub fn complete(&mut self, completion: Completion) {
        match completion {
            Completion::InitialLoad { is_empty, error } => {
                self.complete_initial_load(is_empty, error)
            }
            Completion::Refresh { is_empty, error } => self.complete_refresh(is_empty, error),
            Completion::LoadMore {
                can_load_more,
                error,
                show_error_view,
            } => self.complete_load_more(can_load_more, error, show_error_view),
        }
    }

    /// Finishes the initial load. Ignored unless an initial load is the
    /// outstanding load.
    pub fn complete_initial_load(&mut self, is_empty: bool, error: Option<LoadError>) {
        if !self.phase.is_initial_loading() {
            self.drop_stale("initial load");
            return;
        }
        self.finish_load("Initial load", is_empty, error);
    }

    /// Finishes a pull-to-refresh. Ignored unless a refresh is outstanding.
    pub fn complete_refresh(&mut self, is_empty: bool, error: Option<LoadError>) {
        if self.phase != LoadPhase::LoadingFromPullToRefresh {
            self.drop_stale("refresh");
            return;
        }
        self.presenter.stop_refresh_affordance();
        self.finish_load("Refresh", is_empty, error);
    }

    /// Finishes a load-more. Ignored unless a load-more is outstanding.
    ///
    /// # Arguments
    /// * `can_load_more` - Whether further pages exist; replaces the setting
    /// * `error` - The failure, if the page failed to load
    /// * `show_error_view` - Whether the failure is shown in the footer; when
    ///   it is not, pagination simply stops or resumes per `can_load_more`
    pub fn complete_load_more(
        &mut self,
        can_load_more: bool,
        error: Option<LoadError>,
        show_error_view: bool,
    ) {
        if self.phase != LoadPhase::LoadingMore {
            self.drop_stale("load more");
            return;
        }

        if let Some(error) = &error {
            self.log.warn(SCOPE, format!("Load more failed: {error}"));
        }

        self.can_load_more = can_load_more;
        self.load_more_view_is_error_view = error.is_some() && show_error_view;
        self.last_load_more_error = error;
        if self.last_load_more_error.is_some() {
            self.update_load_more_footer();
        }
        self.set_phase(LoadPhase::Idle, true, None);
    }

    fn finish_load(&mut self, what: &str, is_empty: bool, error: Option<LoadError>) {
        if let Some(error) = &error {
            self.log.warn(SCOPE, format!("{what} failed: {error}"));
        }
        if is_empty {
            self.set_phase(LoadPhase::EmptyOrInitialLoadError, true, error);
        } else {
            self.set_phase(LoadPhase::Idle, true, None);
        }
    }

    fn drop_stale(&self, what: &str) {
        self.log.warn(
            SCOPE,
            format!("Dropped stale {what} completion while {}", self.phase),
        );
    }

    /// The single mutation point of the phase. Steps run in a fixed order:
    /// assign, install the phase's placeholder, recompute load-more watching,
    /// then bring the view mode up to date if asked to.
    fn set_phase(&mut self, next: LoadPhase, force_view_update: bool, error: Option<LoadError>) {
        let previous = std::mem::replace(&mut self.phase, next);
        self.log.info(SCOPE, format!("Phase {previous} -> {next}"));

        match next {
            LoadPhase::InitialLoading | LoadPhase::InitialLoadingTableView => {
                let view = self
                    .delegate
                    .view_for_initial_load()
                    .unwrap_or_else(View::initial_load);
                self.presenter.set_placeholder_content(view);
            }
            LoadPhase::EmptyOrInitialLoadError => {
                let view = self
                    .delegate
                    .view_for_empty_or_error(error.as_ref())
                    .unwrap_or_else(|| View::empty_or_error(error.as_ref()));
                self.presenter.set_placeholder_content(view);
            }
            _ => {}
        }

        match next {
            LoadPhase::Idle => self.watch_for_load_more(true),
            LoadPhase::EmptyOrInitialLoadError => self.watch_for_load_more(false),
            _ => {}
        }

        if force_view_update {
            self.apply_view_mode(ViewMode::for_phase(next));
        }
    }

    /// Recomputes whether scrolling may start pagination. A request to watch
    /// is downgraded when pagination is disabled.
    fn watch_for_load_more(&mut self, requested: bool) {
        self.watching_for_load_more = requested && self.can_load_more;
        self.trigger.rearm();
        self.update_load_more_footer();
    }

    /// Puts the footer in line with the load-more state: a spinner while
    /// watching or loading the next page, the error view while one is
    /// showing, nothing otherwise.
    fn update_load_more_footer(&mut self) {
        let footer = if self.watching_for_load_more
            || self.load_more_view_is_error_view
            || self.phase == LoadPhase::LoadingMore
        {
            let error = self
                .last_load_more_error
                .as_ref()
                .filter(|_| self.load_more_view_is_error_view);
            Some(
                self.delegate
                    .view_for_load_more_footer(error)
                    .unwrap_or_else(|| View::load_more_footer(error)),
            )
        } else {
            None
        };
        self.presenter.set_footer_content(footer);
    }

    fn apply_view_mode(&mut self, mode: ViewMode) {
        if self.view_mode == mode {
            return;
        }
        self.view_mode = mode;
        self.presenter.set_mode(mode);
    }
}
