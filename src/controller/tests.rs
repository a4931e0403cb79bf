use super::*;
use crate::delegate::MockDelegate;
use crate::log::LogLevel;
use crate::presenter::{Call, MockPresenter};
use crate::view::{NO_RECORDS, Retry};

const NEAR_BOTTOM: ScrollGeometry = ScrollGeometry {
    offset_y: 390.0,
    content_height: 1000.0,
    viewport_height: 600.0,
};

const FAR_FROM_BOTTOM: ScrollGeometry = ScrollGeometry {
    offset_y: 0.0,
    content_height: 1000.0,
    viewport_height: 600.0,
};

struct Harness {
    controller: Controller<MockDelegate, MockPresenter>,
    rx: UnboundedReceiver<Completion>,
    delegate: MockDelegate,
    presenter: MockPresenter,
    log: Log,
}

impl Harness {
    fn new(settings: Settings) -> Self {
        Self::with_delegate(MockDelegate::new(), settings)
    }

    fn with_delegate(delegate: MockDelegate, settings: Settings) -> Self {
        let presenter = MockPresenter::new();
        let log = Log::mock();
        let (controller, rx) =
            Controller::new(delegate.clone(), presenter.clone(), settings, log.clone()).unwrap();
        Self {
            controller,
            rx,
            delegate,
            presenter,
            log,
        }
    }

    /// Everything enabled, like a freshly configured host.
    fn enabled() -> Self {
        Self::new(Settings {
            can_pull_to_refresh: true,
            can_load_more: true,
            load_more_threshold: 64.0,
        })
    }

    /// Feeds queued completions back into the controller.
    fn drain(&mut self) {
        while let Ok(completion) = self.rx.try_recv() {
            self.controller.complete(completion);
        }
    }

    fn finish_initial(&mut self, is_empty: bool, error: Option<LoadError>) {
        self.delegate
            .take_initial_load()
            .expect("no initial load pending")
            .finish(is_empty, error);
        self.drain();
    }

    fn finish_refresh(&mut self, is_empty: bool, error: Option<LoadError>) {
        self.delegate
            .take_refresh()
            .expect("no refresh pending")
            .finish(is_empty, error);
        self.drain();
    }

    fn finish_load_more(&mut self, can_load_more: bool, error: Option<LoadError>, show: bool) {
        self.delegate
            .take_load_more()
            .expect("no load more pending")
            .finish(can_load_more, error, show);
        self.drain();
    }

    /// Initial load that came back with items.
    fn loaded() -> Self {
        let mut harness = Self::enabled();
        assert!(harness.controller.trigger_initial_load(false));
        harness.finish_initial(false, None);
        harness
    }

    fn set_mode_calls(&self) -> usize {
        self.presenter.count(|call| matches!(call, Call::SetMode(_)))
    }

    fn warnings(&self) -> Vec<String> {
        self.log
            .messages()
            .unwrap()
            .into_iter()
            .filter(|m| m.level == LogLevel::Warning)
            .map(|m| m.message)
            .collect()
    }
}

#[test]
fn test_new_controller_rests_idle() {
    let harness = Harness::enabled();
    let snapshot = harness.controller.snapshot();

    assert_eq!(snapshot.phase, LoadPhase::Idle);
    assert_eq!(snapshot.view_mode, ViewMode::List);
    assert!(!snapshot.watching_for_load_more);
    assert!(!snapshot.load_more_view_is_error_view);
    assert!(snapshot.last_load_more_error.is_none());
    assert_eq!(harness.presenter.calls(), vec![Call::RefreshEnabled(true)]);
}

#[test]
fn test_default_settings() {
    let settings = Settings::default();
    assert!(!settings.can_pull_to_refresh);
    assert!(!settings.can_load_more);
    assert_eq!(settings.load_more_threshold, DEFAULT_THRESHOLD);
}

#[test]
fn test_initial_load_with_items() {
    let mut harness = Harness::enabled();

    assert!(harness.controller.trigger_initial_load(false));
    assert_eq!(harness.controller.phase(), LoadPhase::InitialLoading);
    assert_eq!(harness.controller.view_mode(), ViewMode::Placeholder);
    assert_eq!(harness.presenter.placeholder(), Some(View::Spinner));
    assert_eq!(harness.presenter.mode(), Some(ViewMode::Placeholder));
    assert_eq!(harness.delegate.initial_load_count(), 1);

    harness.finish_initial(false, None);

    assert_eq!(harness.controller.phase(), LoadPhase::Idle);
    assert_eq!(harness.controller.view_mode(), ViewMode::List);
    assert_eq!(harness.presenter.mode(), Some(ViewMode::List));
    assert!(harness.controller.is_watching_for_load_more());
    assert_eq!(harness.presenter.footer(), Some(View::Spinner));
}

#[test]
fn test_initial_load_with_list_visible_never_shows_placeholder() {
    let mut harness = Harness::enabled();

    assert!(harness.controller.trigger_initial_load(true));
    assert_eq!(harness.controller.phase(), LoadPhase::InitialLoadingTableView);
    assert_eq!(harness.controller.view_mode(), ViewMode::List);

    harness.finish_initial(false, None);
    assert_eq!(harness.controller.phase(), LoadPhase::Idle);
    assert_eq!(harness.set_mode_calls(), 0);
}

#[test]
fn test_initial_load_empty() {
    let mut harness = Harness::enabled();
    harness.controller.trigger_initial_load(false);
    harness.finish_initial(true, None);

    assert_eq!(harness.controller.phase(), LoadPhase::EmptyOrInitialLoadError);
    assert_eq!(harness.controller.view_mode(), ViewMode::Placeholder);
    assert_eq!(
        harness.presenter.placeholder(),
        Some(View::Notice {
            message: ArcStr::from(NO_RECORDS),
            retry: None
        })
    );
    assert!(!harness.controller.is_watching_for_load_more());
    assert_eq!(harness.presenter.footer(), None);
}

#[test]
fn test_initial_load_error_offers_retry() {
    let mut harness = Harness::enabled();
    harness.controller.trigger_initial_load(true);
    harness.finish_initial(true, Some(LoadError::msg("server unreachable")));

    assert_eq!(harness.controller.phase(), LoadPhase::EmptyOrInitialLoadError);
    assert_eq!(harness.controller.view_mode(), ViewMode::Placeholder);
    let placeholder = harness.presenter.placeholder().unwrap();
    assert_eq!(placeholder.retry(), Some(Retry::Refresh));
    assert!(
        matches!(&placeholder, View::Notice { message, .. } if &**message == "server unreachable")
    );
    assert!(
        harness
            .warnings()
            .iter()
            .any(|m| m.contains("server unreachable"))
    );
}

#[test]
fn test_error_with_items_goes_idle() {
    let mut harness = Harness::enabled();
    harness.controller.trigger_initial_load(false);
    harness.finish_initial(false, Some(LoadError::msg("partial")));

    assert_eq!(harness.controller.phase(), LoadPhase::Idle);
    assert_eq!(harness.controller.view_mode(), ViewMode::List);
    assert!(harness.warnings().iter().any(|m| m.contains("partial")));
}

#[test]
fn test_triggers_rejected_while_loading() {
    let mut harness = Harness::enabled();
    assert!(harness.controller.trigger_initial_load(false));
    harness.presenter.clear();

    assert!(!harness.controller.trigger_initial_load(true));
    assert!(!harness.controller.trigger_pull_to_refresh());
    harness.controller.trigger_load_more();

    assert_eq!(harness.controller.phase(), LoadPhase::InitialLoading);
    assert_eq!(harness.delegate.initial_load_count(), 1);
    assert_eq!(harness.delegate.refresh_count(), 0);
    assert_eq!(harness.delegate.load_more_count(), 0);
    assert!(harness.presenter.calls().is_empty());
}

#[test]
fn test_refresh_keeps_view_mode_and_drives_affordance() {
    let mut harness = Harness::loaded();
    let set_modes = harness.set_mode_calls();

    assert!(harness.controller.trigger_pull_to_refresh());
    assert_eq!(harness.controller.phase(), LoadPhase::LoadingFromPullToRefresh);
    assert_eq!(harness.controller.view_mode(), ViewMode::List);
    assert!(harness.presenter.is_refreshing());
    assert_eq!(harness.delegate.refresh_count(), 1);

    harness.finish_refresh(false, None);
    assert_eq!(harness.controller.phase(), LoadPhase::Idle);
    assert!(!harness.presenter.is_refreshing());
    assert_eq!(harness.set_mode_calls(), set_modes);
}

#[test]
fn test_refresh_from_empty_keeps_placeholder_until_done() {
    let mut harness = Harness::enabled();
    harness.controller.trigger_initial_load(false);
    harness.finish_initial(true, None);

    assert!(harness.controller.trigger_pull_to_refresh());
    assert_eq!(harness.controller.view_mode(), ViewMode::Placeholder);

    harness.finish_refresh(false, None);
    assert_eq!(harness.controller.phase(), LoadPhase::Idle);
    assert_eq!(harness.controller.view_mode(), ViewMode::List);
    assert!(harness.controller.is_watching_for_load_more());
}

#[test]
fn test_refresh_to_empty() {
    let mut harness = Harness::loaded();
    harness.controller.trigger_pull_to_refresh();
    harness.finish_refresh(true, None);

    assert_eq!(harness.controller.phase(), LoadPhase::EmptyOrInitialLoadError);
    assert_eq!(harness.controller.view_mode(), ViewMode::Placeholder);
    assert!(!harness.controller.is_watching_for_load_more());
    assert_eq!(harness.presenter.footer(), None);
}

#[test]
fn test_refresh_rejected_when_disabled() {
    let mut harness = Harness::new(Settings::default());
    assert!(!harness.controller.trigger_pull_to_refresh());
    assert_eq!(harness.controller.phase(), LoadPhase::Idle);
    assert_eq!(harness.delegate.refresh_count(), 0);

    harness.controller.set_can_pull_to_refresh(true);
    assert!(harness.controller.trigger_pull_to_refresh());
    assert_eq!(
        harness.presenter.count(|call| *call == Call::RefreshEnabled(true)),
        1
    );
}

#[test]
fn test_stale_completions_are_dropped() {
    let mut harness = Harness::loaded();
    let before = harness.presenter.calls().len();

    harness.controller.complete_refresh(true, None);
    harness.controller.complete_initial_load(true, None);
    harness.controller.complete_load_more(false, None, false);

    assert_eq!(harness.controller.phase(), LoadPhase::Idle);
    assert!(harness.controller.can_load_more());
    assert_eq!(harness.presenter.calls().len(), before);
    assert_eq!(
        harness
            .warnings()
            .iter()
            .filter(|m| m.starts_with("Dropped stale"))
            .count(),
        3
    );
}

#[test]
fn test_completion_of_another_kind_is_stale() {
    let mut harness = Harness::loaded();
    harness.controller.trigger_load_more();

    harness.controller.complete_initial_load(true, None);
    assert_eq!(harness.controller.phase(), LoadPhase::LoadingMore);

    harness.finish_load_more(true, None, false);
    assert_eq!(harness.controller.phase(), LoadPhase::Idle);
}

#[test]
fn test_load_more_success() {
    let mut harness = Harness::loaded();

    harness.controller.trigger_load_more();
    assert_eq!(harness.controller.phase(), LoadPhase::LoadingMore);
    assert_eq!(harness.controller.view_mode(), ViewMode::List);
    assert_eq!(harness.presenter.footer(), Some(View::Spinner));
    assert_eq!(harness.delegate.load_more_count(), 1);

    harness.finish_load_more(true, None, false);
    assert_eq!(harness.controller.phase(), LoadPhase::Idle);
    assert!(harness.controller.is_watching_for_load_more());
    assert_eq!(harness.presenter.footer(), Some(View::Spinner));
}

#[test]
fn test_load_more_exhausted() {
    let mut harness = Harness::loaded();
    harness.controller.trigger_load_more();
    harness.finish_load_more(false, None, false);

    assert_eq!(harness.controller.phase(), LoadPhase::Idle);
    assert!(!harness.controller.can_load_more());
    assert!(!harness.controller.is_watching_for_load_more());
    assert_eq!(harness.presenter.footer(), None);
    assert!(!harness.controller.scroll_position_changed(NEAR_BOTTOM));
}

#[test]
fn test_load_more_error_view_blocks_scrolling_until_retry() {
    let mut harness = Harness::loaded();
    harness.controller.trigger_load_more();
    harness.finish_load_more(true, Some(LoadError::msg("page 2 failed")), true);

    assert_eq!(harness.controller.phase(), LoadPhase::Idle);
    assert!(harness.controller.load_more_view_is_error_view());
    assert!(harness.controller.last_load_more_error().is_some());
    let footer = harness.presenter.footer().unwrap();
    assert_eq!(footer.retry(), Some(Retry::LoadMore));

    assert!(!harness.controller.scroll_position_changed(NEAR_BOTTOM));
    assert_eq!(harness.delegate.load_more_count(), 1);

    harness.controller.trigger_load_more();
    assert_eq!(harness.controller.phase(), LoadPhase::LoadingMore);
    assert!(!harness.controller.load_more_view_is_error_view());
    assert!(harness.controller.last_load_more_error().is_none());
    assert_eq!(harness.presenter.footer(), Some(View::Spinner));
}

#[test]
fn test_last_page_error_stays_visible() {
    let mut harness = Harness::loaded();
    harness.controller.trigger_load_more();
    harness.finish_load_more(false, Some(LoadError::msg("page 3 failed")), true);

    assert_eq!(harness.controller.phase(), LoadPhase::Idle);
    assert!(harness.controller.load_more_view_is_error_view());
    assert!(!harness.controller.is_watching_for_load_more());
    assert_eq!(
        harness.presenter.footer(),
        Some(View::Notice {
            message: ArcStr::from("page 3 failed"),
            retry: Some(Retry::LoadMore)
        })
    );
}

#[test]
fn test_retry_after_last_page_error_shows_spinner() {
    let mut harness = Harness::loaded();
    harness.controller.trigger_load_more();
    harness.finish_load_more(false, Some(LoadError::msg("page 3 failed")), true);
    assert!(!harness.controller.is_watching_for_load_more());

    harness.controller.trigger_load_more();
    assert_eq!(harness.controller.phase(), LoadPhase::LoadingMore);
    assert!(!harness.controller.load_more_view_is_error_view());
    assert_eq!(harness.presenter.footer(), Some(View::Spinner));

    harness.finish_load_more(false, None, false);
    assert_eq!(harness.presenter.footer(), None);
}

#[test]
fn test_silent_load_more_failure_clears_footer() {
    let mut harness = Harness::loaded();
    harness.controller.trigger_load_more();
    harness.finish_load_more(false, Some(LoadError::msg("gone")), false);

    assert_eq!(harness.controller.phase(), LoadPhase::Idle);
    assert!(!harness.controller.load_more_view_is_error_view());
    assert!(!harness.controller.is_watching_for_load_more());
    assert_eq!(harness.presenter.footer(), None);
    assert!(harness.warnings().iter().any(|m| m.contains("gone")));
}

#[test]
fn test_scroll_fires_once_per_watch() {
    let mut harness = Harness::loaded();

    assert!(!harness.controller.scroll_position_changed(FAR_FROM_BOTTOM));
    assert!(harness.controller.scroll_position_changed(NEAR_BOTTOM));
    assert!(!harness.controller.scroll_position_changed(NEAR_BOTTOM));
    assert_eq!(harness.delegate.load_more_count(), 1);

    harness.finish_load_more(true, None, false);
    assert!(harness.controller.scroll_position_changed(NEAR_BOTTOM));
    assert_eq!(harness.delegate.load_more_count(), 2);
}

#[test]
fn test_scroll_during_other_load_starts_nothing() {
    let mut harness = Harness::loaded();
    assert!(harness.controller.trigger_pull_to_refresh());

    assert!(!harness.controller.scroll_position_changed(NEAR_BOTTOM));
    assert_eq!(harness.delegate.load_more_count(), 0);
    assert_eq!(harness.controller.phase(), LoadPhase::LoadingFromPullToRefresh);

    harness.finish_refresh(false, None);
    assert!(harness.controller.scroll_position_changed(NEAR_BOTTOM));
    assert!(!harness.controller.scroll_position_changed(NEAR_BOTTOM));
    assert_eq!(harness.delegate.load_more_count(), 1);
}

#[test]
fn test_scroll_ignored_before_first_load() {
    let mut harness = Harness::enabled();
    assert!(!harness.controller.scroll_position_changed(NEAR_BOTTOM));
    assert_eq!(harness.controller.phase(), LoadPhase::Idle);
}

#[test]
fn test_set_can_load_more_toggles_watching() {
    let mut harness = Harness::loaded();

    harness.controller.set_can_load_more(false);
    assert!(!harness.controller.is_watching_for_load_more());
    assert_eq!(harness.presenter.footer(), None);
    assert!(!harness.controller.scroll_position_changed(NEAR_BOTTOM));

    harness.controller.set_can_load_more(true);
    assert!(harness.controller.is_watching_for_load_more());
    assert_eq!(harness.presenter.footer(), Some(View::Spinner));
    assert!(harness.controller.scroll_position_changed(NEAR_BOTTOM));
}

#[test]
fn test_enabling_load_more_outside_idle_waits_for_idle() {
    let mut harness = Harness::new(Settings {
        can_pull_to_refresh: true,
        can_load_more: false,
        load_more_threshold: 64.0,
    });
    harness.controller.trigger_initial_load(false);
    harness.finish_initial(true, None);

    harness.controller.set_can_load_more(true);
    assert!(!harness.controller.is_watching_for_load_more());

    harness.controller.trigger_pull_to_refresh();
    harness.finish_refresh(false, None);
    assert!(harness.controller.is_watching_for_load_more());
}

#[test]
fn test_set_mode_only_on_change() {
    let mut harness = Harness::enabled();
    harness.controller.trigger_initial_load(false);
    harness.finish_initial(true, None);
    harness.controller.trigger_pull_to_refresh();
    harness.finish_refresh(true, None);

    let set_modes: Vec<_> = harness
        .presenter
        .calls()
        .into_iter()
        .filter(|call| matches!(call, Call::SetMode(_)))
        .collect();
    assert_eq!(set_modes, vec![Call::SetMode(ViewMode::Placeholder)]);
}

#[test]
fn test_delegate_views_replace_defaults() {
    let delegate = MockDelegate::with_views(
        Some(View::Custom(ArcStr::from("skeleton"))),
        Some(View::Custom(ArcStr::from("empty-art"))),
        Some(View::Custom(ArcStr::from("dots"))),
    );
    let mut harness = Harness::with_delegate(
        delegate,
        Settings {
            can_pull_to_refresh: true,
            can_load_more: true,
            load_more_threshold: 64.0,
        },
    );

    harness.controller.trigger_initial_load(false);
    assert_eq!(
        harness.presenter.placeholder(),
        Some(View::Custom(ArcStr::from("skeleton")))
    );

    harness.finish_initial(true, Some(LoadError::msg("offline")));
    assert_eq!(
        harness.presenter.placeholder(),
        Some(View::Custom(ArcStr::from("empty-art")))
    );
    assert_eq!(
        harness.delegate.lock().seen_errors.last(),
        Some(&Some("offline".to_string()))
    );

    harness.controller.trigger_pull_to_refresh();
    harness.finish_refresh(false, None);
    assert_eq!(
        harness.presenter.footer(),
        Some(View::Custom(ArcStr::from("dots")))
    );
}

#[test]
fn test_register_cell_template_passes_through() {
    let mut harness = Harness::enabled();
    harness
        .controller
        .register_cell_template(ArcStr::from("feed-cell"));
    assert_eq!(
        harness.presenter.calls().last(),
        Some(&Call::RegisterCell(ArcStr::from("feed-cell")))
    );
}

#[test]
fn test_invalid_threshold() {
    let settings = Settings {
        load_more_threshold: -1.0,
        ..Settings::default()
    };
    let result = Controller::new(
        MockDelegate::new(),
        MockPresenter::new(),
        settings,
        Log::mock(),
    );
    assert!(matches!(result, Err(Error::InvalidThreshold(_))));

    let mut harness = Harness::enabled();
    assert!(harness.controller.set_load_more_threshold(f64::NAN).is_err());
    assert_eq!(harness.controller.load_more_threshold(), 64.0);

    harness.controller.set_load_more_threshold(0.0).unwrap();
    assert_eq!(harness.controller.load_more_threshold(), 0.0);
}

#[test]
fn test_threshold_controls_firing_distance() {
    let mut harness = Harness::loaded();
    harness.controller.set_load_more_threshold(5.0).unwrap();
    assert!(!harness.controller.scroll_position_changed(NEAR_BOTTOM));

    harness.controller.set_load_more_threshold(500.0).unwrap();
    assert!(harness.controller.scroll_position_changed(FAR_FROM_BOTTOM));
}

#[test]
fn test_dropped_handler_leaves_load_outstanding() {
    let mut harness = Harness::enabled();
    harness.controller.trigger_initial_load(false);
    drop(harness.delegate.take_initial_load());
    harness.drain();

    assert_eq!(harness.controller.phase(), LoadPhase::InitialLoading);
    assert!(!harness.controller.trigger_initial_load(false));
}

#[derive(Debug, Clone, Copy)]
enum Op {
    Initial(bool),
    Refresh,
    LoadMore,
    Scroll,
    FinishLoad(bool, bool),
    FinishLoadMore(bool, bool, bool),
    CanLoadMore(bool),
}

const OPS: [Op; 14] = [
    Op::Initial(false),
    Op::Initial(true),
    Op::Refresh,
    Op::LoadMore,
    Op::Scroll,
    Op::FinishLoad(false, false),
    Op::FinishLoad(true, false),
    Op::FinishLoad(true, true),
    Op::FinishLoadMore(true, false, false),
    Op::FinishLoadMore(false, false, false),
    Op::FinishLoadMore(true, true, true),
    Op::FinishLoadMore(false, true, false),
    Op::CanLoadMore(true),
    Op::CanLoadMore(false),
];

fn apply(harness: &mut Harness, op: Op) {
    let error = |failed: bool| failed.then(|| LoadError::msg("failed"));
    match op {
        Op::Initial(visible) => {
            harness.controller.trigger_initial_load(visible);
        }
        Op::Refresh => {
            harness.controller.trigger_pull_to_refresh();
        }
        Op::LoadMore => harness.controller.trigger_load_more(),
        Op::Scroll => {
            let loads = harness.delegate.load_more_count();
            let started = harness.controller.scroll_position_changed(NEAR_BOTTOM);
            assert_eq!(started, harness.delegate.load_more_count() == loads + 1);
            if started {
                assert_eq!(harness.controller.phase(), LoadPhase::LoadingMore);
            }
        }
        Op::FinishLoad(is_empty, failed) => {
            let handler = harness
                .delegate
                .take_initial_load()
                .or_else(|| harness.delegate.take_refresh());
            if let Some(handler) = handler {
                handler.finish(is_empty, error(failed));
            }
        }
        Op::FinishLoadMore(can_load_more, failed, show) => {
            if let Some(handler) = harness.delegate.take_load_more() {
                handler.finish(can_load_more, error(failed), show);
            }
        }
        Op::CanLoadMore(enabled) => harness.controller.set_can_load_more(enabled),
    }
    harness.drain();
}

fn check_invariants(harness: &Harness, trace: &[Op]) {
    let controller = &harness.controller;
    let phase = controller.phase();
    let pending = {
        let data = harness.delegate.lock();
        data.initial_loads.len() + data.refreshes.len() + data.load_mores.len()
    };

    assert_eq!(pending, usize::from(phase.is_loading()), "{trace:?}");

    if phase != LoadPhase::LoadingFromPullToRefresh {
        assert_eq!(controller.view_mode(), ViewMode::for_phase(phase), "{trace:?}");
    }
    assert_eq!(
        harness.presenter.mode().unwrap_or_default(),
        controller.view_mode(),
        "{trace:?}"
    );

    if controller.is_watching_for_load_more() {
        assert!(controller.can_load_more(), "{trace:?}");
        assert_ne!(phase, LoadPhase::EmptyOrInitialLoadError, "{trace:?}");
    }

    assert_eq!(
        harness.presenter.footer().is_some(),
        controller.is_watching_for_load_more()
            || controller.load_more_view_is_error_view()
            || phase == LoadPhase::LoadingMore,
        "{trace:?}"
    );

    assert_eq!(
        harness.presenter.is_refreshing(),
        phase == LoadPhase::LoadingFromPullToRefresh,
        "{trace:?}"
    );
}

#[test]
fn test_invariants_hold_for_every_short_sequence() {
    const DEPTH: u32 = 4;
    let settings = [(false, false), (false, true), (true, false), (true, true)];

    for (can_pull_to_refresh, can_load_more) in settings {
        for index in 0..OPS.len().pow(DEPTH) {
            let mut harness = Harness::new(Settings {
                can_pull_to_refresh,
                can_load_more,
                load_more_threshold: 64.0,
            });
            let mut trace = Vec::with_capacity(DEPTH as usize);
            let mut rest = index;
            for _ in 0..DEPTH {
                let op = OPS[rest % OPS.len()];
                rest /= OPS.len();
                trace.push(op);
                apply(&mut harness, op);
                check_invariants(&harness, &trace);
            }
        }
    }
}
