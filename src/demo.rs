mod feed;
mod screen;
mod ui;

use std::time::Duration;

use ratatui::{
    DefaultTerminal,
    crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
};
use tokio::sync::mpsc;

pub use feed::{Feed, FeedData, FeedDelegate, FeedOptions};
pub use screen::{Screen, TerminalPresenter};

use crate::ArcStr;
use crate::controller::Settings;
use crate::list::StatefulList;
use crate::log::Log;
use crate::phase::LoadPhase;
use crate::trigger::ScrollGeometry;
use crate::view::Retry;

const SCOPE: &str = "demo";
const TICK: Duration = Duration::from_millis(120);
const INPUT_POLL: Duration = Duration::from_millis(100);

/// Options of the interactive demo.
#[derive(Debug, Clone, Default)]
pub struct DemoOptions {
    pub feed: FeedOptions,
    /// Keep the list visible during the first load
    pub show_list_underneath: bool,
}

/// What a key press asks the list to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ScrollDown,
    ScrollUp,
    Refresh,
    LoadMore,
    TryAgain,
    Quit,
}

impl Action {
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Self::ScrollDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Self::ScrollUp),
            KeyCode::Char('r') => Some(Self::Refresh),
            KeyCode::Char('l') => Some(Self::LoadMore),
            KeyCode::Char('t') => Some(Self::TryAgain),
            KeyCode::Char('q') | KeyCode::Esc => Some(Self::Quit),
            _ => None,
        }
    }
}

/// The demo host: a stateful list over a fake feed, drawn in the terminal.
pub struct Demo {
    list: StatefulList,
    presenter: TerminalPresenter,
    feed: Feed,
    log: Log,
    phase: LoadPhase,
    scroll: usize,
    viewport: usize,
    tick: usize,
    last_geometry: Option<ScrollGeometry>,
}

impl Demo {
    pub fn new(options: &DemoOptions, settings: Settings, log: Log) -> anyhow::Result<Self> {
        let feed = Feed::new(&options.feed);
        let presenter = TerminalPresenter::new();
        let delegate = FeedDelegate::new(options.feed.clone(), feed.clone(), log.clone());
        let list = StatefulList::spawn(delegate, presenter.clone(), settings, log.clone())?;

        Ok(Self {
            list,
            presenter,
            feed,
            log,
            phase: LoadPhase::Idle,
            scroll: 0,
            viewport: 0,
            tick: 0,
            last_geometry: None,
        })
    }

    pub fn list(&self) -> &StatefulList {
        &self.list
    }

    pub fn screen(&self) -> Screen {
        self.presenter.screen()
    }

    fn max_scroll(&self, screen: &Screen) -> usize {
        let content = self.feed.len() + usize::from(screen.footer.is_some());
        content.saturating_sub(self.viewport)
    }

    /// Reports the scroll position when it moved or the content changed size.
    pub async fn report_geometry(&mut self) -> anyhow::Result<()> {
        let screen = self.screen();
        self.scroll = self.scroll.min(self.max_scroll(&screen));
        let geometry = screen.geometry(self.feed.len(), self.viewport, self.scroll);
        if self.last_geometry == Some(geometry) {
            return Ok(());
        }
        self.last_geometry = Some(geometry);
        if self.list.scroll_position_changed(geometry).await? {
            self.log.info(SCOPE, "Scrolled near the end, loading more");
        }
        Ok(())
    }

    /// Applies one action. Returns `false` once the user asked to quit.
    pub async fn handle(&mut self, action: Action) -> anyhow::Result<bool> {
        match action {
            Action::ScrollDown => {
                let max = self.max_scroll(&self.screen());
                self.scroll = (self.scroll + 1).min(max);
            }
            Action::ScrollUp => self.scroll = self.scroll.saturating_sub(1),
            Action::Refresh => {
                if !self.list.trigger_pull_to_refresh().await? {
                    self.log.info(SCOPE, "Refresh not possible right now");
                }
            }
            Action::LoadMore => self.list.trigger_load_more().await?,
            Action::TryAgain => match self.screen().visible_retry() {
                Some(Retry::Refresh) => {
                    self.list.trigger_pull_to_refresh().await?;
                }
                Some(Retry::LoadMore) => self.list.trigger_load_more().await?,
                None => {}
            },
            Action::Quit => return Ok(false),
        }
        Ok(true)
    }

    fn draw(&mut self, terminal: &mut DefaultTerminal) -> anyhow::Result<()> {
        let screen = self.screen();
        let state = ui::DrawState {
            screen: &screen,
            feed: &self.feed,
            phase: self.phase,
            scroll: self.scroll,
            tick: self.tick,
        };
        let mut viewport = self.viewport;
        terminal.draw(|f| viewport = ui::draw(f, &state))?;
        self.viewport = viewport;
        Ok(())
    }

    /// Runs the draw/event loop until the user quits.
    pub async fn run(
        mut self,
        terminal: &mut DefaultTerminal,
        show_list_underneath: bool,
    ) -> anyhow::Result<()> {
        let (key_tx, mut keys) = mpsc::channel(crate::BUFFER_SIZE);
        let input = spawn_input(key_tx);

        self.list
            .register_cell_template(ArcStr::from("feed-item"))
            .await?;
        self.list.trigger_initial_load(show_list_underneath).await?;

        let mut ticks = tokio::time::interval(TICK);
        loop {
            self.phase = self.list.snapshot().await?.phase;
            self.draw(terminal)?;
            self.report_geometry().await?;

            tokio::select! {
                key = keys.recv() => {
                    let Some(key) = key else { break };
                    let Some(action) = Action::from_key(key) else { continue };
                    if !self.handle(action).await? {
                        break;
                    }
                }
                _ = ticks.tick() => self.tick = self.tick.wrapping_add(1),
            }
        }

        drop(keys);
        let _ = tokio::task::spawn_blocking(move || input.join()).await;
        Ok(())
    }
}

/// Forwards key presses from a blocking reader thread until the receiver is
/// dropped.
fn spawn_input(tx: mpsc::Sender<KeyEvent>) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        loop {
            match event::poll(INPUT_POLL) {
                Ok(true) => {
                    if let Ok(Event::Key(key)) = event::read() {
                        if key.kind == KeyEventKind::Press && tx.blocking_send(key).is_err() {
                            break;
                        }
                    }
                }
                Ok(false) if tx.is_closed() => break,
                Ok(false) => {}
                Err(_) => break,
            }
        }
    })
}

/// Takes over the terminal, runs the demo and restores the terminal.
pub async fn run(options: DemoOptions, settings: Settings, log: Log) -> anyhow::Result<()> {
    let demo = Demo::new(&options, settings, log.clone())?;
    log.info(
        SCOPE,
        format!(
            "Starting demo: {} pages of {}, threshold {}",
            options.feed.pages, options.feed.page_size, settings.load_more_threshold
        ),
    );

    let mut terminal = ratatui::init();
    let result = demo.run(&mut terminal, options.show_list_underneath).await;
    ratatui::restore();
    result
}
