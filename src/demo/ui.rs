use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use super::feed::Feed;
use super::screen::Screen;
use crate::phase::{LoadPhase, ViewMode};
use crate::view::{Retry, TRY_AGAIN, View};

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// Everything a frame is drawn from.
pub struct DrawState<'a> {
    pub screen: &'a Screen,
    pub feed: &'a Feed,
    pub phase: LoadPhase,
    pub scroll: usize,
    pub tick: usize,
}

/// Draws one frame and returns the height of the list viewport in rows.
pub fn draw(f: &mut Frame, state: &DrawState) -> usize {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_header(f, chunks[0], state);

    let block = Block::bordered().title(format!(" Feed ({} items) ", state.feed.len()));
    let body = block.inner(chunks[1]);
    f.render_widget(block, chunks[1]);

    match state.screen.mode {
        ViewMode::List => render_list(f, body, state),
        ViewMode::Placeholder => render_placeholder(f, body, state),
    }

    render_help(f, chunks[2], state.screen);
    usize::from(body.height)
}

fn render_header(f: &mut Frame, area: Rect, state: &DrawState) {
    let mut spans = vec![
        Span::styled("phase: ", Style::default().fg(Color::DarkGray)),
        Span::raw(state.phase.to_string()),
    ];
    if state.screen.refreshing {
        spans.push(Span::styled(
            format!("  {} refreshing", spinner(state.tick)),
            Style::default().fg(Color::Cyan),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_list(f: &mut Frame, area: Rect, state: &DrawState) {
    let rows = usize::from(area.height);
    let items = state.feed.slice(state.scroll..state.scroll + rows);
    let footer_row = state.feed.len();

    let mut lines: Vec<Line> = items.iter().map(|item| Line::raw(item.to_string())).collect();
    if let Some(footer) = &state.screen.footer {
        if footer_row >= state.scroll && footer_row < state.scroll + rows {
            lines.push(view_line(footer, state.tick).alignment(Alignment::Center));
        }
    }
    f.render_widget(Paragraph::new(lines), area);
}

fn render_placeholder(f: &mut Frame, area: Rect, state: &DrawState) {
    let mut lines = vec![Line::raw(""); usize::from(area.height / 2).saturating_sub(1)];
    if let Some(view) = &state.screen.placeholder {
        lines.push(view_line(view, state.tick));
        if let Some(retry) = view.retry() {
            lines.push(retry_line(retry));
        }
    }
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn view_line(view: &View, tick: usize) -> Line<'static> {
    match view {
        View::Spinner => Line::raw(format!("{} Loading", spinner(tick))),
        View::Notice { message, retry } => {
            let mut spans = vec![Span::styled(
                message.to_string(),
                Style::default().fg(Color::Red),
            )];
            if retry.is_some() {
                spans.push(Span::styled(
                    format!("  [t] {TRY_AGAIN}"),
                    Style::default().fg(Color::Yellow),
                ));
            }
            Line::from(spans)
        }
        View::Custom(key) => Line::styled(key.to_string(), Style::default().add_modifier(Modifier::ITALIC)),
    }
}

fn retry_line(retry: Retry) -> Line<'static> {
    let hint = match retry {
        Retry::Refresh => "reloads the feed",
        Retry::LoadMore => "loads the next page",
    };
    Line::styled(hint, Style::default().fg(Color::DarkGray))
}

fn render_help(f: &mut Frame, area: Rect, screen: &Screen) {
    let key = Style::default().fg(Color::Yellow);
    let mut spans = vec![
        Span::styled("[q]", key),
        Span::raw("uit "),
        Span::styled("[j/k]", key),
        Span::raw("scroll "),
        Span::styled("[l]", key),
        Span::raw("oad more "),
    ];
    if screen.refresh_enabled {
        spans.push(Span::styled("[r]", key));
        spans.push(Span::raw("efresh "));
    }
    if screen.visible_retry().is_some() {
        spans.push(Span::styled("[t]", key));
        spans.push(Span::raw("ry again"));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn spinner(tick: usize) -> &'static str {
    SPINNER[tick % SPINNER.len()]
}
