//! Draw dispatch and the shared chrome (header, status banner, footer).

mod dashboard;
mod form;
mod history;
mod review;
mod settings;
mod status;
pub mod theme;
pub mod util;

use super::TuiApp;
use crate::state::View;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use theme::Theme;

const SPINNER_FRAMES: [&str; 4] = ["|", "/", "-", "\\"];

pub fn spinner_frame(tick: usize) -> &'static str {
    SPINNER_FRAMES[tick % SPINNER_FRAMES.len()]
}

pub fn draw(frame: &mut Frame, app: &TuiApp) {
    let theme = Theme::for_snapshot(&app.snapshot);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(frame.area());

    draw_header(frame, app, &theme, chunks[0]);
    status::draw_banner(frame, app, &theme, chunks[1]);

    match app.snapshot.view {
        View::Dashboard => dashboard::draw(frame, app, &theme, chunks[2]),
        View::Review => review::draw(frame, app, &theme, chunks[2]),
        View::History => history::draw(frame, app, &theme, chunks[2]),
        View::Settings => settings::draw(frame, app, &theme, chunks[2]),
    }

    status::draw_footer(frame, app, &theme, chunks[3]);

    if app.form.is_some() {
        form::draw_overlay(frame, app, &theme);
    }
}

fn draw_header(frame: &mut Frame, app: &TuiApp, theme: &Theme, area: Rect) {
    let snapshot = &app.snapshot;
    let mut spans = vec![
        Span::styled(
            " Meeting Summary Assistant ",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
    ];

    let tabs = [
        ("[1] Dashboard", View::Dashboard),
        ("[2] History", View::History),
        ("[3] Settings", View::Settings),
    ];
    for (label, view) in tabs {
        // The review screen lives under the dashboard tab.
        let active = snapshot.view == view
            || (snapshot.view == View::Review && view == View::Dashboard);
        let style = if active {
            Style::default()
                .fg(theme.text)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(theme.muted)
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::raw("  "));
    }

    let mut second = vec![Span::styled(
        format!(" {} ", snapshot.view.title()),
        Style::default().fg(theme.muted),
    )];
    if let Some(agent) = &snapshot.active_agent {
        second.push(Span::styled(
            format!(
                "{} agent {} in flight",
                spinner_frame(app.tick),
                agent
            ),
            Style::default().fg(theme.warning),
        ));
    }

    let header = Paragraph::new(vec![Line::from(spans), Line::from(second)]);
    frame.render_widget(header, area);
}
