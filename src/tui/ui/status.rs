//! Status banner, footer hints, and the input bar.

use super::theme::Theme;
use crate::state::{Severity, View};
use crate::tui::TuiApp;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn draw_banner(frame: &mut Frame, app: &TuiApp, theme: &Theme, area: Rect) {
    let Some(status) = &app.snapshot.status else {
        return;
    };
    let color = theme.severity_color(status.severity);
    let icon = match status.severity {
        Severity::Success => "✓",
        Severity::Error => "✗",
        Severity::Info => "·",
    };
    let line = Line::from(vec![
        Span::styled(format!(" {} ", icon), Style::default().fg(color)),
        Span::styled(
            status.text.clone(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

pub fn draw_footer(frame: &mut Frame, app: &TuiApp, theme: &Theme, area: Rect) {
    let lines = if let Some(input) = &app.input {
        vec![input_line(input, theme), hint_line("Enter save · Esc cancel", theme)]
    } else if app.form.is_some() {
        vec![
            hint_line("Tab next field · Shift-Tab previous", theme),
            hint_line("Enter add meeting · Esc cancel", theme),
        ]
    } else {
        let view_hints = match app.snapshot.view {
            View::Dashboard => {
                "↑↓ choose · Enter select · g generate · c channel · / search · n new meeting · v review"
            }
            View::Review => {
                "Tab section · ↑↓ choose · e edit · o owner · r priority · l deadline · t channel · p post · s draft · b back"
            }
            View::History => "↑↓ choose · Enter expand · Esc back",
            View::Settings => "Esc back",
        };
        vec![
            hint_line(view_hints, theme),
            hint_line("1/2/3 switch view · q quit", theme),
        ]
    };
    frame.render_widget(Paragraph::new(lines), area);
}

fn hint_line<'a>(text: &'a str, theme: &Theme) -> Line<'a> {
    Line::from(Span::styled(
        format!(" {}", text),
        Style::default().fg(theme.muted),
    ))
}

/// Renders the single-line editor with a block cursor.
fn input_line<'a>(input: &'a crate::tui::app::InputState, theme: &Theme) -> Line<'a> {
    let before = &input.buffer[..input.cursor];
    let after = &input.buffer[input.cursor..];
    let mut chars = after.chars();
    let at_cursor = chars.next();
    let rest = chars.as_str();

    let mut spans = vec![
        Span::styled(
            format!(" {}: ", input.label),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(before, Style::default().fg(theme.text)),
    ];
    match at_cursor {
        Some(c) => {
            spans.push(Span::styled(
                c.to_string(),
                Style::default()
                    .fg(theme.text)
                    .add_modifier(Modifier::REVERSED),
            ));
            spans.push(Span::styled(rest, Style::default().fg(theme.text)));
        }
        None => {
            spans.push(Span::styled(
                " ",
                Style::default()
                    .fg(theme.text)
                    .add_modifier(Modifier::REVERSED),
            ));
        }
    }
    Line::from(spans)
}
