//! Custom-meeting form overlay.

use super::theme::Theme;
use super::util::centered_rect;
use crate::tui::app::FORM_FIELDS;
use crate::tui::TuiApp;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn draw_overlay(frame: &mut Frame, app: &TuiApp, theme: &Theme) {
    let Some(form) = &app.form else {
        return;
    };

    let area = centered_rect(56, FORM_FIELDS.len() as u16 + 4, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = Vec::new();
    for (i, label) in FORM_FIELDS.iter().enumerate() {
        let focused = i == form.focus;
        let label_style = if focused {
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.muted)
        };
        let mut spans = vec![
            Span::styled(format!("{:<28}", label), label_style),
            Span::styled(
                form.values[i].clone(),
                Style::default().fg(theme.text),
            ),
        ];
        if focused {
            spans.push(Span::styled(
                " ",
                Style::default()
                    .fg(theme.text)
                    .add_modifier(Modifier::REVERSED),
            ));
        }
        lines.push(Line::from(spans));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Only the title is required; the rest gets defaults.",
        Style::default().fg(theme.muted),
    )));

    let body = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border_focused))
            .title("New Meeting"),
    );
    frame.render_widget(body, area);
}
