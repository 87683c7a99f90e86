//! Settings: configured agents, integrations, and session info.

use super::theme::Theme;
use crate::tui::TuiApp;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw(frame: &mut Frame, app: &TuiApp, theme: &Theme, area: Rect) {
    let config = &app.config;
    let snapshot = &app.snapshot;
    let muted = Style::default().fg(theme.muted);
    let text = Style::default().fg(theme.text);

    let agents = [
        (
            "Summary Coordinator",
            "orchestrates summary generation",
            config.agents.coordinator.as_str(),
        ),
        (
            "Channel Publisher",
            "posts summaries to the channel",
            config.agents.publisher.as_str(),
        ),
    ];

    let mut lines = vec![
        Line::from(Span::styled(
            "Integrations",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("  Calendar   ", text),
            Span::styled("connected - meetings loaded", muted),
        ]),
        Line::from(vec![
            Span::styled("  Messaging  ", text),
            Span::styled("connected - ready to post", muted),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "AI Agents",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )),
    ];

    for (name, role, id) in agents {
        let active = snapshot.active_agent.as_deref() == Some(id);
        let dot_color = if active { theme.success } else { theme.muted };
        lines.push(Line::from(vec![
            Span::styled("  ● ", Style::default().fg(dot_color)),
            Span::styled(name, text),
            Span::styled(format!(" - {}", role), muted),
        ]));
        lines.push(Line::from(Span::styled(format!("      {}", id), muted)));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Gateway",
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(vec![
        Span::styled("  Endpoint   ", text),
        Span::styled(config.gateway.base_url.clone(), muted),
    ]));
    lines.push(Line::from(vec![
        Span::styled("  Timeout    ", text),
        Span::styled(format!("{}s", config.gateway.timeout_secs), muted),
    ]));

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Session",
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(vec![
        Span::styled("  History entries  ", text),
        Span::styled(snapshot.history.len().to_string(), muted),
    ]));
    lines.push(Line::from(vec![
        Span::styled("  Default channel  ", text),
        Span::styled(config.defaults.channel.clone(), muted),
    ]));

    let body = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title("Settings"),
    );
    frame.render_widget(body, area);
}
