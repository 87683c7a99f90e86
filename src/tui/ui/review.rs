//! Review screen: the editable summary, action items, decisions, insights,
//! and the post panel.

use super::theme::Theme;
use super::util::truncate_to_width;
use crate::domain::{has_items, has_text};
use crate::tui::markdown::render_markdown;
use crate::tui::ui::spinner_frame;
use crate::tui::{ReviewSection, TuiApp};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw(frame: &mut Frame, app: &TuiApp, theme: &Theme, area: Rect) {
    if app.snapshot.is_generating {
        draw_generating(frame, app, theme, area);
        return;
    }
    let Some(summary) = &app.snapshot.summary else {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No summary to review.",
                Style::default().fg(theme.muted),
            )),
            Line::from(Span::styled(
                "Press b to go back to the dashboard.",
                Style::default().fg(theme.muted),
            )),
        ])
        .block(Block::default().borders(Borders::ALL).title("Review"));
        frame.render_widget(empty, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Min(5),
            Constraint::Length(8),
            Constraint::Length(5),
            Constraint::Length(5),
            Constraint::Length(3),
        ])
        .split(area);

    draw_header_card(frame, app, summary, theme, chunks[0]);
    draw_summary(frame, app, summary, theme, chunks[1]);
    draw_action_items(frame, app, summary, theme, chunks[2]);
    draw_string_list(
        frame,
        app,
        theme,
        chunks[3],
        ReviewSection::Decisions,
        "Key Decisions",
        &summary.key_decisions,
    );
    draw_string_list(
        frame,
        app,
        theme,
        chunks[4],
        ReviewSection::Insights,
        "Insights",
        &summary.insights,
    );
    draw_post_panel(frame, app, theme, chunks[5]);
}

fn draw_generating(frame: &mut Frame, app: &TuiApp, theme: &Theme, area: Rect) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{} Generating summary...", spinner_frame(app.tick)),
            Style::default()
                .fg(theme.warning)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for width in [40usize, 56, 48, 52, 32] {
        lines.push(Line::from(Span::styled(
            "▒".repeat(width),
            Style::default().fg(theme.muted),
        )));
    }
    let skeleton = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Review"));
    frame.render_widget(skeleton, area);
}

fn border(theme: &Theme, focused: bool) -> Style {
    if focused {
        Style::default().fg(theme.border_focused)
    } else {
        Style::default().fg(theme.border)
    }
}

fn draw_header_card(
    frame: &mut Frame,
    app: &TuiApp,
    summary: &crate::domain::SummaryData,
    theme: &Theme,
    area: Rect,
) {
    let focused = app.review_section == ReviewSection::Header;
    let row = |i: usize, base: Style| {
        if focused && app.review_index.min(2) == i {
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::REVERSED)
        } else {
            base
        }
    };

    let lines = vec![
        Line::from(Span::styled(
            if has_text(&summary.meeting_title) {
                summary.meeting_title.clone()
            } else {
                "Untitled Meeting".to_string()
            },
            row(
                0,
                Style::default()
                    .fg(theme.text)
                    .add_modifier(Modifier::BOLD),
            ),
        )),
        Line::from(vec![
            Span::styled(
                summary.meeting_date.clone(),
                row(1, Style::default().fg(theme.muted)),
            ),
            Span::styled(" · ", Style::default().fg(theme.muted)),
            Span::styled(
                summary.meeting_time.clone(),
                row(2, Style::default().fg(theme.muted)),
            ),
        ]),
        Line::from(Span::styled(
            if has_items(&summary.attendees) {
                summary.attendees.join(", ")
            } else {
                "(no attendees)".to_string()
            },
            Style::default().fg(theme.muted),
        )),
    ];
    let card = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border(theme, focused))
            .title("AI Generated Summary"),
    );
    frame.render_widget(card, area);
}

fn draw_summary(
    frame: &mut Frame,
    app: &TuiApp,
    summary: &crate::domain::SummaryData,
    theme: &Theme,
    area: Rect,
) {
    let focused = app.review_section == ReviewSection::Summary;
    let lines = if has_text(&summary.summary) {
        render_markdown(&summary.summary, theme)
    } else {
        vec![Line::from(Span::styled(
            "(empty - press e to write one)",
            Style::default().fg(theme.muted),
        ))]
    };
    let body = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border(theme, focused))
            .title("Summary"),
    );
    frame.render_widget(body, area);
}

fn draw_action_items(
    frame: &mut Frame,
    app: &TuiApp,
    summary: &crate::domain::SummaryData,
    theme: &Theme,
    area: Rect,
) {
    let focused = app.review_section == ReviewSection::ActionItems;
    let items = &summary.action_items;
    let cursor = app.review_index.min(items.len().saturating_sub(1));

    let rows = (area.height.saturating_sub(2) as usize) / 2;
    let start = if cursor >= rows && rows > 0 {
        cursor + 1 - rows
    } else {
        0
    };
    let text_width = area.width.saturating_sub(4) as usize;

    let mut lines: Vec<Line> = Vec::new();
    if items.is_empty() {
        lines.push(Line::from(Span::styled(
            "No action items",
            Style::default().fg(theme.muted),
        )));
    }
    for (i, item) in items.iter().enumerate().skip(start).take(rows.max(1)) {
        let selected = focused && i == cursor;
        let task_style = if selected {
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::REVERSED)
        } else {
            Style::default().fg(theme.text)
        };
        let task = if has_text(&item.task) {
            item.task.clone()
        } else {
            "(no task description)".to_string()
        };
        lines.push(Line::from(Span::styled(
            truncate_to_width(&format!("▸ {}", task), text_width),
            task_style,
        )));
        lines.push(Line::from(vec![
            Span::raw("    "),
            Span::styled(item.owner.clone(), Style::default().fg(theme.muted)),
            Span::raw(" · "),
            Span::styled(
                item.priority.clone(),
                Style::default().fg(theme.priority_color(&item.priority)),
            ),
            Span::raw(" · "),
            Span::styled(item.deadline.clone(), Style::default().fg(theme.muted)),
        ]));
    }

    let block = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border(theme, focused))
            .title(format!("Action Items ({})", items.len())),
    );
    frame.render_widget(block, area);
}

fn draw_string_list(
    frame: &mut Frame,
    app: &TuiApp,
    theme: &Theme,
    area: Rect,
    section: ReviewSection,
    title: &str,
    items: &[String],
) {
    let focused = app.review_section == section;
    let cursor = app.review_index.min(items.len().saturating_sub(1));
    let rows = area.height.saturating_sub(2) as usize;
    let start = if cursor >= rows && rows > 0 {
        cursor + 1 - rows
    } else {
        0
    };
    let text_width = area.width.saturating_sub(4) as usize;

    let mut lines: Vec<Line> = Vec::new();
    if items.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("No {} recorded", title.to_lowercase()),
            Style::default().fg(theme.muted),
        )));
    }
    for (i, item) in items.iter().enumerate().skip(start).take(rows.max(1)) {
        let style = if focused && i == cursor {
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::REVERSED)
        } else {
            Style::default().fg(theme.text)
        };
        lines.push(Line::from(Span::styled(
            truncate_to_width(&format!("• {}", item), text_width),
            style,
        )));
    }

    let block = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border(theme, focused))
            .title(format!("{} ({})", title, items.len())),
    );
    frame.render_widget(block, area);
}

fn draw_post_panel(frame: &mut Frame, app: &TuiApp, theme: &Theme, area: Rect) {
    let focused = app.review_section == ReviewSection::Channel;
    let snapshot = &app.snapshot;
    let channel = if has_text(&snapshot.target_channel) {
        Span::styled(
            snapshot.target_channel.clone(),
            Style::default().fg(theme.accent),
        )
    } else {
        Span::styled("(press t to set)", Style::default().fg(theme.muted))
    };
    let action = if snapshot.is_posting {
        Span::styled(
            format!("{} posting...", spinner_frame(app.tick)),
            Style::default().fg(theme.warning),
        )
    } else {
        Span::styled("[p] post · [s] save draft", Style::default().fg(theme.muted))
    };
    let line = Line::from(vec![
        Span::styled("Target: ", Style::default().fg(theme.muted)),
        channel,
        Span::raw("   "),
        action,
    ]);
    let panel = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border(theme, focused))
            .title("Publish"),
    );
    frame.render_widget(panel, area);
}
