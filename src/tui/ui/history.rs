//! Session history: expandable list of posted and drafted summaries.

use super::theme::Theme;
use super::util::truncate_to_width;
use crate::domain::{has_text, EntryStatus, HistoryEntry};
use crate::tui::markdown::render_markdown;
use crate::tui::TuiApp;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw(frame: &mut Frame, app: &TuiApp, theme: &Theme, area: Rect) {
    let history = &app.snapshot.history;
    let mut lines: Vec<Line> = Vec::new();

    if history.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "No meeting summaries yet",
            Style::default().fg(theme.muted),
        )));
        lines.push(Line::from(Span::styled(
            "Generated summaries will appear here",
            Style::default().fg(theme.muted),
        )));
    }

    let cursor = app.history_index.min(history.len().saturating_sub(1));
    let text_width = area.width.saturating_sub(4) as usize;

    let mut cursor_row = 0;
    for (i, entry) in history.iter().enumerate() {
        let expanded = app.expanded_entry.as_deref() == Some(entry.id.as_str());
        if i == cursor {
            cursor_row = lines.len();
        }
        lines.push(entry_line(entry, expanded, i == cursor, text_width, theme));
        if expanded {
            lines.extend(entry_details(entry, theme));
        }
    }

    // Keep the cursor's row visible.
    let height = area.height.saturating_sub(2) as usize;
    let skip = cursor_row.saturating_sub(height.saturating_sub(1));

    let body = Paragraph::new(lines.into_iter().skip(skip).collect::<Vec<_>>())
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border))
                .title(format!("Meeting History ({})", history.len())),
        );
    frame.render_widget(body, area);
}

fn entry_line<'a>(
    entry: &'a HistoryEntry,
    expanded: bool,
    selected: bool,
    width: usize,
    theme: &Theme,
) -> Line<'a> {
    let arrow = if expanded { "▾" } else { "▸" };
    let title = if has_text(&entry.summary.meeting_title) {
        entry.summary.meeting_title.as_str()
    } else {
        "Untitled"
    };
    let channel = if has_text(&entry.target_channel) {
        entry.target_channel.as_str()
    } else {
        "N/A"
    };
    let label = truncate_to_width(
        &format!(
            "{} {} · {} · {}",
            arrow, title, entry.summary.meeting_date, channel
        ),
        width.saturating_sub(9),
    );
    let style = if selected {
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::REVERSED)
    } else {
        Style::default().fg(theme.text)
    };
    let status_color = match entry.status {
        EntryStatus::Posted => theme.success,
        EntryStatus::Draft => theme.muted,
    };
    Line::from(vec![
        Span::styled(label, style),
        Span::raw(" "),
        Span::styled(
            format!("[{}]", entry.status.label()),
            Style::default().fg(status_color),
        ),
    ])
}

fn entry_details<'a>(entry: &'a HistoryEntry, theme: &Theme) -> Vec<Line<'a>> {
    let mut lines = Vec::new();
    let muted = Style::default().fg(theme.muted);

    lines.push(Line::from(Span::styled(
        format!("    {}", entry.summary.attendees.join(", ")),
        muted,
    )));
    if has_text(&entry.summary.summary) {
        for line in render_markdown(&entry.summary.summary, theme) {
            let mut spans = vec![Span::raw("    ")];
            spans.extend(line.spans);
            lines.push(Line::from(spans));
        }
    }
    for item in &entry.summary.action_items {
        lines.push(Line::from(vec![
            Span::raw("    "),
            Span::styled("☐ ", Style::default().fg(theme.accent)),
            Span::styled(item.task.as_str(), Style::default().fg(theme.text)),
            Span::styled(
                format!(" ({} · {} · {})", item.owner, item.priority, item.deadline),
                muted,
            ),
        ]));
    }
    for decision in &entry.summary.key_decisions {
        lines.push(Line::from(vec![
            Span::raw("    "),
            Span::styled("✓ ", Style::default().fg(theme.success)),
            Span::styled(decision.as_str(), Style::default().fg(theme.text)),
        ]));
    }
    for insight in &entry.summary.insights {
        lines.push(Line::from(vec![
            Span::raw("    "),
            Span::styled("★ ", Style::default().fg(theme.warning)),
            Span::styled(insight.as_str(), Style::default().fg(theme.text)),
        ]));
    }
    lines.push(Line::from(Span::styled(
        format!("    {}", entry.posted_at),
        muted,
    )));
    lines
}
