//! Dashboard: meeting list on the left, meeting detail on the right.

use super::theme::Theme;
use super::util::truncate_to_width;
use crate::domain::{has_items, has_text};
use crate::tui::markdown::render_markdown;
use crate::tui::TuiApp;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw(frame: &mut Frame, app: &TuiApp, theme: &Theme, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(44), Constraint::Min(0)])
        .split(area);

    draw_meeting_list(frame, app, theme, chunks[0]);
    draw_meeting_detail(frame, app, theme, chunks[1]);
}

fn draw_meeting_list(frame: &mut Frame, app: &TuiApp, theme: &Theme, area: Rect) {
    let meetings = app.filtered_meetings();
    let selected_id = app.snapshot.selected_meeting.clone();
    let cursor = app.meeting_index.min(meetings.len().saturating_sub(1));

    let title = if has_text(&app.search_query) {
        format!("Meetings · /{}", app.search_query)
    } else {
        "Upcoming Meetings".to_string()
    };

    let height = area.height.saturating_sub(2) as usize;
    let start = if cursor >= height && height > 0 {
        cursor + 1 - height
    } else {
        0
    };

    let text_width = area.width.saturating_sub(4) as usize;
    let mut lines: Vec<Line> = Vec::new();
    for (i, meeting) in meetings.iter().enumerate().skip(start).take(height.max(1)) {
        let chosen = selected_id.as_deref() == Some(meeting.id.as_str());
        let marker = if chosen { "● " } else { "  " };
        let label = truncate_to_width(
            &format!(
                "{}{} · {} {}",
                marker, meeting.title, meeting.date, meeting.channel
            ),
            text_width,
        );
        let style = if i == cursor {
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::REVERSED)
        } else if chosen {
            Style::default().fg(theme.accent)
        } else {
            Style::default().fg(theme.text)
        };
        lines.push(Line::from(Span::styled(label, style)));
    }
    if meetings.is_empty() {
        lines.push(Line::from(Span::styled(
            "No meetings found",
            Style::default().fg(theme.muted),
        )));
    }

    let list = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(title),
    );
    frame.render_widget(list, area);
}

fn draw_meeting_detail(frame: &mut Frame, app: &TuiApp, theme: &Theme, area: Rect) {
    let snapshot = &app.snapshot;
    let mut lines: Vec<Line> = Vec::new();

    if let Some(meeting) = snapshot.selected_meeting() {
        lines.push(Line::from(Span::styled(
            meeting.title.clone(),
            Style::default()
                .fg(theme.text)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            format!(
                "{} · {} · {}",
                meeting.date, meeting.time, meeting.duration
            ),
            Style::default().fg(theme.muted),
        )));
        if has_items(&meeting.attendees) {
            lines.push(Line::from(""));
            lines.push(section_label("Attendees", theme));
            lines.push(Line::from(Span::styled(
                meeting.attendees.join(", "),
                Style::default().fg(theme.text),
            )));
        }
        if has_text(&meeting.description) {
            lines.push(Line::from(""));
            lines.push(section_label("Description", theme));
            lines.push(Line::from(Span::styled(
                meeting.description.clone(),
                Style::default().fg(theme.text),
            )));
        }
        if has_text(&meeting.agenda) {
            lines.push(Line::from(""));
            lines.push(section_label("Agenda", theme));
            lines.extend(render_markdown(&meeting.agenda, theme));
        }
        lines.push(Line::from(""));
        lines.push(section_label("Channel for context", theme));
        let channel = if has_text(&snapshot.context_channel) {
            snapshot.context_channel.clone()
        } else {
            meeting.channel.clone()
        };
        lines.push(Line::from(Span::styled(
            channel,
            Style::default().fg(theme.accent),
        )));
        lines.push(Line::from(""));
        if snapshot.is_generating {
            lines.push(Line::from(Span::styled(
                "Generating summary...",
                Style::default().fg(theme.warning),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Press g to generate a summary",
                Style::default().fg(theme.muted),
            )));
        }
    } else {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Select a meeting",
            Style::default()
                .fg(theme.text)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Choose a meeting from the list or create a new one to generate",
            Style::default().fg(theme.muted),
        )));
        lines.push(Line::from(Span::styled(
            "an AI summary with action items, key decisions, and insights.",
            Style::default().fg(theme.muted),
        )));
    }

    let detail = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border))
                .title("Meeting"),
        );
    frame.render_widget(detail, area);
}

fn section_label<'a>(label: &'a str, theme: &Theme) -> Line<'a> {
    Line::from(Span::styled(
        label.to_uppercase(),
        Style::default()
            .fg(theme.muted)
            .add_modifier(Modifier::BOLD),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_label_is_uppercased() {
        let theme = Theme::default_theme();
        let line = section_label("Attendees", &theme);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "ATTENDEES");
    }
}
