//! Minimal markdown-ish line renderer for agendas and summaries.
//!
//! Handles headers, bullets, numbered lines, and `**bold**` spans. Anything
//! else renders as plain text.

use super::ui::theme::Theme;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use regex::Regex;
use std::sync::OnceLock;

fn ordered_list_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+\.\s").expect("valid ordered-list regex"))
}

fn bold_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*\*(.*?)\*\*").expect("valid bold regex"))
}

pub fn render_markdown<'a>(text: &'a str, theme: &Theme) -> Vec<Line<'a>> {
    text.lines()
        .map(|line| {
            if let Some(rest) = line.strip_prefix("### ") {
                return Line::from(Span::styled(
                    rest,
                    Style::default()
                        .fg(theme.accent_alt)
                        .add_modifier(Modifier::BOLD),
                ));
            }
            if let Some(rest) = line.strip_prefix("## ") {
                return Line::from(Span::styled(
                    rest,
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD),
                ));
            }
            if let Some(rest) = line.strip_prefix("# ") {
                return Line::from(Span::styled(
                    rest,
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD),
                ));
            }
            if let Some(rest) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
                let mut spans = vec![Span::styled("  • ", Style::default().fg(theme.accent))];
                spans.extend(inline_spans(rest, theme));
                return Line::from(spans);
            }
            if let Some(marker) = ordered_list_re().find(line) {
                let mut spans = vec![
                    Span::raw("  "),
                    Span::styled(marker.as_str(), Style::default().fg(theme.accent)),
                ];
                spans.extend(inline_spans(&line[marker.end()..], theme));
                return Line::from(spans);
            }
            Line::from(inline_spans(line, theme))
        })
        .collect()
}

/// Splits `**bold**` runs into styled spans; unmatched markers stay literal.
fn inline_spans<'a>(text: &'a str, theme: &Theme) -> Vec<Span<'a>> {
    let mut spans = Vec::new();
    let mut last = 0;
    for captures in bold_re().captures_iter(text) {
        let whole = captures.get(0).expect("capture 0 always present");
        let inner = captures.get(1).expect("bold regex has one group");
        if whole.start() > last {
            spans.push(Span::styled(
                &text[last..whole.start()],
                Style::default().fg(theme.text),
            ));
        }
        spans.push(Span::styled(
            inner.as_str(),
            Style::default()
                .fg(theme.text)
                .add_modifier(Modifier::BOLD),
        ));
        last = whole.end();
    }
    if last < text.len() {
        spans.push(Span::styled(
            &text[last..],
            Style::default().fg(theme.text),
        ));
    }
    if spans.is_empty() {
        spans.push(Span::raw(""));
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::ui::theme::Theme;

    fn plain_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_headers_bullets_and_numbers() {
        let theme = Theme::default_theme();
        let lines = render_markdown("# Title\n- item\n1. first\nplain", &theme);
        assert_eq!(plain_text(&lines[0]), "Title");
        assert_eq!(plain_text(&lines[1]), "  • item");
        assert_eq!(plain_text(&lines[2]), "  1. first");
        assert_eq!(plain_text(&lines[3]), "plain");
    }

    #[test]
    fn test_bold_spans_are_extracted() {
        let theme = Theme::default_theme();
        let lines = render_markdown("a **b** c", &theme);
        assert_eq!(plain_text(&lines[0]), "a b c");
        assert_eq!(lines[0].spans.len(), 3);
    }

    #[test]
    fn test_unmatched_bold_marker_stays_literal() {
        let theme = Theme::default_theme();
        let lines = render_markdown("a **b", &theme);
        assert_eq!(plain_text(&lines[0]), "a **b");
    }
}
