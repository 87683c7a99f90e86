//! Small rendering helpers.

use ratatui::layout::Rect;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncates a string to at most `max` display columns, appending an
/// ellipsis when anything was cut.
pub fn truncate_to_width(s: &str, max: usize) -> String {
    if UnicodeWidthStr::width(s) <= max {
        return s.to_string();
    }
    let budget = max.saturating_sub(1);
    let mut width = 0;
    let mut out = String::new();
    for c in s.chars() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if width + w > budget {
            break;
        }
        width += w;
        out.push(c);
    }
    out.push('…');
    out
}

/// A `width` x `height` rectangle centered inside `area`, clamped to fit.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string_is_unchanged() {
        assert_eq!(truncate_to_width("abc", 10), "abc");
    }

    #[test]
    fn test_truncate_long_string_gets_ellipsis() {
        assert_eq!(truncate_to_width("abcdef", 4), "abc…");
    }

    #[test]
    fn test_truncate_respects_wide_chars() {
        // Each CJK char is two columns wide.
        let truncated = truncate_to_width("日本語のテスト", 5);
        assert_eq!(truncated, "日本…");
    }

    #[test]
    fn test_centered_rect_is_clamped() {
        let area = Rect {
            x: 0,
            y: 0,
            width: 10,
            height: 4,
        };
        let rect = centered_rect(20, 20, area);
        assert_eq!(rect.width, 10);
        assert_eq!(rect.height, 4);
    }
}
