//! Color palette for the TUI.
//!
//! Semantic colors (success=green, error=red) stay fixed; the accent shifts
//! while a request is in flight so the busy state is visible at a glance.

use crate::state::Severity;
use crate::state_machine::StateSnapshot;
use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Main text color
    pub text: Color,
    /// Muted/secondary text color
    pub muted: Color,
    /// Primary accent color (active elements, highlights)
    pub accent: Color,
    /// Secondary accent color (alternate highlights)
    pub accent_alt: Color,
    /// Default border color
    pub border: Color,
    /// Focused/active border color
    pub border_focused: Color,
    /// Success state color
    pub success: Color,
    /// Warning state color
    pub warning: Color,
    /// Error state color
    pub error: Color,
}

impl Theme {
    pub fn default_theme() -> Self {
        Self {
            text: Color::White,
            muted: Color::DarkGray,
            accent: Color::Cyan,
            accent_alt: Color::Magenta,
            border: Color::DarkGray,
            border_focused: Color::Cyan,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
        }
    }

    fn busy_theme() -> Self {
        Self {
            accent: Color::Yellow,
            border_focused: Color::Yellow,
            ..Self::default_theme()
        }
    }

    pub fn for_snapshot(snapshot: &StateSnapshot) -> Self {
        if snapshot.is_busy() {
            Self::busy_theme()
        } else {
            Self::default_theme()
        }
    }

    pub fn severity_color(&self, severity: Severity) -> Color {
        match severity {
            Severity::Success => self.success,
            Severity::Error => self.error,
            Severity::Info => self.accent,
        }
    }

    pub fn priority_color(&self, priority: &str) -> Color {
        match priority.to_lowercase().as_str() {
            "high" => self.error,
            "medium" => self.warning,
            "low" => self.success,
            _ => self.muted,
        }
    }
}
