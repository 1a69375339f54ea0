//! Color theme for the table chrome
//!
//! Highlight colors come from the active format; the theme only covers what
//! the format does not: the header and the status line.

use ratatui::style::{Color, Modifier, Style};

/// Color theme for terminal UI elements
#[derive(Debug, Clone)]
pub struct ColorTheme {
    /// Cell text without a highlight (None uses terminal default)
    pub normal_text: Option<Color>,

    /// Column header row
    pub header: Style,

    /// Status line background
    pub status_bg: Color,

    /// Status line text
    pub status_fg: Color,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            normal_text: None,
            header: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            status_bg: Color::Blue,
            status_fg: Color::White,
        }
    }
}

impl ColorTheme {
    /// Create a monochrome theme for terminals without color support
    pub fn monochrome() -> Self {
        Self {
            normal_text: None,
            header: Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            status_bg: Color::Black,
            status_fg: Color::White,
        }
    }

    /// Create a high-contrast theme for accessibility
    pub fn high_contrast() -> Self {
        Self {
            normal_text: Some(Color::White),
            header: Style::default()
                .fg(Color::Black)
                .bg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
            status_bg: Color::White,
            status_fg: Color::Black,
        }
    }

    /// Base style for a cell before its highlight colors are applied
    pub fn cell_style(&self) -> Style {
        match self.normal_text {
            Some(color) => Style::default().fg(color),
            None => Style::default(),
        }
    }
}
