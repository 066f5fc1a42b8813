use ratatui::style::{Color, Modifier, Style};

use crate::models::DisplayMode;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub key: Color,
    pub real: Color,
    pub fake: Color,
    pub error: Color,
}

impl Theme {
    pub fn for_mode(mode: DisplayMode) -> Self {
        match mode {
            DisplayMode::Light => Self {
                background: Color::White,
                text: Color::Black,
                muted: Color::DarkGray,
                accent: Color::Blue,
                key: Color::Magenta,
                real: Color::Green,
                fake: Color::Red,
                error: Color::Red,
            },
            DisplayMode::Dark => Self {
                background: Color::Black,
                text: Color::White,
                muted: Color::Gray,
                accent: Color::Cyan,
                key: Color::Yellow,
                real: Color::LightGreen,
                fake: Color::LightRed,
                error: Color::LightRed,
            },
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.muted)
        }
    }

    /// Color for a classifier label. Labels are free text, so match loosely.
    pub fn label_color(&self, label: &str) -> Color {
        let label = label.to_ascii_lowercase();
        if label.contains("fake") || label.contains("unverified") {
            self.fake
        } else if label.contains("partial") {
            self.key
        } else if label.contains("real") || label.contains("true") {
            self.real
        } else {
            self.accent
        }
    }
}
