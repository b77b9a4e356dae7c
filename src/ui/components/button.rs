//! Key-labelled buttons for the survey screens

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonRole {
    /// Moves the survey forward
    Primary,
    Secondary,
    /// Shows progress, never pressable
    Status,
}

pub struct Button<'a> {
    pub key: &'a str,
    pub label: &'a str,
    pub role: ButtonRole,
    pub enabled: bool,
}

impl<'a> Button<'a> {
    pub fn primary(key: &'a str, label: &'a str, enabled: bool) -> Self {
        Self {
            key,
            label,
            role: ButtonRole::Primary,
            enabled,
        }
    }

    pub fn secondary(key: &'a str, label: &'a str, enabled: bool) -> Self {
        Self {
            key,
            label,
            role: ButtonRole::Secondary,
            enabled,
        }
    }

    pub fn status(label: &'a str) -> Self {
        Self {
            key: "",
            label,
            role: ButtonRole::Status,
            enabled: false,
        }
    }

    fn accent(&self) -> Color {
        match (self.role, self.enabled) {
            (ButtonRole::Status, _) => Color::Yellow,
            (_, false) => Color::DarkGray,
            (ButtonRole::Primary, true) => Color::Cyan,
            (ButtonRole::Secondary, true) => Color::Gray,
        }
    }

    fn line(&self) -> Line<'a> {
        let accent = self.accent();
        let mut spans = Vec::new();
        if !self.key.is_empty() {
            spans.push(Span::styled(
                format!("[{}] ", self.key),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ));
        }
        let label_style = match self.role {
            ButtonRole::Primary if self.enabled => {
                Style::default().fg(accent).add_modifier(Modifier::BOLD)
            }
            _ => Style::default().fg(accent),
        };
        spans.push(Span::styled(self.label, label_style));
        Line::from(spans)
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.accent()));
        let paragraph = Paragraph::new(self.line())
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_disabled_buttons_are_greyed() {
        assert_eq!(Button::primary("Enter", "Next", false).accent(), Color::DarkGray);
        assert_eq!(Button::primary("Enter", "Next", true).accent(), Color::Cyan);
        assert_eq!(Button::status("Verifying...").accent(), Color::Yellow);
    }

    #[test]
    fn test_label_includes_key() {
        assert_eq!(
            Button::secondary("Esc", "Back", true).line().to_string(),
            "[Esc] Back"
        );
        assert_eq!(Button::status("Verifying...").line().to_string(), "Verifying...");
    }
}
