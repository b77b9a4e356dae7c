//! Modal dialog drawn over the current screen

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph},
    Frame,
};

/// Two border columns plus one padding column per side
const CHROME_WIDTH: u16 = 4;

struct KeyHint<'a> {
    key: &'a str,
    label: &'a str,
    enabled: bool,
}

/// Builder for a centered dialog with wrapped body text and a key row
pub struct Dialog<'a> {
    title: &'a str,
    accent: Color,
    width: u16,
    paragraphs: Vec<(String, Style)>,
    keys: Vec<KeyHint<'a>>,
}

impl<'a> Dialog<'a> {
    pub fn new(title: &'a str, accent: Color) -> Self {
        Self {
            title,
            accent,
            width: 60,
            paragraphs: Vec::new(),
            keys: Vec::new(),
        }
    }

    /// Widest the dialog may grow, clamped to the screen
    pub fn width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    /// Append a paragraph; `\n` starts a new line
    pub fn text(mut self, text: impl Into<String>, style: Style) -> Self {
        self.paragraphs.push((text.into(), style));
        self
    }

    pub fn key(mut self, key: &'a str, label: &'a str, enabled: bool) -> Self {
        self.keys.push(KeyHint {
            key,
            label,
            enabled,
        });
        self
    }

    fn body(&self, wrap_at: usize) -> Vec<Line<'static>> {
        self.paragraphs
            .iter()
            .flat_map(|(text, style)| {
                let style = *style;
                wrap_words(text, wrap_at)
                    .into_iter()
                    .map(move |line| Line::from(Span::styled(line, style)))
            })
            .collect()
    }

    fn key_row(&self) -> Line<'a> {
        let mut spans = Vec::new();
        for (idx, hint) in self.keys.iter().enumerate() {
            if idx > 0 {
                spans.push(Span::raw("   "));
            }
            let key_style = if hint.enabled {
                Style::default()
                    .fg(self.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            spans.push(Span::styled(hint.key, key_style));
            spans.push(Span::styled(
                format!(" {}", hint.label),
                if hint.enabled {
                    Style::default()
                } else {
                    Style::default().fg(Color::DarkGray)
                },
            ));
        }
        Line::from(spans).alignment(Alignment::Center)
    }

    pub fn render(self, frame: &mut Frame) {
        let screen = frame.area();
        let width = self.width.min(screen.width);
        let mut lines: Vec<Line<'a>> =
            self.body(width.saturating_sub(CHROME_WIDTH).max(1) as usize);
        if !self.keys.is_empty() {
            lines.push(Line::from(""));
            lines.push(self.key_row());
        }

        let area = dialog_area(screen, width, lines.len() as u16);
        let block = Block::default()
            .title(Span::styled(
                format!(" {} ", self.title),
                Style::default()
                    .fg(self.accent)
                    .add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.accent))
            .padding(Padding::horizontal(1));

        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(lines)
                .block(block)
                .style(Style::default().bg(Color::Black)),
            area,
        );
    }
}

/// Centered rect tall enough for `rows` of content plus borders
fn dialog_area(screen: Rect, width: u16, rows: u16) -> Rect {
    let height = (rows + 2).min(screen.height);
    Rect {
        x: screen.x + (screen.width - width) / 2,
        y: screen.y + (screen.height - height) / 2,
        width,
        height,
    }
}

/// Greedy word wrap measured in chars so Telugu text is not cut short
fn wrap_words(text: &str, max_width: usize) -> Vec<String> {
    let mut out = Vec::new();
    for raw in text.split('\n') {
        let mut line = String::new();
        let mut len = 0;
        for word in raw.split_whitespace() {
            let word_len = word.chars().count();
            if len > 0 && len + 1 + word_len > max_width {
                out.push(std::mem::take(&mut line));
                len = 0;
            }
            if len > 0 {
                line.push(' ');
                len += 1;
            }
            line.push_str(word);
            len += word_len;
        }
        out.push(line);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_wrap_breaks_between_words() {
        assert_eq!(
            wrap_words("the quick brown fox", 10),
            vec!["the quick", "brown fox"]
        );
    }

    #[test]
    fn test_wrap_keeps_blank_lines() {
        assert_eq!(wrap_words("a\n\nb", 10), vec!["a", "", "b"]);
        assert_eq!(wrap_words("", 10), vec![""]);
    }

    #[test]
    fn test_wrap_measures_chars() {
        // 4 chars but 12 bytes per word
        assert_eq!(wrap_words("మహిళ మహిళ", 9), vec!["మహిళ మహిళ"]);
    }

    #[test]
    fn test_key_row_lists_keys() {
        let dialog = Dialog::new("t", Color::Red)
            .key("Space", "agree", true)
            .key("Enter", "submit", false);
        assert_eq!(dialog.key_row().to_string(), "Space agree   Enter submit");
    }

    #[test]
    fn test_dialog_area_centered_and_clamped() {
        let screen = Rect::new(0, 0, 80, 24);
        assert_eq!(dialog_area(screen, 60, 4), Rect::new(10, 9, 60, 6));
        assert_eq!(dialog_area(screen, 60, 40), Rect::new(10, 0, 60, 24));
    }
}
