//! Review page and the consent dialog over it

use super::components::{Button, Dialog, BUTTON_HEIGHT};
use super::text::ui_text;
use crate::app::App;
use crate::state::ReviewEntry;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Review lines grouped under their step titles
fn review_lines<'a>(entries: &'a [ReviewEntry], empty: &'a str) -> Vec<Line<'a>> {
    if entries.is_empty() {
        return vec![Line::from(Span::styled(
            empty,
            Style::default().fg(Color::DarkGray),
        ))];
    }

    let mut lines = Vec::new();
    let mut current_step: Option<&str> = None;
    for entry in entries {
        if current_step != Some(entry.step_title.as_str()) {
            if current_step.is_some() {
                lines.push(Line::from(""));
            }
            current_step = Some(entry.step_title.as_str());
            lines.push(Line::from(Span::styled(
                entry.step_title.as_str(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )));
        }
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {}: ", entry.label),
                Style::default().fg(Color::Gray),
            ),
            Span::raw(entry.answer.as_str()),
        ]));
    }
    lines
}

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let text = ui_text(app.flow.language());
    let entries = app.flow.review_entries();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(BUTTON_HEIGHT),
        ])
        .split(area);

    frame.render_widget(
        Paragraph::new(text.review_subtitle).style(Style::default().fg(Color::Gray)),
        chunks[0],
    );

    let body = Paragraph::new(review_lines(&entries, text.nothing_answered))
        .wrap(Wrap { trim: false })
        .scroll((app.state.scroll_offset as u16, 0))
        .block(
            Block::default()
                .title(format!(" {} ", text.review_title))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
    frame.render_widget(body, chunks[1]);

    let buttons = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(35),
            Constraint::Min(0),
            Constraint::Percentage(35),
        ])
        .split(chunks[2]);
    Button::secondary("e", text.edit, true).render(frame, buttons[0]);
    Button::primary("Enter", text.submit, true).render(frame, buttons[2]);
}

/// Consent acknowledgement overlay
pub fn draw_consent(frame: &mut Frame, app: &App) {
    let text = ui_text(app.flow.language());
    let given = app.flow.consent_given();
    let (check, check_style) = if given {
        ("[x]", Style::default().fg(Color::Green))
    } else {
        ("[ ]", Style::default())
    };

    Dialog::new(text.consent_title, Color::Magenta)
        .width(70)
        .text(text.consent_heading, Style::default().add_modifier(Modifier::BOLD))
        .text("", Style::default())
        .text(format!("{check} {}", text.consent_check), check_style)
        .key("Space", "agree", true)
        .key("Enter", text.submit, given)
        .key("Esc", text.cancel, true)
        .render(frame);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(step: &str, label: &str, answer: &str) -> ReviewEntry {
        ReviewEntry {
            step_title: step.into(),
            question_id: label.to_lowercase(),
            label: label.into(),
            answer: answer.into(),
        }
    }

    fn plain(lines: &[Line]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_entries_grouped_by_step() {
        let entries = vec![
            entry("Location", "District", "Guntur"),
            entry("Location", "Mandal", "Ponnur"),
            entry("Household", "Land", "Yes"),
        ];
        assert_eq!(
            plain(&review_lines(&entries, "none")),
            vec![
                "Location",
                "  District: Guntur",
                "  Mandal: Ponnur",
                "",
                "Household",
                "  Land: Yes",
            ]
        );
    }

    #[test]
    fn test_empty_review() {
        assert_eq!(plain(&review_lines(&[], "Not answered")), vec!["Not answered"]);
    }
}
