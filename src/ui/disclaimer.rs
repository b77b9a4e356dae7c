//! Disclaimer screen shown before anything else

use super::components::{Button, BUTTON_HEIGHT};
use super::layout::centered;
use super::text::ui_text;
use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let text = ui_text(app.flow.language());
    let heading = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(Span::styled(text.survey_info_heading, heading)),
        Line::from(text.survey_info_text),
        Line::from(""),
        Line::from(Span::styled(text.privacy_heading, heading)),
    ];
    lines.extend(
        text.privacy_points
            .iter()
            .map(|point| Line::from(format!("  • {point}"))),
    );
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(
            format!("{} ", text.disclaimer_note),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(text.disclaimer_acknowledge, Style::default().fg(Color::Gray)),
    ]));

    let outer = centered(area, 90, area.height);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(BUTTON_HEIGHT)])
        .split(outer);

    let body = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(format!(" {} ", text.disclaimer_title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta)),
    );
    frame.render_widget(body, chunks[0]);

    Button::primary("Enter", text.disclaimer_button, true).render(frame, chunks[1]);
}
