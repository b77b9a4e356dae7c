//! Mobile number entry and duplicate check

use super::components::Button;
use super::layout::centered;
use super::text::ui_text;
use crate::app::App;
use crate::state::submission::CONTACT_LEN;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let text = ui_text(app.flow.language());
    let input = app.flow.mobile_input();
    let pending = app.flow.mobile_pending();

    let outer = centered(area, 60, 12);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // input
            Constraint::Length(1), // counter
            Constraint::Min(2),    // helper / error
            Constraint::Length(3), // status button
        ])
        .split(outer);

    let value = if input.is_empty() {
        Line::from(Span::styled(
            text.enter_mobile,
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(vec![
            Span::raw(input),
            Span::styled("▌", Style::default().fg(Color::Cyan)),
        ])
    };
    let field = Paragraph::new(value).block(
        Block::default()
            .title(format!(" {} * ", text.mobile_number))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(field, chunks[0]);

    let counter = Paragraph::new(format!("{}/{CONTACT_LEN}", input.len()))
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(counter, chunks[1]);

    let message = match app.flow.mobile_error() {
        Some(err) => Paragraph::new(err.to_string()).style(Style::default().fg(Color::Red)),
        None => Paragraph::new(text.mobile_helper).style(Style::default().fg(Color::Gray)),
    };
    frame.render_widget(message.wrap(Wrap { trim: true }), chunks[2]);

    if pending {
        Button::status(text.verifying).render(frame, chunks[3]);
    }
}
