//! Terminal screens: submitting, thank-you and already-submitted

use super::layout::centered;
use super::text::ui_text;
use crate::app::App;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn draw_card(frame: &mut Frame, area: Rect, title: &str, color: Color, lines: Vec<Line>) {
    let card = centered(area, 70, lines.len() as u16 + 4);
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(format!(" {title} "))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );
    frame.render_widget(paragraph, card);
}

pub fn draw_submitting(frame: &mut Frame, area: Rect, app: &App) {
    let text = ui_text(app.flow.language());
    draw_card(
        frame,
        area,
        text.submit,
        Color::Cyan,
        vec![Line::from(""), Line::from(text.submitting)],
    );
}

pub fn draw_thanked(frame: &mut Frame, area: Rect, app: &App) {
    let text = ui_text(app.flow.language());
    let mut lines = vec![
        Line::from(""),
        Line::from(text.thank_you_text),
        Line::from(text.thank_you_no_details),
        Line::from(""),
    ];

    if let Some(receipt) = app.flow.receipt() {
        lines.push(Line::from(text.reference_id_label));
        lines.push(Line::from(Span::styled(
            receipt.reference_id.as_str(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            receipt
                .recorded_at()
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| receipt.created_at.clone()),
            Style::default().fg(Color::DarkGray),
        )));
    }

    draw_card(frame, area, text.thank_you_title, Color::Green, lines);
}

pub fn draw_already_submitted(frame: &mut Frame, area: Rect, app: &App) {
    let text = ui_text(app.flow.language());
    let lines = vec![
        Line::from(""),
        Line::from(text.already_submitted_message),
        Line::from(Span::styled(
            text.already_submitted_note,
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(text.thank_you_message),
        Line::from(""),
        Line::from(Span::styled(
            format!("Enter: {}", text.try_different),
            Style::default().fg(Color::Cyan),
        )),
    ];
    draw_card(frame, area, text.already_submitted_title, Color::Yellow, lines);
}
