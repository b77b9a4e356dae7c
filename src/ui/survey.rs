//! Questionnaire step view

use super::components::{Button, BUTTON_HEIGHT};
use super::forms::{draw_help_text, draw_question, question_height};
use super::layout::centered;
use super::text::ui_text;
use crate::app::App;
use crate::state::SchemaStatus;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

/// First question to draw so the active one fits in `available` rows
pub fn first_visible_question(heights: &[u16], active: usize, available: u16) -> usize {
    if heights.is_empty() {
        return 0;
    }
    let active = active.min(heights.len() - 1);
    let mut first = active;
    let mut used = heights[active];
    while first > 0 && used + heights[first - 1] <= available {
        used += heights[first - 1];
        first -= 1;
    }
    first
}

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let text = ui_text(app.flow.language());

    match app.flow.schema_status() {
        SchemaStatus::Loading => {
            let msg = Paragraph::new(text.loading).style(Style::default().fg(Color::Gray));
            frame.render_widget(msg, centered(area, text.loading.chars().count() as u16, 1));
            return;
        }
        SchemaStatus::Failed(err) => {
            let lines = vec![
                Line::from(Span::styled(err.to_string(), Style::default().fg(Color::Red))),
                Line::from(""),
                Line::from(Span::styled(
                    format!("r: {}", text.retry),
                    Style::default().fg(Color::Cyan),
                )),
            ];
            let paragraph = Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(paragraph, centered(area, 70, 7));
            return;
        }
        SchemaStatus::Ready => {}
    }

    let Some(step) = app.flow.current_step() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),             // step title
            Constraint::Length(1),             // progress
            Constraint::Min(0),                // questions
            Constraint::Length(BUTTON_HEIGHT), // buttons
            Constraint::Length(1),             // help
        ])
        .split(area);

    let title = Line::from(vec![
        Span::styled(
            step.title.as_str(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  ({}/{})", step.step_number + 1, step.total_steps),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(title), chunks[0]);

    let ratio = if step.total_steps == 0 {
        0.0
    } else {
        (step.step_number + 1) as f64 / step.total_steps as f64
    };
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Magenta))
        .label(format!("{} {:.0}%", text.progress, ratio * 100.0))
        .ratio(ratio.clamp(0.0, 1.0));
    frame.render_widget(gauge, chunks[1]);

    draw_questions(frame, chunks[2], app);

    let buttons = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Min(0),
            Constraint::Percentage(30),
        ])
        .split(chunks[3]);
    Button::secondary("Esc", text.back, app.flow.step_index() > 0).render(frame, buttons[0]);
    Button::primary("Enter", text.continue_, app.flow.can_proceed()).render(frame, buttons[2]);

    draw_help_text(frame, chunks[4], "* required");
}

fn draw_questions(frame: &mut Frame, area: Rect, app: &App) {
    let questions = app.flow.visible_questions();
    let cursor = app.state.cursor;

    let heights: Vec<u16> = questions
        .iter()
        .enumerate()
        .map(|(idx, q)| question_height(app.flow.field_options(q).len(), idx == cursor.question))
        .collect();

    let first = first_visible_question(&heights, cursor.question, area.height);
    let mut y = area.y;
    for (idx, question) in questions.iter().enumerate().skip(first) {
        let height = heights[idx];
        if y + height > area.y + area.height {
            break;
        }
        let rect = Rect {
            x: area.x,
            y,
            width: area.width,
            height,
        };
        draw_question(
            frame,
            rect,
            question,
            app.flow.field_options(question),
            app.flow.answers().get(&question.question_id),
            idx == cursor.question,
            cursor.option,
        );
        y += height;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_everything_fits() {
        assert_eq!(first_visible_question(&[3, 3, 8, 3], 2, 40), 0);
    }

    #[test]
    fn test_scrolls_to_keep_active_visible() {
        // 3 + 3 + 8 = 14 > 12, so the first question is dropped
        assert_eq!(first_visible_question(&[3, 3, 8, 3], 2, 12), 1);
        assert_eq!(first_visible_question(&[3, 3, 3, 8], 3, 8), 3);
    }

    #[test]
    fn test_empty_and_out_of_range() {
        assert_eq!(first_visible_question(&[], 0, 10), 0);
        assert_eq!(first_visible_question(&[3, 3], 5, 3), 1);
    }
}
