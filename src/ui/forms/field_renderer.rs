//! Question rendering for the survey steps

use crate::state::{AnswerValue, ChoiceOption, InputKind, Question};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Options listed at once for the focused question
pub const MAX_VISIBLE_OPTIONS: usize = 6;

/// Rows a question occupies: a summary line when idle, an option list when focused
pub fn question_height(option_count: usize, is_active: bool) -> u16 {
    let body = if is_active {
        option_count.clamp(1, MAX_VISIBLE_OPTIONS)
    } else {
        1
    };
    body as u16 + 2
}

/// First option row to show so `cursor` stays inside the window
pub fn option_window_start(option_count: usize, cursor: usize) -> usize {
    if option_count <= MAX_VISIBLE_OPTIONS {
        return 0;
    }
    cursor
        .saturating_sub(MAX_VISIBLE_OPTIONS - 1)
        .min(option_count - MAX_VISIBLE_OPTIONS)
}

/// Marker for an option: radio style for single answers, box style for lists
fn marker(kind: InputKind, selected: bool) -> &'static str {
    match (kind.is_multi(), selected) {
        (true, true) => "[x]",
        (true, false) => "[ ]",
        (false, true) => "(•)",
        (false, false) => "( )",
    }
}

/// Option labels for the current answer, joined for display
fn answer_summary(options: &[ChoiceOption], answer: Option<&AnswerValue>) -> String {
    let Some(answer) = answer.filter(|a| !a.is_empty()) else {
        return String::new();
    };
    answer
        .codes()
        .into_iter()
        .map(|code| {
            options
                .iter()
                .find(|o| o.code == code)
                .map(|o| o.label.as_str())
                .unwrap_or(code)
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Draw one question with its options
pub fn draw_question(
    frame: &mut Frame,
    area: Rect,
    question: &Question,
    options: &[ChoiceOption],
    answer: Option<&AnswerValue>,
    is_active: bool,
    option_cursor: usize,
) {
    let border_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let title = if question.required {
        format!(" {} * ", question.label)
    } else {
        format!(" {} ", question.label)
    };

    let lines: Vec<Line> = if !is_active {
        let summary = answer_summary(options, answer);
        if summary.is_empty() {
            vec![Line::from(Span::styled(
                "(not answered)",
                Style::default().fg(Color::DarkGray),
            ))]
        } else {
            vec![Line::from(summary)]
        }
    } else if options.is_empty() {
        vec![Line::from(Span::styled(
            "No options available",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        let start = option_window_start(options.len(), option_cursor);
        options
            .iter()
            .enumerate()
            .skip(start)
            .take(MAX_VISIBLE_OPTIONS)
            .map(|(idx, option)| {
                let selected = answer.is_some_and(|a| a.contains(&option.code));
                let style = if idx == option_cursor {
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else if selected {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default()
                };
                Line::from(vec![
                    Span::styled(format!("{} ", marker(question.input_type, selected)), style),
                    Span::styled(option.label.as_str(), style),
                ])
            })
            .collect()
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Draw a help line (keyboard hints)
pub fn draw_help_text(frame: &mut Frame, area: Rect, text: &str) {
    let help = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_question_height() {
        assert_eq!(question_height(20, false), 3);
        assert_eq!(question_height(0, true), 3);
        assert_eq!(question_height(3, true), 5);
        assert_eq!(question_height(40, true), MAX_VISIBLE_OPTIONS as u16 + 2);
    }

    #[test]
    fn test_option_window_follows_cursor() {
        assert_eq!(option_window_start(4, 3), 0);
        assert_eq!(option_window_start(20, 2), 0);
        assert_eq!(option_window_start(20, 8), 3);
        assert_eq!(option_window_start(20, 19), 14);
    }

    #[test]
    fn test_answer_summary_uses_labels() {
        let options = vec![ChoiceOption::new("p", "Paddy"), ChoiceOption::new("c", "Cotton")];
        let answer = AnswerValue::multi(["c", "x"]);
        assert_eq!(answer_summary(&options, Some(&answer)), "Cotton, x");
        assert_eq!(answer_summary(&options, None), "");
    }

    #[test]
    fn test_markers() {
        assert_eq!(marker(InputKind::MultiSelectChip, true), "[x]");
        assert_eq!(marker(InputKind::SingleSelect, false), "( )");
    }
}
