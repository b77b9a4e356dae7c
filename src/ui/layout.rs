//! Layout components (header, status bar)

use super::text::ui_text;
use crate::app::App;
use crate::state::{FlowState, SchemaStatus};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split the screen into header, content and status bar
pub fn create_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2])
}

/// Center a `width` x `height` box in `area`
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Draw the title line with the active language
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let language = app.flow.language();
    let text = ui_text(language);

    let left = Line::from(vec![
        Span::styled(
            format!(" {} ", text.app_title),
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("· {}", app.flow.state().label()),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(left), area);

    let lang = format!(
        " [{}] ^T:{} ",
        language.code().to_uppercase(),
        language.toggle().label()
    );
    let width = lang.chars().count() as u16;
    let lang_area = Rect {
        x: area.x + area.width.saturating_sub(width),
        y: area.y,
        width: width.min(area.width),
        height: 1,
    };
    frame.render_widget(
        Paragraph::new(lang).style(Style::default().fg(Color::Cyan)),
        lang_area,
    );
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        format!(" {} ", get_state_hints(app)),
        Style::default().fg(Color::Gray),
    )];

    if let Some(notice) = app.flow.notice() {
        spans.push(Span::raw("| "));
        spans.push(Span::styled(
            notice.to_string(),
            Style::default().fg(Color::Red),
        ));
    } else if let Some(msg) = &app.state.status_message {
        spans.push(Span::raw("| "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Yellow)));
    }

    let quit_hint = " ^C:quit ";

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    let quit_area = Rect {
        x: area.x + area.width.saturating_sub(quit_hint.len() as u16),
        y: area.y,
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the current flow state
fn get_state_hints(app: &App) -> &'static str {
    match app.flow.state() {
        FlowState::Disclaimer => "Enter:accept  q:quit",
        FlowState::MobileCheck => "0-9:type  Backspace:delete",
        FlowState::Stepping => match app.flow.schema_status() {
            SchemaStatus::Loading => "Loading...",
            SchemaStatus::Failed(_) => "r:retry",
            SchemaStatus::Ready => {
                "j/k:question  h/l:option  Space:select  Enter:next  Esc:back  ^R:reset"
            }
        },
        FlowState::Review => "j/k:scroll  Enter:continue  e:edit  ^R:reset",
        FlowState::Consent => "Space:agree  Enter:submit  Esc:cancel",
        FlowState::Submitting => "Submitting...",
        FlowState::Thanked => "c:copy reference  q:quit",
        FlowState::AlreadySubmitted => "Enter:try different number  q:quit",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_create_layout_reserves_header_and_status() {
        let (header, content, status) = create_layout(Rect::new(0, 0, 80, 24));
        assert_eq!(header, Rect::new(0, 0, 80, 1));
        assert_eq!(content, Rect::new(0, 1, 80, 22));
        assert_eq!(status, Rect::new(0, 23, 80, 1));
    }

    #[test]
    fn test_centered_clamps_to_area() {
        assert_eq!(
            centered(Rect::new(0, 0, 80, 24), 40, 10),
            Rect::new(20, 7, 40, 10)
        );
        assert_eq!(
            centered(Rect::new(2, 2, 10, 5), 40, 10),
            Rect::new(2, 2, 10, 5)
        );
    }
}
