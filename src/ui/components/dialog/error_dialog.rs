//! Error dialog for failures outside the survey flow

use super::base::Dialog;
use ratatui::{style::Color, style::Style, Frame};

pub fn render_error_dialog(frame: &mut Frame, error_message: &str) {
    Dialog::new("Error", Color::Red)
        .text(error_message, Style::default())
        .key("Enter", "dismiss", true)
        .render(frame);
}
