//! UI module for rendering the TUI

mod components;
mod disclaimer;
mod forms;
mod layout;
mod mobile;
mod outcome;
mod review;
mod survey;
mod text;

use crate::app::App;
use crate::state::FlowState;
use components::render_error_dialog;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (header, content, status) = layout::create_layout(frame.area());

    layout::draw_header(frame, header, app);

    match app.flow.state() {
        FlowState::Disclaimer => disclaimer::draw(frame, content, app),
        FlowState::MobileCheck => mobile::draw(frame, content, app),
        FlowState::Stepping => survey::draw(frame, content, app),
        FlowState::Review => review::draw(frame, content, app),
        FlowState::Consent => {
            review::draw(frame, content, app);
            review::draw_consent(frame, app);
        }
        FlowState::Submitting => outcome::draw_submitting(frame, content, app),
        FlowState::Thanked => outcome::draw_thanked(frame, content, app),
        FlowState::AlreadySubmitted => outcome::draw_already_submitted(frame, content, app),
    }

    layout::draw_status_bar(frame, status, app);

    if let Some(message) = app.state.current_error() {
        render_error_dialog(frame, message);
    }
}
