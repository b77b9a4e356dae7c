//! Front-end cursor state

use std::collections::VecDeque;

/// Which question and option the cursor rests on within the current step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldCursor {
    pub question: usize,
    pub option: usize,
}

/// UI state that is not part of the survey itself
#[derive(Debug, Default)]
pub struct AppState {
    pub cursor: FieldCursor,
    /// Step index the cursor belongs to; a different step resets the cursor
    pub cursor_step: Option<usize>,
    pub scroll_offset: usize,
    /// Transient feedback shown in the status bar
    pub status_message: Option<String>,
    errors: VecDeque<String>,
}

impl AppState {
    /// Keep the cursor within `question_count` questions on step `step`
    pub fn sync_cursor(&mut self, step: Option<usize>, question_count: usize) {
        if self.cursor_step != step {
            self.cursor_step = step;
            self.cursor = FieldCursor::default();
            self.scroll_offset = 0;
            return;
        }
        if question_count == 0 {
            self.cursor = FieldCursor::default();
        } else if self.cursor.question >= question_count {
            self.cursor = FieldCursor {
                question: question_count - 1,
                option: 0,
            };
        }
    }

    pub fn next_question(&mut self, question_count: usize) {
        if question_count > 0 && self.cursor.question < question_count - 1 {
            self.cursor.question += 1;
            self.cursor.option = 0;
        }
    }

    pub fn prev_question(&mut self) {
        if self.cursor.question > 0 {
            self.cursor.question -= 1;
            self.cursor.option = 0;
        }
    }

    pub fn next_option(&mut self, option_count: usize) {
        if option_count > 0 && self.cursor.option < option_count - 1 {
            self.cursor.option += 1;
        }
    }

    pub fn prev_option(&mut self) {
        self.cursor.option = self.cursor.option.saturating_sub(1);
    }

    pub fn reset_cursor(&mut self) {
        self.cursor = FieldCursor::default();
        self.cursor_step = None;
        self.scroll_offset = 0;
    }

    pub fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    /// Queue a message for the modal error dialog
    pub fn push_error(&mut self, message: String) {
        self.errors.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }
}
