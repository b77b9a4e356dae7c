//! Dialog components for TUI

mod base;
mod error_dialog;

pub use base::Dialog;
pub use error_dialog::render_error_dialog;
