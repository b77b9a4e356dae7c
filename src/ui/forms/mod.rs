//! Form rendering module
//!
//! - `field_renderer`: question and option rendering

mod field_renderer;

pub use field_renderer::{draw_help_text, draw_question, question_height};
