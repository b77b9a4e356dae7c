//! Form domain layer
//!
//! Pure, synchronous survey form logic: answer values, visibility,
//! step navigation, the location cascade, the answer store and
//! submission assembly. Nothing here performs I/O.

mod cascade;
mod field;
mod form_state;
mod navigator;
pub mod submission;
mod visibility;

pub use cascade::{ChoiceOutcome, ChoiceRequest, Level};
pub use field::{AnswerState, AnswerValue};
pub use form_state::FormStore;
pub use navigator::{Advance, Retreat, StepNavigator};
pub use submission::{SubmissionPayload, SubmissionReceipt};
pub use visibility::visible_questions;
