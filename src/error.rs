//! Error taxonomy surfaced to the user

use crate::state::Level;
use thiserror::Error;

/// Local shape check on the answers before anything is sent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingLevel(Level),

    #[error("{level} value {value:?} is not a valid identifier")]
    InvalidLevel { level: Level, value: String },

    #[error("mobile number must be exactly 10 digits")]
    InvalidContact,
}

/// Failures at the survey's boundaries, each mapped to a user-visible message
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurveyError {
    /// Blocks entering the questionnaire until retried
    #[error("Failed to load survey: {0}")]
    SchemaLoad(String),

    /// Non-fatal; stale or empty options remain
    #[error("Failed to load {level} options: {message}")]
    ChoiceLoad { level: Level, message: String },

    #[error("Failed to verify mobile number: {0}")]
    MobileCheck(String),

    #[error("Failed to submit survey: {0}")]
    Submission(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
