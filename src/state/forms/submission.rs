//! Submission payload assembly

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::cascade::Level;
use super::field::{AnswerState, AnswerValue};
use crate::error::ValidationError;

/// Answer keys that never travel in the answer list
const CONTACT_KEYS: &[&str] = &["mobile", "mobile_number"];

/// Required length of a verified contact number
pub const CONTACT_LEN: usize = 10;

/// One non-location answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedAnswer {
    pub question_id: String,
    pub value: AnswerValue,
}

/// Outbound survey response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    pub district: i64,
    pub division: i64,
    pub mandal: i64,
    pub village: i64,
    pub mobile_number: String,
    pub answers: Vec<SubmittedAnswer>,
}

/// Acknowledgement returned for an accepted response.
///
/// `created_at` is kept as sent; the server may omit the offset, and a
/// timestamp that fails to parse must not turn an accepted response into a
/// failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub reference_id: String,
    #[serde(default)]
    pub created_at: String,
}

impl SubmissionReceipt {
    /// `created_at` as a wall-clock time, with or without an offset
    pub fn recorded_at(&self) -> Option<NaiveDateTime> {
        let raw = self.created_at.trim();
        DateTime::parse_from_rfc3339(raw)
            .map(|t| t.naive_utc())
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
            .ok()
    }
}

/// Whether `number` is exactly ten ASCII digits
pub fn is_valid_contact(number: &str) -> bool {
    number.len() == CONTACT_LEN && number.bytes().all(|b| b.is_ascii_digit())
}

/// Build the payload from the final answers and a verified contact number
pub fn build(
    answers: &AnswerState,
    verified_contact: &str,
) -> Result<SubmissionPayload, ValidationError> {
    let [district, division, mandal, village] = Level::ALL.map(|level| level_id(answers, level));
    let (district, division, mandal, village) = (district?, division?, mandal?, village?);

    if !is_valid_contact(verified_contact) {
        return Err(ValidationError::InvalidContact);
    }

    let answers = answers
        .iter()
        .filter(|(id, _)| {
            Level::from_field_id(id).is_none() && !CONTACT_KEYS.contains(&id.as_str())
        })
        .map(|(id, value)| SubmittedAnswer {
            question_id: id.clone(),
            value: value.clone(),
        })
        .collect();

    Ok(SubmissionPayload {
        district,
        division,
        mandal,
        village,
        mobile_number: verified_contact.to_string(),
        answers,
    })
}

fn level_id(answers: &AnswerState, level: Level) -> Result<i64, ValidationError> {
    let value = match answers.get(level.field_id()) {
        None => return Err(ValidationError::MissingLevel(level)),
        Some(value) if value.is_empty() => return Err(ValidationError::MissingLevel(level)),
        Some(value) => value,
    };

    value
        .as_single()
        .and_then(|v| v.trim().parse::<i64>().ok())
        .ok_or_else(|| ValidationError::InvalidLevel {
            level,
            value: value.codes().join(","),
        })
}
