//! Collaborator traits for the survey backend, mockable in tests

use crate::state::{ChoiceOption, Language, Level, Step, SubmissionPayload, SubmissionReceipt};
use anyhow::Result;
use async_trait::async_trait;

/// Supplies the server-side survey steps
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SchemaProvider: Send + Sync {
    /// Fetch the ordered steps for `language`, without the location step
    async fn fetch_schema(&self, language: Language) -> Result<Vec<Step>>;
}

/// Supplies the options of one location level
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChoiceProvider: Send + Sync {
    /// Options of `level` under `parent`; `parent` is `None` only for districts
    async fn fetch_choices(
        &self,
        level: Level,
        parent: Option<String>,
        language: Language,
    ) -> Result<Vec<ChoiceOption>>;
}

/// Answers whether a contact number already has a response
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MobileCheckSink: Send + Sync {
    async fn check_mobile(&self, number: &str) -> Result<bool>;
}

/// Accepts finished responses
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    async fn submit(&self, payload: SubmissionPayload) -> Result<SubmissionReceipt>;
}
