//! Survey backend access over HTTP

mod client;
mod traits;

use std::sync::Arc;

pub use client::{ApiError, SurveyApiClient};
pub use traits::{ChoiceProvider, MobileCheckSink, SchemaProvider, SubmissionSink};

#[cfg(test)]
pub use traits::{MockChoiceProvider, MockMobileCheckSink, MockSchemaProvider, MockSubmissionSink};

/// The four collaborators the app runs effects against
#[derive(Clone)]
pub struct Backend {
    pub schema: Arc<dyn SchemaProvider>,
    pub choices: Arc<dyn ChoiceProvider>,
    pub mobile: Arc<dyn MobileCheckSink>,
    pub submissions: Arc<dyn SubmissionSink>,
}

impl Backend {
    /// Every collaborator backed by one HTTP client
    pub fn http(client: SurveyApiClient) -> Self {
        let client = Arc::new(client);
        Self {
            schema: client.clone(),
            choices: client.clone(),
            mobile: client.clone(),
            submissions: client,
        }
    }
}
