//! REST client for the survey backend
//!
//! Implements every collaborator trait over one `reqwest::Client`.

use super::traits::{ChoiceProvider, MobileCheckSink, SchemaProvider, SubmissionSink};
use crate::state::{ChoiceOption, Language, Level, Step, SubmissionPayload, SubmissionReceipt};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str = concat!("survey-tui/", env!("CARGO_PKG_VERSION"));

/// Transport failures
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Status(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Location list envelope
#[derive(Debug, Deserialize)]
struct LocationResponse {
    #[serde(default)]
    data: Vec<LocationItem>,
}

/// One location row; the name field differs per level
#[derive(Debug, Deserialize)]
struct LocationItem {
    id: i64,
    #[serde(alias = "division_name", alias = "mandal_name", alias = "village_name")]
    name: String,
}

impl From<LocationItem> for ChoiceOption {
    fn from(item: LocationItem) -> Self {
        ChoiceOption::new(item.id.to_string(), item.name)
    }
}

#[derive(Debug, Serialize)]
struct MobileCheckRequest<'a> {
    mobile_number: &'a str,
}

#[derive(Debug, Deserialize)]
struct MobileCheckResponse {
    exists: bool,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

/// HTTP client for the survey API
pub struct SurveyApiClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl SurveyApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn schema_request(&self, language: Language) -> reqwest::RequestBuilder {
        self.http_client
            .get(format!("{}/api/survey/schema/", self.base_url))
            .query(&[("lang", language.code())])
    }

    fn choices_request(
        &self,
        level: Level,
        parent: Option<&str>,
        language: Language,
    ) -> reqwest::RequestBuilder {
        let (path, parent_key) = location_endpoint(level);
        let mut query: Vec<(&str, &str)> = Vec::with_capacity(2);
        // A child level without a parent yields an empty list server-side
        if let (Some(key), Some(parent)) = (parent_key, parent) {
            query.push((key, parent));
        }
        query.push(("lang", language.code()));

        self.http_client
            .get(format!("{}/api/locations/{path}/", self.base_url))
            .query(&query)
    }

    async fn send_json<T: DeserializeOwned>(request: reqwest::RequestBuilder) -> Result<T, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        tracing::debug!(url = %response.url(), status = %response.status(), "response");
        Self::decode(response).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = self
            .http_client
            .post(format!("{}{path}", self.base_url))
            .json(body);
        Self::send_json(request).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status(status.as_u16(), error_message(&body, status)));
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}

/// Path segment and parent query key for a location level
fn location_endpoint(level: Level) -> (&'static str, Option<&'static str>) {
    match level {
        Level::District => ("districts", None),
        Level::Division => ("divisions", Some("district_id")),
        Level::Mandal => ("mandals", Some("division_id")),
        Level::Village => ("villages", Some("mandal_id")),
    }
}

/// The server's `detail` when present, otherwise the raw body or status reason
fn error_message(body: &str, status: reqwest::StatusCode) -> String {
    if let Ok(err) = serde_json::from_str::<ErrorBody>(body) {
        return err.detail;
    }
    if !body.trim().is_empty() {
        return body.trim().to_string();
    }
    status.canonical_reason().unwrap_or("request failed").to_string()
}

#[async_trait]
impl SchemaProvider for SurveyApiClient {
    async fn fetch_schema(&self, language: Language) -> anyhow::Result<Vec<Step>> {
        let steps: Vec<Step> = Self::send_json(self.schema_request(language)).await?;
        tracing::info!(steps = steps.len(), lang = language.code(), "fetched survey schema");
        Ok(steps)
    }
}

#[async_trait]
impl ChoiceProvider for SurveyApiClient {
    async fn fetch_choices(
        &self,
        level: Level,
        parent: Option<String>,
        language: Language,
    ) -> anyhow::Result<Vec<ChoiceOption>> {
        let request = self.choices_request(level, parent.as_deref(), language);
        let response: LocationResponse = Self::send_json(request).await?;
        tracing::debug!(%level, count = response.data.len(), "fetched location options");
        Ok(response.data.into_iter().map(ChoiceOption::from).collect())
    }
}

#[async_trait]
impl MobileCheckSink for SurveyApiClient {
    async fn check_mobile(&self, number: &str) -> anyhow::Result<bool> {
        let response: MobileCheckResponse = self
            .post_json("/api/survey/check-mobile/", &MobileCheckRequest {
                mobile_number: number,
            })
            .await?;
        tracing::debug!(exists = response.exists, message = %response.message, "mobile check");
        Ok(response.exists)
    }
}

#[async_trait]
impl SubmissionSink for SurveyApiClient {
    async fn submit(&self, payload: SubmissionPayload) -> anyhow::Result<SubmissionReceipt> {
        let receipt: SubmissionReceipt = self.post_json("/api/survey/submit/", &payload).await?;
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn client() -> SurveyApiClient {
        SurveyApiClient::new("http://localhost:8000/", Duration::from_secs(5)).unwrap()
    }

    mod urls {
        use super::*;
        use pretty_assertions::assert_eq;

        fn url(request: reqwest::RequestBuilder) -> String {
            request.build().unwrap().url().to_string()
        }

        #[test]
        fn test_schema_url() {
            assert_eq!(
                url(client().schema_request(Language::Te)),
                "http://localhost:8000/api/survey/schema/?lang=te"
            );
        }

        #[test]
        fn test_choice_urls_per_level() {
            let c = client();
            assert_eq!(
                url(c.choices_request(Level::District, None, Language::En)),
                "http://localhost:8000/api/locations/districts/?lang=en"
            );
            assert_eq!(
                url(c.choices_request(Level::Division, Some("3"), Language::En)),
                "http://localhost:8000/api/locations/divisions/?district_id=3&lang=en"
            );
            assert_eq!(
                url(c.choices_request(Level::Mandal, Some("7"), Language::Te)),
                "http://localhost:8000/api/locations/mandals/?division_id=7&lang=te"
            );
            assert_eq!(
                url(c.choices_request(Level::Village, Some("11"), Language::En)),
                "http://localhost:8000/api/locations/villages/?mandal_id=11&lang=en"
            );
        }

        #[test]
        fn test_parent_id_is_encoded() {
            assert_eq!(
                url(client().choices_request(Level::Division, Some("3&lang=xx"), Language::En)),
                "http://localhost:8000/api/locations/divisions/?district_id=3%26lang%3Dxx&lang=en"
            );
        }

        #[test]
        fn test_child_without_parent_has_no_parent_key() {
            assert_eq!(
                url(client().choices_request(Level::Mandal, None, Language::En)),
                "http://localhost:8000/api/locations/mandals/?lang=en"
            );
        }
    }

    mod decoding {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_location_names_per_level() {
            let json = r#"{
                "data": [
                    {"id": 1, "name": "Guntur", "code": "GNT"},
                    {"id": 2, "division_code": "D2", "division_name": "Tenali"},
                    {"id": 3, "mandal_name": "Ponnur", "local_name": "x", "is_municipality": false},
                    {"id": 4, "village_code": "V4", "village_name": "Chebrolu", "local_name": "y"}
                ],
                "message": "ok"
            }"#;
            let parsed: LocationResponse = serde_json::from_str(json).unwrap();
            let options: Vec<ChoiceOption> = parsed.data.into_iter().map(Into::into).collect();

            assert_eq!(
                options,
                vec![
                    ChoiceOption::new("1", "Guntur"),
                    ChoiceOption::new("2", "Tenali"),
                    ChoiceOption::new("3", "Ponnur"),
                    ChoiceOption::new("4", "Chebrolu"),
                ]
            );
        }

        #[test]
        fn test_missing_data_is_empty() {
            let parsed: LocationResponse = serde_json::from_str(r#"{"message": "none"}"#).unwrap();
            assert!(parsed.data.is_empty());
        }

        #[test]
        fn test_mobile_check_response() {
            let parsed: MobileCheckResponse =
                serde_json::from_str(r#"{"exists": true, "message": "found"}"#).unwrap();
            assert!(parsed.exists);
        }

        #[test]
        fn test_receipt_response() {
            let receipt: SubmissionReceipt = serde_json::from_str(
                r#"{"reference_id": "WE-20250101-0001", "created_at": "2025-01-01T10:00:00Z"}"#,
            )
            .unwrap();
            assert_eq!(receipt.reference_id, "WE-20250101-0001");
        }

        #[test]
        fn test_receipt_without_offset_still_decodes() {
            let receipt: SubmissionReceipt = serde_json::from_str(
                r#"{"reference_id": "WE-1", "created_at": "2025-01-01T10:00:00.123456"}"#,
            )
            .unwrap();
            assert_eq!(receipt.reference_id, "WE-1");
            assert!(receipt.recorded_at().is_some());

            let bare: SubmissionReceipt =
                serde_json::from_str(r#"{"reference_id": "WE-2"}"#).unwrap();
            assert_eq!(bare.created_at, "");
        }
    }

    mod errors {
        use super::*;
        use pretty_assertions::assert_eq;
        use reqwest::StatusCode;

        #[test]
        fn test_detail_preferred() {
            assert_eq!(
                error_message(r#"{"detail": "Mobile number already used"}"#, StatusCode::BAD_REQUEST),
                "Mobile number already used"
            );
        }

        #[test]
        fn test_plain_body_used() {
            assert_eq!(
                error_message("upstream down", StatusCode::BAD_GATEWAY),
                "upstream down"
            );
        }

        #[test]
        fn test_empty_body_uses_reason() {
            assert_eq!(
                error_message("", StatusCode::INTERNAL_SERVER_ERROR),
                "Internal Server Error"
            );
        }

        #[test]
        fn test_status_error_display() {
            let err = ApiError::Status(400, "bad".into());
            assert_eq!(err.to_string(), "API error 400: bad");
        }
    }
}
