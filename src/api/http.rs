// src/api/http.rs

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use url::Url;

use crate::api::QueryBenchApi;
use crate::config::Config;
use crate::error::ApiError;
use crate::models::assessment::AssessmentFull;
use crate::models::attempt::{Assignment, Attempt};
use crate::models::query::{FinalizeResult, QueryResult, SubmitResult, ValidationResult};
use crate::models::schema::SchemaMetadata;

/// Production `QueryBenchApi` implementation over HTTP.
///
/// Authentication rides on the session cookie: the reqwest cookie store
/// keeps whatever cookie the login flow set on this client.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: Url) -> Self {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api_base_url.clone())
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.client.get(self.endpoint(path)).send().await?;
        Self::decode(response).await
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, ApiError> {
        let response = self
            .client
            .post(self.endpoint(path))
            .json(body)
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Maps a response to the expected payload, extracting the backend's
    /// `error`/`detail` message from non-success bodies.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<serde_json::Value>().await {
                Ok(body) => body
                    .get("error")
                    .or_else(|| body.get("detail"))
                    .and_then(|v| v.as_str())
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("Request failed ({})", status.as_u16())),
                Err(_) => format!("Request failed ({})", status.as_u16()),
            };
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl QueryBenchApi for HttpApi {
    async fn start_attempt(&self, assignment_id: i64) -> Result<Attempt, ApiError> {
        self.post_json(
            &format!("/assignments/{}/start_attempt/", assignment_id),
            &serde_json::json!({}),
        )
        .await
    }

    async fn get_assignment(&self, assignment_id: i64) -> Result<Assignment, ApiError> {
        self.get_json(&format!("/assignments/{}/", assignment_id))
            .await
    }

    async fn get_assessment_full(&self, assessment_id: i64) -> Result<AssessmentFull, ApiError> {
        self.get_json(&format!("/assessments/{}/full/", assessment_id))
            .await
    }

    async fn get_schema(&self, config_id: i64) -> Result<SchemaMetadata, ApiError> {
        self.get_json(&format!("/schema/?config_id={}", config_id))
            .await
    }

    async fn run_query(
        &self,
        query: &str,
        config_id: Option<i64>,
    ) -> Result<QueryResult, ApiError> {
        let mut body = serde_json::json!({ "query": query });
        if let Some(config_id) = config_id {
            body["config_id"] = serde_json::json!(config_id);
        }
        self.post_json("/attempts/run_query/", &body).await
    }

    async fn validate_query(
        &self,
        query: &str,
        question_id: i64,
        config_id: Option<i64>,
    ) -> Result<ValidationResult, ApiError> {
        let mut body = serde_json::json!({ "query": query, "question_id": question_id });
        if let Some(config_id) = config_id {
            body["config_id"] = serde_json::json!(config_id);
        }
        self.post_json("/attempts/validate_query/", &body).await
    }

    async fn submit_answer(
        &self,
        attempt_id: i64,
        question_id: i64,
        query: &str,
    ) -> Result<SubmitResult, ApiError> {
        self.post_json(
            &format!("/attempts/{}/submit_answer/", attempt_id),
            &serde_json::json!({ "question_id": question_id, "query": query }),
        )
        .await
    }

    async fn finalize_attempt(&self, attempt_id: i64) -> Result<FinalizeResult, ApiError> {
        self.post_json(
            &format!("/attempts/{}/finalize/", attempt_id),
            &serde_json::json!({}),
        )
        .await
    }
}
