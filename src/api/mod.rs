// src/api/mod.rs

pub mod http;

pub use http::HttpApi;

use async_trait::async_trait;

use crate::error::ApiError;
use crate::models::assessment::AssessmentFull;
use crate::models::attempt::{Assignment, Attempt};
use crate::models::query::{FinalizeResult, QueryResult, SubmitResult, ValidationResult};
use crate::models::schema::SchemaMetadata;

/// The backend operations the attempt runtime consumes.
///
/// The runtime is generic over this trait so tests can substitute an
/// in-memory backend; `HttpApi` is the production implementation.
#[async_trait]
pub trait QueryBenchApi: Send + Sync {
    /// Creates (or resumes) the attempt for an assignment.
    async fn start_attempt(&self, assignment_id: i64) -> Result<Attempt, ApiError>;

    /// Fetches the assignment record, used to resolve the assessment id.
    async fn get_assignment(&self, assignment_id: i64) -> Result<Assignment, ApiError>;

    /// Fetches an assessment with its questions resolved.
    async fn get_assessment_full(&self, assessment_id: i64) -> Result<AssessmentFull, ApiError>;

    /// Fetches the table/column catalog of a database config.
    async fn get_schema(&self, config_id: i64) -> Result<SchemaMetadata, ApiError>;

    /// Executes a query against the target database.
    ///
    /// A query the backend rejected still comes back as `Ok` with the
    /// `error` field populated; `Err` means the call itself failed.
    async fn run_query(&self, query: &str, config_id: Option<i64>)
    -> Result<QueryResult, ApiError>;

    /// Compares a query's result set against the question's solution.
    async fn validate_query(
        &self,
        query: &str,
        question_id: i64,
        config_id: Option<i64>,
    ) -> Result<ValidationResult, ApiError>;

    /// Records one question's answer on an attempt.
    async fn submit_answer(
        &self,
        attempt_id: i64,
        question_id: i64,
        query: &str,
    ) -> Result<SubmitResult, ApiError>;

    /// Closes the attempt and returns the scored summary.
    async fn finalize_attempt(&self, attempt_id: i64) -> Result<FinalizeResult, ApiError>;
}
