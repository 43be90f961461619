// src/models/query.rs

use serde::{Deserialize, Serialize};

/// Result of running a query against the target database.
///
/// `error` is mutually exclusive with populated `columns`/`rows`: an
/// error result carries empty sequences, a success result has
/// `rows[i].len() == columns.len()` for every row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<serde_json::Value>>,
    pub execution_time_ms: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl QueryResult {
    /// Builds a local error result, used when a query never reaches the
    /// backend (empty draft, transport failure).
    pub fn from_error(message: impl Into<String>) -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
            execution_time_ms: 0.0,
            error: Some(message.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Checks the error/shape invariant documented on the struct.
    pub fn is_well_formed(&self) -> bool {
        match &self.error {
            Some(_) => self.columns.is_empty() && self.rows.is_empty(),
            None => self.rows.iter().all(|row| row.len() == self.columns.len()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationStatus {
    Correct,
    Incorrect,
    Error,
}

/// Verdict of comparing a participant query against the stored solution.
/// Only produced when execution itself succeeded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub status: ValidationStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_metadata: Option<ExecutionMetadata>,
}

impl ValidationResult {
    /// The degraded result shown when the validation endpoint is
    /// unreachable but the query itself executed fine.
    pub fn unavailable() -> Self {
        Self {
            status: ValidationStatus::Error,
            feedback: Some(
                "Real-time validation unavailable. Your query has executed successfully."
                    .to_string(),
            ),
            execution_metadata: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionMetadata {
    pub duration_ms: f64,
    pub rows_returned: u64,
}

/// Per-question answer acknowledgement returned by `submit_answer`.
/// Same wire shape as `ValidationResult`.
pub type SubmitResult = ValidationResult;

/// Attempt summary returned by the finalize endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalizeResult {
    pub score: f64,
    pub correct: u32,
    pub total: u32,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}
