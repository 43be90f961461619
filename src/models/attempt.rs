// src/models/attempt.rs

use serde::{Deserialize, Serialize};

/// One participant's timed run through an assessment.
/// Created by the backend when an assignment is started; immutable here
/// once `submitted_at` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attempt {
    pub id: i64,

    /// The assignment this attempt belongs to.
    pub assignment: i64,

    pub started_at: chrono::DateTime<chrono::Utc>,

    /// Set by the backend on finalize.
    pub submitted_at: Option<chrono::DateTime<chrono::Utc>>,

    /// Computed server-side after finalize; never written by the client.
    pub score: Option<f64>,
}

/// The link between a participant and an assessment. The attempt start
/// flow resolves the assessment id through this record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    pub id: i64,
    pub assessment: i64,
    pub status: AssignmentStatus,
    pub due_date: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssignmentStatus {
    Pending,
    InProgress,
    Completed,
    Expired,
}
