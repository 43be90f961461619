// src/models/assessment.rs

use serde::{Deserialize, Serialize};

/// An assessment with its question list resolved, as returned by the
/// `full` endpoint. Loaded once per attempt and read-only afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentFull {
    pub id: i64,
    pub name: String,
    pub description: String,

    /// Attempt duration. The countdown starts at `duration_minutes * 60`.
    pub duration_minutes: u64,

    /// The database config the whole assessment targets. `None` means no
    /// live schema is attached (schema explorer stays empty).
    pub db_config: Option<i64>,

    /// Ordered question list.
    pub questions_data: Vec<Question>,
}

/// One authored question. `solution_query` is only populated on
/// authoring-side responses; participant-facing payloads leave it empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub title: String,

    /// Natural-language prompt shown to the participant.
    pub prompt: String,

    pub difficulty: Difficulty,

    #[serde(default)]
    pub solution_query: String,

    #[serde(default)]
    pub expected_schema_ref: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

