// src/models/submission.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

use crate::models::component::ActivityKind;

/// Lifecycle of a submission record, derived from its flags.
/// `Scored` is terminal for quizzes/exercises in this core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    NotStarted,
    Submitted,
    Scored,
}

/// Represents the 'submission_records' table in the database.
///
/// One live record per (student, component), enforced by a unique index.
/// `score` is the raw correct-answer count, not a percentage, and is
/// written only by the scorer after the initial unscored insert.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub id: i64,
    pub student_id: i64,
    pub component_id: i64,
    pub kind: ActivityKind,
    pub score: i64,
    /// True once the scorer has run.
    pub status: bool,
    pub is_submitted: bool,
    pub is_graded: bool,
    pub is_passed: bool,
    pub is_viewed: bool,
    pub view_count: i64,
    pub submitted_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl SubmissionRecord {
    /// Collapses the legacy boolean flags into one explicit state.
    pub fn state(&self) -> SubmissionState {
        if self.status {
            SubmissionState::Scored
        } else if self.is_submitted {
            SubmissionState::Submitted
        } else {
            SubmissionState::NotStarted
        }
    }
}

/// Represents the 'submit_answers' table in the database.
/// One immutable row per answered question.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct SubmitAnswer {
    pub id: i64,
    pub submission_id: i64,
    pub question_id: i64,
    pub option_id: i64,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// DTO for creating the initial unscored submission record.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSubmissionRequest {
    #[validate(range(min = 1))]
    pub student_id: i64,
    #[validate(range(min = 1))]
    pub component_id: i64,
}

/// One answer in a submit-answers request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerInput {
    pub question_id: i64,
    pub option_id: i64,
}

/// DTO for recording a student's answers against a submission.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitAnswersRequest {
    #[validate(range(min = 1))]
    pub student_id: i64,
    #[validate(length(min = 1))]
    pub answers: Vec<AnswerInput>,
}

/// DTO naming the caller for score/view operations; identity itself is
/// issued by the external auth layer.
#[derive(Debug, Deserialize, Validate)]
pub struct StudentRequest {
    #[validate(range(min = 1))]
    pub student_id: i64,
}

/// Response wrapper exposing the normalized state next to the raw record.
#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    #[serde(flatten)]
    pub record: SubmissionRecord,
    pub state: SubmissionState,
}

impl From<SubmissionRecord> for SubmissionResponse {
    fn from(record: SubmissionRecord) -> Self {
        let state = record.state();
        SubmissionResponse { record, state }
    }
}
