// src/models/question.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

/// Represents the 'questions' table in the database.
/// Belongs to exactly one quiz/exercise component; `position` preserves
/// stable creation order.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub assessment_id: i64,
    pub content: String,
    pub position: i32,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Represents the 'answer_options' table in the database.
/// `is_correct` is immutable ground truth, never derived.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct AnswerOption {
    pub id: i64,
    pub question_id: i64,
    pub content: String,
    pub is_correct: bool,
    pub position: i32,
}

/// DTO for delivering an option to the client (excludes `is_correct`).
#[derive(Debug, Serialize)]
pub struct PublicOption {
    pub id: i64,
    pub content: String,
}

impl From<AnswerOption> for PublicOption {
    fn from(opt: AnswerOption) -> Self {
        PublicOption {
            id: opt.id,
            content: opt.content,
        }
    }
}

/// One delivered question with its (possibly shuffled) options.
#[derive(Debug, Serialize)]
pub struct DeliveredQuestion {
    pub id: i64,
    pub content: String,
    pub options: Vec<PublicOption>,
}

/// Response body for assessment paper delivery.
#[derive(Debug, Serialize)]
pub struct PaperResponse {
    pub questions: Vec<DeliveredQuestion>,
    pub count: usize,
}

/// Query flags for paper delivery. Both default to true.
#[derive(Debug, Deserialize)]
pub struct ShuffleParams {
    #[serde(default = "default_true")]
    pub shuffle_questions: bool,
    #[serde(default = "default_true")]
    pub shuffle_options: bool,
}

fn default_true() -> bool {
    true
}
