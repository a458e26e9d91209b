// src/models/component.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

/// Activity type shared by sections, components and submission records.
/// Stored as lowercase TEXT in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Quiz,
    Assignment,
    Exercise,
    Lesson,
}

impl ActivityKind {
    /// Quizzes and exercises carry questions and can be delivered/scored.
    pub fn is_assessment(&self) -> bool {
        matches!(self, ActivityKind::Quiz | ActivityKind::Exercise)
    }
}

/// Represents the 'components' table in the database.
///
/// A component is one concrete activity inside a section and shares the
/// section's kind. `pass_threshold` is a raw correct-answer count; the
/// scorer never applies it, threshold comparisons happen in grading flows.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Component {
    pub id: i64,
    pub section_id: i64,
    pub title: String,
    pub kind: ActivityKind,
    pub pass_threshold: Option<i64>,
    pub position: i32,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}
