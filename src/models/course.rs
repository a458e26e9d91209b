// src/models/course.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

/// Represents the 'courses' table in the database.
/// Root of the content hierarchy: Course -> Module -> Section -> Component.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub teacher_id: i64,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}
