// src/models/course_module.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

/// Represents the 'course_modules' table in the database.
///
/// A module belongs to exactly one course. The `active` flag is a
/// soft-delete: inactive modules are excluded from progress aggregation.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct CourseModule {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub position: i32,
    pub active: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}
