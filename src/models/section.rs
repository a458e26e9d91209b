// src/models/section.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

use crate::models::component::ActivityKind;

/// Represents the 'sections' table in the database.
///
/// A section belongs to exactly one module and owns zero or more
/// components of its own kind.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Section {
    pub id: i64,
    pub module_id: i64,
    pub title: String,
    pub kind: ActivityKind,
    pub position: i32,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}
