// src/models/progress.rs

use serde::Serialize;

use crate::models::{
    component::ActivityKind,
    course::Course,
    submission::SubmissionState,
};

/// Per-component slice of the progress response.
#[derive(Debug, Serialize)]
pub struct ComponentProgress {
    pub id: i64,
    pub title: String,
    pub kind: ActivityKind,
    /// True when the completion predicate for this kind holds.
    pub complete: bool,
    pub state: SubmissionState,
    pub status: bool,
    pub score: Option<i64>,
    pub submitted_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Serialize)]
pub struct SectionProgress {
    pub id: i64,
    pub title: String,
    pub kind: ActivityKind,
    pub components: Vec<ComponentProgress>,
}

#[derive(Debug, Serialize)]
pub struct ModuleProgress {
    pub id: i64,
    pub title: String,
    /// All-or-nothing: true only if the module has components and every
    /// one of them is complete.
    pub complete: bool,
    pub sections: Vec<SectionProgress>,
}

/// Course-level rollup: raw counts plus a rounded percentage.
#[derive(Debug, Serialize)]
pub struct ProgressSummary {
    pub percentage: i64,
    pub completed: i64,
    pub total: i64,
}

/// Full response for the progress query.
#[derive(Debug, Serialize)]
pub struct CourseProgressResponse {
    pub course: Course,
    pub progress: ProgressSummary,
    pub modules: Vec<ModuleProgress>,
}
