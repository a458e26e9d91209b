// src/handlers/progress.rs

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::{
    error::AppError, handlers::require_valid_id, services::progress, state::AppState,
};

/// Returns a student's full progress for one course.
///
/// Recomputed from the content tree on every request; the response nests
/// modules -> sections -> components with per-component completion and the
/// course-level summary.
pub async fn course_progress(
    State(state): State<AppState>,
    Path((course_id, student_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, AppError> {
    require_valid_id(course_id, "course")?;
    require_valid_id(student_id, "student")?;

    let response = progress::course_progress(state.store.as_ref(), course_id, student_id).await?;

    Ok(Json(response))
}
