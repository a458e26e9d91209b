// src/handlers/submission.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    error::AppError,
    handlers::require_valid_id,
    models::{
        component::ActivityKind,
        submission::{
            CreateSubmissionRequest, StudentRequest, SubmissionResponse, SubmissionState,
            SubmitAnswersRequest,
        },
    },
    services::scorer,
    state::AppState,
};

/// Creates the initial unscored submission record for an activity.
///
/// A second create for the same (student, activity) pair is rejected with
/// 409 before any scoring logic can run.
pub async fn create_submission(
    State(state): State<AppState>,
    Json(req): Json<CreateSubmissionRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let component = state
        .store
        .component(req.component_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Component {} not found", req.component_id))
        })?;

    let record = state
        .store
        .create_submission(req.student_id, req.component_id, component.kind)
        .await?;

    tracing::info!(
        "Student {} started {:?} component {}",
        req.student_id,
        component.kind,
        component.id
    );

    Ok((StatusCode::CREATED, Json(SubmissionResponse::from(record))))
}

/// Records a student's answers against their submission.
///
/// Answer rows are immutable once written; the record transitions to
/// Submitted. Scoring is a separate, explicit call.
pub async fn submit_answers(
    State(state): State<AppState>,
    Path(submission_id): Path<i64>,
    Json(req): Json<SubmitAnswersRequest>,
) -> Result<impl IntoResponse, AppError> {
    require_valid_id(submission_id, "submission")?;
    req.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let record = state.store.submission(submission_id).await?.ok_or_else(|| {
        AppError::NotFound(format!("Submission {} not found", submission_id))
    })?;

    if record.student_id != req.student_id {
        return Err(AppError::Unauthorized(
            "Submission belongs to another student".to_string(),
        ));
    }

    // Answer rows are written exactly once; a submitted or scored record
    // never accepts more, otherwise repeated correct answers would inflate
    // the score past the question count.
    if record.state() != SubmissionState::NotStarted {
        return Err(AppError::DuplicateSubmission(format!(
            "Answers already recorded for submission {}",
            submission_id
        )));
    }

    let updated = state
        .store
        .record_answers(submission_id, &req.answers)
        .await?;

    Ok(Json(SubmissionResponse::from(updated)))
}

/// Scores a quiz/exercise submission and persists score + status.
pub async fn score_submission(
    State(state): State<AppState>,
    Path(submission_id): Path<i64>,
    Json(req): Json<StudentRequest>,
) -> Result<impl IntoResponse, AppError> {
    require_valid_id(submission_id, "submission")?;
    req.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let record = scorer::score_submission(
        state.store.as_ref(),
        &state.score_locks,
        submission_id,
        req.student_id,
    )
    .await?;

    tracing::info!(
        "Scored submission {} for student {}: {} correct",
        record.id,
        record.student_id,
        record.score
    );

    Ok(Json(SubmissionResponse::from(record)))
}

/// Marks a lesson component as viewed by the student.
///
/// First view creates the lesson-progress record; later views bump the
/// counter. This is what lesson completion reads.
pub async fn record_lesson_view(
    State(state): State<AppState>,
    Path(component_id): Path<i64>,
    Json(req): Json<StudentRequest>,
) -> Result<impl IntoResponse, AppError> {
    require_valid_id(component_id, "component")?;
    req.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let component = state.store.component(component_id).await?.ok_or_else(|| {
        AppError::NotFound(format!("Component {} not found", component_id))
    })?;

    if component.kind != ActivityKind::Lesson {
        return Err(AppError::BadRequest(format!(
            "Component {} is not a lesson",
            component_id
        )));
    }

    let record = state
        .store
        .record_lesson_view(req.student_id, component_id)
        .await?;

    Ok(Json(SubmissionResponse::from(record)))
}
