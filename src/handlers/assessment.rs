// src/handlers/assessment.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};

use crate::{
    error::AppError, handlers::require_valid_id, models::question::ShuffleParams,
    services::shuffle, state::AppState,
};

/// Delivers a (by default shuffled) paper for one quiz/exercise.
///
/// `?shuffle_questions=false` / `?shuffle_options=false` opt out of either
/// permutation. Correctness flags never leave the server.
pub async fn get_paper(
    State(state): State<AppState>,
    Path(assessment_id): Path<i64>,
    Query(params): Query<ShuffleParams>,
) -> Result<impl IntoResponse, AppError> {
    require_valid_id(assessment_id, "assessment")?;

    let paper = shuffle::deliver_paper(state.store.as_ref(), assessment_id, &params).await?;

    Ok(Json(paper))
}
