// src/routes.rs

use axum::{
    Router,
    http::Method,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{assessment, progress, submission},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (courses, assessments, submissions, components).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (store + config).
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let course_routes = Router::new().route(
        "/{course_id}/students/{student_id}/progress",
        get(progress::course_progress),
    );

    let assessment_routes = Router::new().route("/{id}/paper", get(assessment::get_paper));

    let submission_routes = Router::new()
        .route("/", post(submission::create_submission))
        .route("/{id}/answers", post(submission::submit_answers))
        .route("/{id}/score", post(submission::score_submission));

    let component_routes = Router::new().route("/{id}/view", post(submission::record_lesson_view));

    Router::new()
        .nest("/api/courses", course_routes)
        .nest("/api/assessments", assessment_routes)
        .nest("/api/submissions", submission_routes)
        .nest("/api/components", component_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
