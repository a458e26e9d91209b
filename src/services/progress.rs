// src/services/progress.rs

use crate::{
    error::AppError,
    models::{
        progress::{
            ComponentProgress, CourseProgressResponse, ModuleProgress, ProgressSummary,
            SectionProgress,
        },
        submission::SubmissionState,
    },
    services::completion,
    store::Store,
};

/// Recomputes a student's full course progress from scratch.
///
/// Walks Course -> Module -> Section -> Component, evaluates the
/// completion predicate per component, and rolls up:
/// * module completion is all-or-nothing (zero components => never
///   complete),
/// * the course percentage is round(completed / total * 100), 0 when
///   there is nothing to count.
///
/// A missing course aborts with `NotFound`. Missing *nested* data is
/// skipped and logged instead, so a transiently inconsistent authoring
/// tree degrades to a partial result rather than a failed request.
pub async fn course_progress(
    store: &dyn Store,
    course_id: i64,
    student_id: i64,
) -> Result<CourseProgressResponse, AppError> {
    let course = store
        .course(course_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Course {} not found", course_id)))?;

    let mut total: i64 = 0;
    let mut completed: i64 = 0;
    let mut modules_out = Vec::new();

    for module in store.modules_for_course(course_id).await? {
        let sections = match store.sections_for_module(module.id).await {
            Ok(sections) => sections,
            Err(e) => {
                tracing::warn!(
                    "Skipping sections of module {} during aggregation: {}",
                    module.id,
                    e
                );
                continue;
            }
        };

        let mut has_components = false;
        let mut all_complete = true;
        let mut sections_out = Vec::new();

        for section in sections {
            let components = match store.components_for_section(section.id).await {
                Ok(components) => components,
                Err(e) => {
                    tracing::warn!(
                        "Skipping components of section {} during aggregation: {}",
                        section.id,
                        e
                    );
                    continue;
                }
            };

            let mut components_out = Vec::new();
            for component in components {
                has_components = true;
                total += 1;

                let record = match store.submission_for(student_id, component.id).await {
                    Ok(record) => record,
                    Err(e) => {
                        tracing::warn!(
                            "Treating component {} as unattempted, submission read failed: {}",
                            component.id,
                            e
                        );
                        None
                    }
                };

                let complete = completion::is_complete(component.kind, record.as_ref());
                if complete {
                    completed += 1;
                } else {
                    all_complete = false;
                }

                components_out.push(ComponentProgress {
                    id: component.id,
                    title: component.title,
                    kind: component.kind,
                    complete,
                    state: record
                        .as_ref()
                        .map(|r| r.state())
                        .unwrap_or(SubmissionState::NotStarted),
                    status: record.as_ref().map(|r| r.status).unwrap_or(false),
                    score: record.as_ref().map(|r| r.score),
                    submitted_at: record.as_ref().and_then(|r| r.submitted_at),
                });
            }

            sections_out.push(SectionProgress {
                id: section.id,
                title: section.title,
                kind: section.kind,
                components: components_out,
            });
        }

        modules_out.push(ModuleProgress {
            id: module.id,
            title: module.title,
            // "Nothing to show = not done": an empty module is never complete.
            complete: has_components && all_complete,
            sections: sections_out,
        });
    }

    let percentage = if total == 0 {
        0
    } else {
        ((completed as f64 / total as f64) * 100.0).round() as i64
    };

    Ok(CourseProgressResponse {
        course,
        progress: ProgressSummary {
            percentage,
            completed,
            total,
        },
        modules: modules_out,
    })
}
