// src/store/mod.rs

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::{
    error::AppError,
    models::{
        component::{ActivityKind, Component},
        course::Course,
        course_module::CourseModule,
        question::{AnswerOption, Question},
        section::Section,
        submission::{AnswerInput, SubmissionRecord, SubmitAnswer},
    },
};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Storage seam for the progress and assessment engines.
///
/// Content reads are served by the authoring collaborator's tables; the
/// submission accessors enforce the one-live-record-per-(student, component)
/// invariant at creation and keep `score`/`status` writable only through
/// `apply_score`.
#[async_trait]
pub trait Store: Send + Sync {
    async fn course(&self, id: i64) -> Result<Option<Course>, AppError>;

    /// Active modules of a course, in position order.
    async fn modules_for_course(&self, course_id: i64) -> Result<Vec<CourseModule>, AppError>;

    async fn sections_for_module(&self, module_id: i64) -> Result<Vec<Section>, AppError>;

    async fn components_for_section(&self, section_id: i64) -> Result<Vec<Component>, AppError>;

    async fn component(&self, id: i64) -> Result<Option<Component>, AppError>;

    /// Questions of a quiz/exercise component in stable creation order.
    async fn questions_for_assessment(
        &self,
        assessment_id: i64,
    ) -> Result<Vec<Question>, AppError>;

    async fn options_for_question(&self, question_id: i64) -> Result<Vec<AnswerOption>, AppError>;

    async fn option(&self, id: i64) -> Result<Option<AnswerOption>, AppError>;

    async fn submission(&self, id: i64) -> Result<Option<SubmissionRecord>, AppError>;

    async fn submission_for(
        &self,
        student_id: i64,
        component_id: i64,
    ) -> Result<Option<SubmissionRecord>, AppError>;

    /// Inserts the initial unscored record. Fails with
    /// `AppError::DuplicateSubmission` when a live record already exists
    /// for the pair.
    async fn create_submission(
        &self,
        student_id: i64,
        component_id: i64,
        kind: ActivityKind,
    ) -> Result<SubmissionRecord, AppError>;

    /// Inserts immutable answer rows and marks the record submitted.
    async fn record_answers(
        &self,
        submission_id: i64,
        answers: &[AnswerInput],
    ) -> Result<SubmissionRecord, AppError>;

    async fn answers_for_submission(
        &self,
        submission_id: i64,
    ) -> Result<Vec<SubmitAnswer>, AppError>;

    /// Persists `score` and `status = true` in a single update.
    async fn apply_score(
        &self,
        submission_id: i64,
        score: i64,
    ) -> Result<SubmissionRecord, AppError>;

    /// Creates or bumps the lesson-progress record for the pair.
    async fn record_lesson_view(
        &self,
        student_id: i64,
        component_id: i64,
    ) -> Result<SubmissionRecord, AppError>;
}
