// src/store/postgres.rs

use async_trait::async_trait;
use sqlx::PgPool;

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
    store::Store,
};

/// Postgres-backed store. Queries are kept runtime-checked so the crate
/// builds without a live DATABASE_URL.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SUBMISSION_COLUMNS: &str = "id, student_id, component_id, kind, score, status, \
     is_submitted, is_graded, is_passed, is_viewed, view_count, submitted_at, created_at";

#[async_trait]
impl Store for PgStore {
    async fn course(&self, id: i64) -> Result<Option<Course>, AppError> {
        let course = sqlx::query_as::<_, Course>(
            "SELECT id, title, teacher_id, created_at FROM courses WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(course)
    }

    async fn modules_for_course(&self, course_id: i64) -> Result<Vec<CourseModule>, AppError> {
        let modules = sqlx::query_as::<_, CourseModule>(
            "SELECT id, course_id, title, position, active, created_at
             FROM course_modules
             WHERE course_id = $1 AND active
             ORDER BY position, id",
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(modules)
    }

    async fn sections_for_module(&self, module_id: i64) -> Result<Vec<Section>, AppError> {
        let sections = sqlx::query_as::<_, Section>(
            "SELECT id, module_id, title, kind, position, created_at
             FROM sections
             WHERE module_id = $1
             ORDER BY position, id",
        )
        .bind(module_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(sections)
    }

    async fn components_for_section(&self, section_id: i64) -> Result<Vec<Component>, AppError> {
        let components = sqlx::query_as::<_, Component>(
            "SELECT id, section_id, title, kind, pass_threshold, position, created_at
             FROM components
             WHERE section_id = $1
             ORDER BY position, id",
        )
        .bind(section_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(components)
    }

    async fn component(&self, id: i64) -> Result<Option<Component>, AppError> {
        let component = sqlx::query_as::<_, Component>(
            "SELECT id, section_id, title, kind, pass_threshold, position, created_at
             FROM components WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(component)
    }

    async fn questions_for_assessment(
        &self,
        assessment_id: i64,
    ) -> Result<Vec<Question>, AppError> {
        let questions = sqlx::query_as::<_, Question>(
            "SELECT id, assessment_id, content, position, created_at
             FROM questions
             WHERE assessment_id = $1
             ORDER BY position, id",
        )
        .bind(assessment_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(questions)
    }

    async fn options_for_question(&self, question_id: i64) -> Result<Vec<AnswerOption>, AppError> {
        let options = sqlx::query_as::<_, AnswerOption>(
            "SELECT id, question_id, content, is_correct, position
             FROM answer_options
             WHERE question_id = $1
             ORDER BY position, id",
        )
        .bind(question_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(options)
    }

    async fn option(&self, id: i64) -> Result<Option<AnswerOption>, AppError> {
        let option = sqlx::query_as::<_, AnswerOption>(
            "SELECT id, question_id, content, is_correct, position
             FROM answer_options WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(option)
    }

    async fn submission(&self, id: i64) -> Result<Option<SubmissionRecord>, AppError> {
        let sql = format!(
            "SELECT {SUBMISSION_COLUMNS} FROM submission_records WHERE id = $1 AND NOT deleted"
        );
        let record = sqlx::query_as::<_, SubmissionRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }

    async fn submission_for(
        &self,
        student_id: i64,
        component_id: i64,
    ) -> Result<Option<SubmissionRecord>, AppError> {
        let sql = format!(
            "SELECT {SUBMISSION_COLUMNS} FROM submission_records
             WHERE student_id = $1 AND component_id = $2 AND NOT deleted"
        );
        let record = sqlx::query_as::<_, SubmissionRecord>(&sql)
            .bind(student_id)
            .bind(component_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }

    async fn create_submission(
        &self,
        student_id: i64,
        component_id: i64,
        kind: ActivityKind,
    ) -> Result<SubmissionRecord, AppError> {
        // Application-level check first; the partial unique index is the
        // backstop when two create calls race.
        if self.submission_for(student_id, component_id).await?.is_some() {
            return Err(AppError::DuplicateSubmission(
                "Submission already exists for this student and activity".to_string(),
            ));
        }

        let sql = format!(
            "INSERT INTO submission_records (student_id, component_id, kind)
             VALUES ($1, $2, $3)
             RETURNING {SUBMISSION_COLUMNS}"
        );
        let record = sqlx::query_as::<_, SubmissionRecord>(&sql)
            .bind(student_id)
            .bind(component_id)
            .bind(kind)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if e.to_string().contains("unique") {
                    // Concurrent create handled gracefully
                    return AppError::DuplicateSubmission(
                        "Submission already exists for this student and activity".to_string(),
                    );
                }
                AppError::InternalServerError(e.to_string())
            })?;

        Ok(record)
    }

    async fn record_answers(
        &self,
        submission_id: i64,
        answers: &[AnswerInput],
    ) -> Result<SubmissionRecord, AppError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::InternalServerError(e.to_string()))?;

        for answer in answers {
            sqlx::query(
                "INSERT INTO submit_answers (submission_id, question_id, option_id)
                 VALUES ($1, $2, $3)",
            )
            .bind(submission_id)
            .bind(answer.question_id)
            .bind(answer.option_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::InternalServerError(e.to_string()))?;
        }

        let sql = format!(
            "UPDATE submission_records
             SET is_submitted = TRUE, submitted_at = CURRENT_TIMESTAMP
             WHERE id = $1 AND NOT deleted
             RETURNING {SUBMISSION_COLUMNS}"
        );
        let record = sqlx::query_as::<_, SubmissionRecord>(&sql)
            .bind(submission_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit()
            .await
            .map_err(|e| AppError::InternalServerError(e.to_string()))?;

        Ok(record)
    }

    async fn answers_for_submission(
        &self,
        submission_id: i64,
    ) -> Result<Vec<SubmitAnswer>, AppError> {
        let answers = sqlx::query_as::<_, SubmitAnswer>(
            "SELECT id, submission_id, question_id, option_id, created_at
             FROM submit_answers
             WHERE submission_id = $1
             ORDER BY id",
        )
        .bind(submission_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(answers)
    }

    async fn apply_score(
        &self,
        submission_id: i64,
        score: i64,
    ) -> Result<SubmissionRecord, AppError> {
        let sql = format!(
            "UPDATE submission_records
             SET score = $2, status = TRUE
             WHERE id = $1 AND NOT deleted
             RETURNING {SUBMISSION_COLUMNS}"
        );
        let record = sqlx::query_as::<_, SubmissionRecord>(&sql)
            .bind(submission_id)
            .bind(score)
            .fetch_one(&self.pool)
            .await?;

        Ok(record)
    }

    async fn record_lesson_view(
        &self,
        student_id: i64,
        component_id: i64,
    ) -> Result<SubmissionRecord, AppError> {
        // Upsert against the partial unique index on live pairs.
        let sql = format!(
            "INSERT INTO submission_records
                 (student_id, component_id, kind, is_viewed, view_count)
             VALUES ($1, $2, $3, TRUE, 1)
             ON CONFLICT (student_id, component_id) WHERE NOT deleted
             DO UPDATE SET is_viewed = TRUE,
                           view_count = submission_records.view_count + 1
             RETURNING {SUBMISSION_COLUMNS}"
        );
        let record = sqlx::query_as::<_, SubmissionRecord>(&sql)
            .bind(student_id)
            .bind(component_id)
            .bind(ActivityKind::Lesson)
            .fetch_one(&self.pool)
            .await?;

        Ok(record)
    }
}
