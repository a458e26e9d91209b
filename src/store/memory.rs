// src/store/memory.rs

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

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

#[derive(Default)]
struct Inner {
    courses: Vec<Course>,
    modules: Vec<CourseModule>,
    sections: Vec<Section>,
    components: Vec<Component>,
    questions: Vec<Question>,
    options: Vec<AnswerOption>,
    submissions: Vec<SubmissionRecord>,
    answers: Vec<SubmitAnswer>,
    next_id: i64,
}

impl Inner {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-memory `Store` used by the integration tests and local development.
/// One mutex guards all tables, so check-then-insert sequences are atomic.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_course(&self, title: &str, teacher_id: i64) -> Course {
        let mut inner = self.inner.lock().unwrap();
        let course = Course {
            id: inner.next_id(),
            title: title.to_string(),
            teacher_id,
            created_at: Some(Utc::now()),
        };
        inner.courses.push(course.clone());
        course
    }

    pub fn add_module(&self, course_id: i64, title: &str, active: bool) -> CourseModule {
        let mut inner = self.inner.lock().unwrap();
        let position = inner.modules.iter().filter(|m| m.course_id == course_id).count() as i32;
        let module = CourseModule {
            id: inner.next_id(),
            course_id,
            title: title.to_string(),
            position,
            active,
            created_at: Some(Utc::now()),
        };
        inner.modules.push(module.clone());
        module
    }

    pub fn add_section(&self, module_id: i64, title: &str, kind: ActivityKind) -> Section {
        let mut inner = self.inner.lock().unwrap();
        let position = inner.sections.iter().filter(|s| s.module_id == module_id).count() as i32;
        let section = Section {
            id: inner.next_id(),
            module_id,
            title: title.to_string(),
            kind,
            position,
            created_at: Some(Utc::now()),
        };
        inner.sections.push(section.clone());
        section
    }

    pub fn add_component(
        &self,
        section_id: i64,
        title: &str,
        kind: ActivityKind,
        pass_threshold: Option<i64>,
    ) -> Component {
        let mut inner = self.inner.lock().unwrap();
        let position = inner
            .components
            .iter()
            .filter(|c| c.section_id == section_id)
            .count() as i32;
        let component = Component {
            id: inner.next_id(),
            section_id,
            title: title.to_string(),
            kind,
            pass_threshold,
            position,
            created_at: Some(Utc::now()),
        };
        inner.components.push(component.clone());
        component
    }

    pub fn add_question(&self, assessment_id: i64, content: &str) -> Question {
        let mut inner = self.inner.lock().unwrap();
        let position = inner
            .questions
            .iter()
            .filter(|q| q.assessment_id == assessment_id)
            .count() as i32;
        let question = Question {
            id: inner.next_id(),
            assessment_id,
            content: content.to_string(),
            position,
            created_at: Some(Utc::now()),
        };
        inner.questions.push(question.clone());
        question
    }

    pub fn add_option(&self, question_id: i64, content: &str, is_correct: bool) -> AnswerOption {
        let mut inner = self.inner.lock().unwrap();
        let position = inner
            .options
            .iter()
            .filter(|o| o.question_id == question_id)
            .count() as i32;
        let option = AnswerOption {
            id: inner.next_id(),
            question_id,
            content: content.to_string(),
            is_correct,
            position,
        };
        inner.options.push(option.clone());
        option
    }

    /// Seeds a submission record directly, bypassing the duplicate guard.
    /// `tweak` lets fixtures set flags like `is_passed` or `status` that are
    /// otherwise owned by grading flows.
    pub fn seed_submission(
        &self,
        student_id: i64,
        component_id: i64,
        kind: ActivityKind,
        tweak: impl FnOnce(&mut SubmissionRecord),
    ) -> SubmissionRecord {
        let mut inner = self.inner.lock().unwrap();
        let mut record = SubmissionRecord {
            id: inner.next_id(),
            student_id,
            component_id,
            kind,
            score: 0,
            status: false,
            is_submitted: false,
            is_graded: false,
            is_passed: false,
            is_viewed: false,
            view_count: 0,
            submitted_at: None,
            created_at: Some(Utc::now()),
        };
        tweak(&mut record);
        inner.submissions.push(record.clone());
        record
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn course(&self, id: i64) -> Result<Option<Course>, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.courses.iter().find(|c| c.id == id).cloned())
    }

    async fn modules_for_course(&self, course_id: i64) -> Result<Vec<CourseModule>, AppError> {
        let inner = self.inner.lock().unwrap();
        let mut modules: Vec<_> = inner
            .modules
            .iter()
            .filter(|m| m.course_id == course_id && m.active)
            .cloned()
            .collect();
        modules.sort_by_key(|m| (m.position, m.id));
        Ok(modules)
    }

    async fn sections_for_module(&self, module_id: i64) -> Result<Vec<Section>, AppError> {
        let inner = self.inner.lock().unwrap();
        let mut sections: Vec<_> = inner
            .sections
            .iter()
            .filter(|s| s.module_id == module_id)
            .cloned()
            .collect();
        sections.sort_by_key(|s| (s.position, s.id));
        Ok(sections)
    }

    async fn components_for_section(&self, section_id: i64) -> Result<Vec<Component>, AppError> {
        let inner = self.inner.lock().unwrap();
        let mut components: Vec<_> = inner
            .components
            .iter()
            .filter(|c| c.section_id == section_id)
            .cloned()
            .collect();
        components.sort_by_key(|c| (c.position, c.id));
        Ok(components)
    }

    async fn component(&self, id: i64) -> Result<Option<Component>, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.components.iter().find(|c| c.id == id).cloned())
    }

    async fn questions_for_assessment(
        &self,
        assessment_id: i64,
    ) -> Result<Vec<Question>, AppError> {
        let inner = self.inner.lock().unwrap();
        let mut questions: Vec<_> = inner
            .questions
            .iter()
            .filter(|q| q.assessment_id == assessment_id)
            .cloned()
            .collect();
        questions.sort_by_key(|q| (q.position, q.id));
        Ok(questions)
    }

    async fn options_for_question(&self, question_id: i64) -> Result<Vec<AnswerOption>, AppError> {
        let inner = self.inner.lock().unwrap();
        let mut options: Vec<_> = inner
            .options
            .iter()
            .filter(|o| o.question_id == question_id)
            .cloned()
            .collect();
        options.sort_by_key(|o| (o.position, o.id));
        Ok(options)
    }

    async fn option(&self, id: i64) -> Result<Option<AnswerOption>, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.options.iter().find(|o| o.id == id).cloned())
    }

    async fn submission(&self, id: i64) -> Result<Option<SubmissionRecord>, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.submissions.iter().find(|s| s.id == id).cloned())
    }

    async fn submission_for(
        &self,
        student_id: i64,
        component_id: i64,
    ) -> Result<Option<SubmissionRecord>, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .submissions
            .iter()
            .find(|s| s.student_id == student_id && s.component_id == component_id)
            .cloned())
    }

    async fn create_submission(
        &self,
        student_id: i64,
        component_id: i64,
        kind: ActivityKind,
    ) -> Result<SubmissionRecord, AppError> {
        let mut inner = self.inner.lock().unwrap();
        let exists = inner
            .submissions
            .iter()
            .any(|s| s.student_id == student_id && s.component_id == component_id);
        if exists {
            return Err(AppError::DuplicateSubmission(
                "Submission already exists for this student and activity".to_string(),
            ));
        }

        let record = SubmissionRecord {
            id: inner.next_id(),
            student_id,
            component_id,
            kind,
            score: 0,
            status: false,
            is_submitted: false,
            is_graded: false,
            is_passed: false,
            is_viewed: false,
            view_count: 0,
            submitted_at: None,
            created_at: Some(Utc::now()),
        };
        inner.submissions.push(record.clone());
        Ok(record)
    }

    async fn record_answers(
        &self,
        submission_id: i64,
        answers: &[AnswerInput],
    ) -> Result<SubmissionRecord, AppError> {
        let mut inner = self.inner.lock().unwrap();
        for answer in answers {
            let id = inner.next_id();
            inner.answers.push(SubmitAnswer {
                id,
                submission_id,
                question_id: answer.question_id,
                option_id: answer.option_id,
                created_at: Some(Utc::now()),
            });
        }

        let record = inner
            .submissions
            .iter_mut()
            .find(|s| s.id == submission_id)
            .ok_or_else(|| AppError::NotFound("Submission not found".to_string()))?;
        record.is_submitted = true;
        record.submitted_at = Some(Utc::now());
        Ok(record.clone())
    }

    async fn answers_for_submission(
        &self,
        submission_id: i64,
    ) -> Result<Vec<SubmitAnswer>, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .answers
            .iter()
            .filter(|a| a.submission_id == submission_id)
            .cloned()
            .collect())
    }

    async fn apply_score(
        &self,
        submission_id: i64,
        score: i64,
    ) -> Result<SubmissionRecord, AppError> {
        let mut inner = self.inner.lock().unwrap();
        let record = inner
            .submissions
            .iter_mut()
            .find(|s| s.id == submission_id)
            .ok_or_else(|| AppError::NotFound("Submission not found".to_string()))?;
        record.score = score;
        record.status = true;
        Ok(record.clone())
    }

    async fn record_lesson_view(
        &self,
        student_id: i64,
        component_id: i64,
    ) -> Result<SubmissionRecord, AppError> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(record) = inner
            .submissions
            .iter_mut()
            .find(|s| s.student_id == student_id && s.component_id == component_id)
        {
            record.is_viewed = true;
            record.view_count += 1;
            return Ok(record.clone());
        }

        let record = SubmissionRecord {
            id: inner.next_id(),
            student_id,
            component_id,
            kind: ActivityKind::Lesson,
            score: 0,
            status: false,
            is_submitted: false,
            is_graded: false,
            is_passed: false,
            is_viewed: true,
            view_count: 1,
            submitted_at: None,
            created_at: Some(Utc::now()),
        };
        inner.submissions.push(record.clone());
        Ok(record)
    }
}
