// src/services/scorer.rs

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::{error::AppError, models::submission::SubmissionRecord, store::Store};

/// Per-submission scoring locks.
///
/// Scoring is a read set followed by one write; without serialization two
/// concurrent calls on the same submission interleave and the last write
/// wins. One async mutex per submission id closes that window while
/// leaving unrelated submissions free to score in parallel.
#[derive(Default)]
pub struct ScoreLocks {
    locks: Mutex<HashMap<i64, Arc<tokio::sync::Mutex<()>>>>,
}

impl ScoreLocks {
    pub fn new() -> Self {
        Self::default()
    }

    fn for_submission(&self, submission_id: i64) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.locks.lock().unwrap();
        locks
            .entry(submission_id)
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone()
    }

    /// Drops the entry once no scoring call holds it, so the map does not
    /// grow by one `Arc` per submission ever scored.
    fn release(&self, submission_id: i64) {
        let mut locks = self.locks.lock().unwrap();
        if let Some(entry) = locks.get(&submission_id) {
            if Arc::strong_count(entry) == 1 {
                locks.remove(&submission_id);
            }
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.locks.lock().unwrap().len()
    }
}

/// Scores one quiz/exercise submission.
///
/// Loads every recorded answer, dereferences the chosen option and counts
/// the `is_correct` ones, then persists `score` and `status = true` in a
/// single update. Idempotent for a fixed answer set. A submission with no
/// recorded answers is a `NotFound`, never a silent zero.
pub async fn score_submission(
    store: &dyn Store,
    locks: &ScoreLocks,
    submission_id: i64,
    student_id: i64,
) -> Result<SubmissionRecord, AppError> {
    let lock = locks.for_submission(submission_id);
    let result = {
        let _guard = lock.lock().await;
        score_locked(store, submission_id, student_id).await
    };
    drop(lock);
    locks.release(submission_id);
    result
}

async fn score_locked(
    store: &dyn Store,
    submission_id: i64,
    student_id: i64,
) -> Result<SubmissionRecord, AppError> {
    let record = store
        .submission(submission_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Submission {} not found", submission_id)))?;

    if record.student_id != student_id {
        return Err(AppError::Unauthorized(
            "Submission belongs to another student".to_string(),
        ));
    }

    if !record.kind.is_assessment() {
        return Err(AppError::BadRequest(
            "Only quiz and exercise submissions can be scored".to_string(),
        ));
    }

    let answers = store.answers_for_submission(submission_id).await?;
    if answers.is_empty() {
        return Err(AppError::NotFound(format!(
            "No answers recorded for submission {}",
            submission_id
        )));
    }

    let mut correct_count: i64 = 0;
    for answer in &answers {
        match store.option(answer.option_id).await? {
            Some(option) => {
                if option.is_correct {
                    correct_count += 1;
                }
            }
            None => {
                tracing::warn!(
                    "Answer {} references missing option {}, not counted",
                    answer.id,
                    answer.option_id
                );
            }
        }
    }

    store.apply_score(submission_id, correct_count).await
}
