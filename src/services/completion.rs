// src/services/completion.rs

use crate::models::{component::ActivityKind, submission::SubmissionRecord};

/// The completion predicate: is this activity done for this student?
///
/// One rule per activity kind, applied at every call site (module rollup
/// and course counting alike). Assignments count as complete once
/// submitted; grading outcomes live in `is_graded`/`is_passed` and do not
/// affect completion. Absence of a record is never an error, just "not
/// complete".
pub fn is_complete(kind: ActivityKind, record: Option<&SubmissionRecord>) -> bool {
    let Some(record) = record else {
        return false;
    };
    match kind {
        ActivityKind::Quiz => record.status,
        ActivityKind::Exercise => record.is_passed,
        ActivityKind::Assignment => record.is_submitted,
        ActivityKind::Lesson => record.is_viewed || record.view_count > 0,
    }
}
