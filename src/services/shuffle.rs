// src/services/shuffle.rs

use rand::seq::SliceRandom;

use crate::{
    error::AppError,
    models::question::{DeliveredQuestion, PaperResponse, PublicOption, ShuffleParams},
    store::Store,
};

/// Builds a delivery paper for one assessment.
///
/// Questions load in stable creation order and are shuffled as one list;
/// each question's options are shuffled independently afterwards, so an
/// option can never migrate to another question. Nothing is persisted:
/// two calls for the same assessment may return different orders.
pub async fn deliver_paper(
    store: &dyn Store,
    assessment_id: i64,
    params: &ShuffleParams,
) -> Result<PaperResponse, AppError> {
    let component = store
        .component(assessment_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Assessment {} not found", assessment_id)))?;

    if !component.kind.is_assessment() {
        return Err(AppError::BadRequest(format!(
            "Component {} is not a quiz or exercise",
            assessment_id
        )));
    }

    let mut questions = store.questions_for_assessment(assessment_id).await?;
    if params.shuffle_questions {
        // Fresh rng per permutation; ThreadRng must not live across awaits.
        let mut rng = rand::thread_rng();
        questions.shuffle(&mut rng);
    }

    let mut delivered = Vec::with_capacity(questions.len());
    for question in questions {
        let mut options = store.options_for_question(question.id).await?;
        if params.shuffle_options {
            let mut rng = rand::thread_rng();
            options.shuffle(&mut rng);
        }

        delivered.push(DeliveredQuestion {
            id: question.id,
            content: question.content,
            options: options.into_iter().map(PublicOption::from).collect(),
        });
    }

    let count = delivered.len();
    Ok(PaperResponse {
        questions: delivered,
        count,
    })
}
