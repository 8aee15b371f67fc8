use std::sync::Arc;

use rand::seq::SliceRandom;
use tracing::debug;

use models::question;

use crate::catalog::repository::CatalogRepository;
use crate::errors::ServiceError;

/// Sentinel meaning "no category restriction" for quiz selection.
pub const ANY_CATEGORY: i32 = 0;

/// Serves one random unseen question per call.
pub struct QuizService<R: CatalogRepository> {
    repo: Arc<R>,
}

impl<R: CatalogRepository> QuizService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Draw uniformly from the candidates not yet seen. Exhaustion is an
    /// error, never a retry loop.
    pub async fn next_question(
        &self,
        category_id: i32,
        previous: &[i32],
    ) -> Result<question::Model, ServiceError> {
        let candidates = if category_id == ANY_CATEGORY {
            self.repo.list_questions().await?
        } else {
            self.repo.questions_by_category(category_id).await?
        };
        debug!(category_id, candidates = candidates.len(), seen = previous.len(), "quiz draw");
        draw_eligible(&candidates, previous)
            .cloned()
            .ok_or_else(|| ServiceError::Unprocessable("no eligible question remains".into()))
    }
}

/// One uniform draw over the eligible subset: candidates minus already-seen
/// ids. The subset is materialized first so the draw is a single bounded
/// step no matter how much of the catalog the history covers.
pub fn draw_eligible<'a>(
    candidates: &'a [question::Model],
    previous: &[i32],
) -> Option<&'a question::Model> {
    let eligible: Vec<&question::Model> = candidates
        .iter()
        .filter(|q| !previous.contains(&q.id))
        .collect();
    eligible.choose(&mut rand::thread_rng()).copied()
}
