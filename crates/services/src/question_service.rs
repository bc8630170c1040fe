use std::sync::Arc;
use thiserror::Error;

use interview_core::model::{Category, Question};
use storage::repository::{QuestionRepository, StorageError};

/// Errors emitted by `QuestionService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuestionServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Read-only access to the question bank.
#[derive(Clone)]
pub struct QuestionService {
    questions: Arc<dyn QuestionRepository>,
}

impl QuestionService {
    #[must_use]
    pub fn new(questions: Arc<dyn QuestionRepository>) -> Self {
        Self { questions }
    }

    /// Active questions, optionally restricted to one category.
    ///
    /// Callers treat a failure the same as an empty list for rendering
    /// purposes, surfacing the failure only as a transient notice.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError` for storage failures.
    pub async fn list_active(
        &self,
        category: Option<Category>,
    ) -> Result<Vec<Question>, QuestionServiceError> {
        Ok(self.questions.list_active(category).await?)
    }
}
