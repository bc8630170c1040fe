use async_trait::async_trait;
use chrono::NaiveDate;
use interview_core::model::{
    Category, PerformanceMetrics, PracticeSessionRecord, Profile, Question, QuestionId, SessionId,
    SessionResponseRecord, UserId,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for the question bank.
///
/// The application reads questions only; `upsert_question` exists for the
/// seed tool and tests.
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Persist or update a question.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the question cannot be stored.
    async fn upsert_question(&self, question: &Question) -> Result<(), StorageError>;

    /// Fetch active questions, optionally restricted to one category,
    /// ordered by creation time.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on query failure.
    async fn list_active(&self, category: Option<Category>) -> Result<Vec<Question>, StorageError>;
}

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Persist or fully overwrite a profile, keyed by its owning user.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the profile cannot be stored.
    async fn upsert_profile(&self, profile: &Profile) -> Result<(), StorageError>;

    /// Single-record lookup by owning user.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on query failure; a missing profile is `None`.
    async fn get_by_user(&self, user_id: UserId) -> Result<Option<Profile>, StorageError>;
}

#[async_trait]
pub trait PracticeSessionRepository: Send + Sync {
    /// Append a persisted session record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be stored.
    async fn insert_session(&self, session: &PracticeSessionRecord) -> Result<(), StorageError>;

    /// All session records for a user, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on query failure.
    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<PracticeSessionRecord>, StorageError>;
}

#[async_trait]
pub trait SessionResponseRepository: Send + Sync {
    /// Append a per-question response record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be stored.
    async fn insert_response(&self, response: &SessionResponseRecord) -> Result<(), StorageError>;

    /// All responses belonging to one session, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on query failure.
    async fn list_for_session(
        &self,
        session_id: SessionId,
    ) -> Result<Vec<SessionResponseRecord>, StorageError>;
}

#[async_trait]
pub trait PerformanceMetricsRepository: Send + Sync {
    /// Persist or replace the rollup for one user and day.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the rollup cannot be stored.
    async fn upsert_daily(&self, metrics: &PerformanceMetrics) -> Result<(), StorageError>;

    /// All rollups for a user, ordered by metric date ascending.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on query failure.
    async fn list_for_user(&self, user_id: UserId)
    -> Result<Vec<PerformanceMetrics>, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    questions: Arc<Mutex<HashMap<QuestionId, Question>>>,
    profiles: Arc<Mutex<HashMap<UserId, Profile>>>,
    sessions: Arc<Mutex<HashMap<SessionId, PracticeSessionRecord>>>,
    responses: Arc<Mutex<Vec<SessionResponseRecord>>>,
    metrics: Arc<Mutex<HashMap<(UserId, NaiveDate), PerformanceMetrics>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_err<T>(err: std::sync::PoisonError<T>) -> StorageError {
    StorageError::Connection(err.to_string())
}

#[async_trait]
impl QuestionRepository for InMemoryRepository {
    async fn upsert_question(&self, question: &Question) -> Result<(), StorageError> {
        let mut guard = self.questions.lock().map_err(lock_err)?;
        guard.insert(question.id(), question.clone());
        Ok(())
    }

    async fn list_active(&self, category: Option<Category>) -> Result<Vec<Question>, StorageError> {
        let guard = self.questions.lock().map_err(lock_err)?;
        let mut found: Vec<Question> = guard
            .values()
            .filter(|q| q.is_active())
            .filter(|q| category.is_none_or(|c| q.category() == c))
            .cloned()
            .collect();
        found.sort_by_key(|q| (q.created_at(), q.id()));
        Ok(found)
    }
}

#[async_trait]
impl ProfileRepository for InMemoryRepository {
    async fn upsert_profile(&self, profile: &Profile) -> Result<(), StorageError> {
        let mut guard = self.profiles.lock().map_err(lock_err)?;
        guard.insert(profile.user_id(), profile.clone());
        Ok(())
    }

    async fn get_by_user(&self, user_id: UserId) -> Result<Option<Profile>, StorageError> {
        let guard = self.profiles.lock().map_err(lock_err)?;
        Ok(guard.get(&user_id).cloned())
    }
}

#[async_trait]
impl PracticeSessionRepository for InMemoryRepository {
    async fn insert_session(&self, session: &PracticeSessionRecord) -> Result<(), StorageError> {
        let mut guard = self.sessions.lock().map_err(lock_err)?;
        if guard.contains_key(&session.id()) {
            return Err(StorageError::Conflict);
        }
        guard.insert(session.id(), session.clone());
        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<PracticeSessionRecord>, StorageError> {
        let guard = self.sessions.lock().map_err(lock_err)?;
        let mut found: Vec<PracticeSessionRecord> = guard
            .values()
            .filter(|s| s.user_id() == user_id)
            .cloned()
            .collect();
        found.sort_by_key(|s| (s.started_at(), s.id()));
        Ok(found)
    }
}

#[async_trait]
impl SessionResponseRepository for InMemoryRepository {
    async fn insert_response(&self, response: &SessionResponseRecord) -> Result<(), StorageError> {
        let mut guard = self.responses.lock().map_err(lock_err)?;
        if guard.iter().any(|r| r.id() == response.id()) {
            return Err(StorageError::Conflict);
        }
        guard.push(response.clone());
        Ok(())
    }

    async fn list_for_session(
        &self,
        session_id: SessionId,
    ) -> Result<Vec<SessionResponseRecord>, StorageError> {
        let guard = self.responses.lock().map_err(lock_err)?;
        let mut found: Vec<SessionResponseRecord> = guard
            .iter()
            .filter(|r| r.session_id() == session_id)
            .cloned()
            .collect();
        found.sort_by_key(|r| (r.created_at(), r.id()));
        Ok(found)
    }
}

#[async_trait]
impl PerformanceMetricsRepository for InMemoryRepository {
    async fn upsert_daily(&self, metrics: &PerformanceMetrics) -> Result<(), StorageError> {
        let mut guard = self.metrics.lock().map_err(lock_err)?;
        guard.insert(
            (metrics.user_id(), metrics.metric_date()),
            metrics.clone(),
        );
        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<PerformanceMetrics>, StorageError> {
        let guard = self.metrics.lock().map_err(lock_err)?;
        let mut found: Vec<PerformanceMetrics> = guard
            .values()
            .filter(|m| m.user_id() == user_id)
            .cloned()
            .collect();
        found.sort_by_key(PerformanceMetrics::metric_date);
        Ok(found)
    }
}

/// Aggregates the repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub questions: Arc<dyn QuestionRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub sessions: Arc<dyn PracticeSessionRepository>,
    pub responses: Arc<dyn SessionResponseRepository>,
    pub metrics: Arc<dyn PerformanceMetricsRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        Self {
            questions: Arc::new(repo.clone()),
            profiles: Arc::new(repo.clone()),
            sessions: Arc::new(repo.clone()),
            responses: Arc::new(repo.clone()),
            metrics: Arc::new(repo),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use interview_core::model::{
        Difficulty, MetricsId, ProfileFields, ProfileId, QuestionDraft, ResponseId,
    };
    use interview_core::time::fixed_now;

    fn build_question(category: Category, prompt: &str) -> Question {
        QuestionDraft {
            category,
            difficulty: Difficulty::Medium,
            prompt: prompt.to_string(),
            sample_answer: Some("Keep it structured.".to_string()),
            tags: vec!["sample".to_string()],
            time_limit_secs: Some(120),
        }
        .validate(fixed_now())
        .unwrap()
        .assign_id(QuestionId::generate())
    }

    #[tokio::test]
    async fn list_active_filters_by_category() {
        let repo = InMemoryRepository::new();
        repo.upsert_question(&build_question(Category::Hr, "Why us?"))
            .await
            .unwrap();
        repo.upsert_question(&build_question(Category::Technical, "Explain ownership."))
            .await
            .unwrap();

        let all = repo.list_active(None).await.unwrap();
        assert_eq!(all.len(), 2);

        let technical = repo.list_active(Some(Category::Technical)).await.unwrap();
        assert_eq!(technical.len(), 1);
        assert_eq!(technical[0].category(), Category::Technical);
    }

    #[tokio::test]
    async fn profile_upsert_overwrites_by_user() {
        let repo = InMemoryRepository::new();
        let user_id = UserId::generate();
        let now = fixed_now();
        let mut profile = Profile::new(ProfileId::generate(), user_id, now);
        repo.upsert_profile(&profile).await.unwrap();

        profile.apply(
            ProfileFields {
                full_name: Some("Demo User".to_string()),
                ..ProfileFields::default()
            },
            now + Duration::minutes(1),
        );
        repo.upsert_profile(&profile).await.unwrap();

        let fetched = repo.get_by_user(user_id).await.unwrap().unwrap();
        assert_eq!(fetched.full_name(), Some("Demo User"));
    }

    #[tokio::test]
    async fn duplicate_session_insert_conflicts() {
        let repo = InMemoryRepository::new();
        let record = PracticeSessionRecord::from_persisted(
            SessionId::generate(),
            UserId::generate(),
            Some(Category::Hr),
            5,
            5,
            Some(80.0),
            fixed_now(),
            Some(fixed_now() + Duration::minutes(8)),
            Some(480),
        )
        .unwrap();
        repo.insert_session(&record).await.unwrap();
        let err = repo.insert_session(&record).await.unwrap_err();
        assert!(matches!(err, StorageError::Conflict));
    }

    #[tokio::test]
    async fn responses_list_by_session() {
        let repo = InMemoryRepository::new();
        let session_id = SessionId::generate();
        for i in 0..2 {
            let response = SessionResponseRecord::new(
                ResponseId::generate(),
                session_id,
                QuestionId::generate(),
                Some(format!("answer {i}")),
                None,
                None,
                Some(30 + i),
                fixed_now() + Duration::seconds(i64::from(i)),
            );
            repo.insert_response(&response).await.unwrap();
        }
        let other = SessionResponseRecord::new(
            ResponseId::generate(),
            SessionId::generate(),
            QuestionId::generate(),
            None,
            None,
            None,
            None,
            fixed_now(),
        );
        repo.insert_response(&other).await.unwrap();

        let found = repo.list_for_session(session_id).await.unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].answer(), Some("answer 0"));
    }

    #[tokio::test]
    async fn metrics_upsert_replaces_same_day() {
        let repo = InMemoryRepository::new();
        let user_id = UserId::generate();
        let day = fixed_now().date_naive();
        let first = PerformanceMetrics::new(
            MetricsId::generate(),
            user_id,
            day,
            1,
            3,
            Some(60.0),
            None,
            None,
            None,
            fixed_now(),
        );
        repo.upsert_daily(&first).await.unwrap();

        let second = PerformanceMetrics::new(
            MetricsId::generate(),
            user_id,
            day,
            2,
            8,
            Some(70.0),
            None,
            None,
            None,
            fixed_now(),
        );
        repo.upsert_daily(&second).await.unwrap();

        let listed = PerformanceMetricsRepository::list_for_user(&repo, user_id)
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].total_sessions(), 2);
    }
}
