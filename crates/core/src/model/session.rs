use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::ids::{QuestionId, ResponseId, SessionId, UserId};
use crate::model::question::Category;

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum SessionRecordError {
    #[error("completed questions ({completed}) exceed total ({total})")]
    CompletedExceedsTotal { total: u32, completed: u32 },

    #[error("completed_at is before started_at")]
    InvalidTimeRange,
}

/// Persisted record of a practice session.
///
/// The interactive flows never write these; the seed tool does, and the
/// dashboard reads them.
#[derive(Debug, Clone, PartialEq)]
pub struct PracticeSessionRecord {
    id: SessionId,
    user_id: UserId,
    category: Option<Category>,
    total_questions: u32,
    completed_questions: u32,
    average_score: Option<f64>,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    duration_seconds: Option<u32>,
}

impl PracticeSessionRecord {
    /// Rehydrate a session record from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns `SessionRecordError` if counts or timestamps are inconsistent.
    #[allow(clippy::too_many_arguments)]
    pub fn from_persisted(
        id: SessionId,
        user_id: UserId,
        category: Option<Category>,
        total_questions: u32,
        completed_questions: u32,
        average_score: Option<f64>,
        started_at: DateTime<Utc>,
        completed_at: Option<DateTime<Utc>>,
        duration_seconds: Option<u32>,
    ) -> Result<Self, SessionRecordError> {
        if completed_questions > total_questions {
            return Err(SessionRecordError::CompletedExceedsTotal {
                total: total_questions,
                completed: completed_questions,
            });
        }
        if let Some(completed_at) = completed_at {
            if completed_at < started_at {
                return Err(SessionRecordError::InvalidTimeRange);
            }
        }

        Ok(Self {
            id,
            user_id,
            category,
            total_questions,
            completed_questions,
            average_score,
            started_at,
            completed_at,
            duration_seconds,
        })
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    #[must_use]
    pub fn category(&self) -> Option<Category> {
        self.category
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    #[must_use]
    pub fn completed_questions(&self) -> u32 {
        self.completed_questions
    }

    #[must_use]
    pub fn average_score(&self) -> Option<f64> {
        self.average_score
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn duration_seconds(&self) -> Option<u32> {
        self.duration_seconds
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}

/// Persisted per-question response within a session. Schema kept for
/// parity with the session records; no interactive flow writes it.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionResponseRecord {
    id: ResponseId,
    session_id: SessionId,
    question_id: QuestionId,
    answer: Option<String>,
    score: Option<f64>,
    feedback: Option<String>,
    time_taken_secs: Option<u32>,
    created_at: DateTime<Utc>,
}

impl SessionResponseRecord {
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        id: ResponseId,
        session_id: SessionId,
        question_id: QuestionId,
        answer: Option<String>,
        score: Option<f64>,
        feedback: Option<String>,
        time_taken_secs: Option<u32>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            session_id,
            question_id,
            answer,
            score,
            feedback,
            time_taken_secs,
            created_at,
        }
    }

    #[must_use]
    pub fn id(&self) -> ResponseId {
        self.id
    }

    #[must_use]
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    #[must_use]
    pub fn question_id(&self) -> QuestionId {
        self.question_id
    }

    #[must_use]
    pub fn answer(&self) -> Option<&str> {
        self.answer.as_deref()
    }

    #[must_use]
    pub fn score(&self) -> Option<f64> {
        self.score
    }

    #[must_use]
    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }

    #[must_use]
    pub fn time_taken_secs(&self) -> Option<u32> {
        self.time_taken_secs
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn record_rejects_completed_above_total() {
        let now = fixed_now();
        let err = PracticeSessionRecord::from_persisted(
            SessionId::generate(),
            UserId::generate(),
            Some(Category::Hr),
            3,
            4,
            None,
            now,
            None,
            None,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SessionRecordError::CompletedExceedsTotal { total: 3, completed: 4 }
        ));
    }

    #[test]
    fn record_rejects_completion_before_start() {
        let now = fixed_now();
        let err = PracticeSessionRecord::from_persisted(
            SessionId::generate(),
            UserId::generate(),
            None,
            5,
            5,
            Some(80.0),
            now,
            Some(now - chrono::Duration::seconds(10)),
            Some(300),
        )
        .unwrap_err();
        assert!(matches!(err, SessionRecordError::InvalidTimeRange));
    }

    #[test]
    fn completed_record_reports_completed() {
        let now = fixed_now();
        let record = PracticeSessionRecord::from_persisted(
            SessionId::generate(),
            UserId::generate(),
            Some(Category::Technical),
            5,
            5,
            Some(72.5),
            now,
            Some(now + chrono::Duration::minutes(10)),
            Some(600),
        )
        .unwrap();
        assert!(record.is_completed());
        assert_eq!(record.average_score(), Some(72.5));
    }
}
