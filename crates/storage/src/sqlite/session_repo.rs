use interview_core::model::{PracticeSessionRecord, SessionId, SessionResponseRecord, UserId};

use super::{
    SqliteRepository,
    mapping::{map_response_row, map_session_row},
};
use crate::repository::{PracticeSessionRepository, SessionResponseRepository, StorageError};

fn write_err(err: sqlx::Error) -> StorageError {
    if err
        .as_database_error()
        .is_some_and(|db| db.is_unique_violation())
    {
        StorageError::Conflict
    } else {
        StorageError::Connection(err.to_string())
    }
}

#[async_trait::async_trait]
impl PracticeSessionRepository for SqliteRepository {
    async fn insert_session(&self, session: &PracticeSessionRecord) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO practice_sessions (
                id, user_id, category, total_questions, completed_questions,
                average_score, started_at, completed_at, duration_seconds
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ",
        )
        .bind(session.id().to_string())
        .bind(session.user_id().to_string())
        .bind(session.category().map(|c| c.as_str().to_owned()))
        .bind(i64::from(session.total_questions()))
        .bind(i64::from(session.completed_questions()))
        .bind(session.average_score())
        .bind(session.started_at())
        .bind(session.completed_at())
        .bind(session.duration_seconds().map(i64::from))
        .execute(&self.pool)
        .await
        .map_err(write_err)?;

        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<PracticeSessionRecord>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT
                id, user_id, category, total_questions, completed_questions,
                average_score, started_at, completed_at, duration_seconds
            FROM practice_sessions
            WHERE user_id = ?1
            ORDER BY started_at ASC, id ASC
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut sessions = Vec::with_capacity(rows.len());
        for row in rows {
            sessions.push(map_session_row(&row)?);
        }
        Ok(sessions)
    }
}

#[async_trait::async_trait]
impl SessionResponseRepository for SqliteRepository {
    async fn insert_response(&self, response: &SessionResponseRecord) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO session_responses (
                id, session_id, question_id, user_answer, score,
                feedback, time_taken_seconds, created_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ",
        )
        .bind(response.id().to_string())
        .bind(response.session_id().to_string())
        .bind(response.question_id().to_string())
        .bind(response.answer().map(str::to_owned))
        .bind(response.score())
        .bind(response.feedback().map(str::to_owned))
        .bind(response.time_taken_secs().map(i64::from))
        .bind(response.created_at())
        .execute(&self.pool)
        .await
        .map_err(write_err)?;

        Ok(())
    }

    async fn list_for_session(
        &self,
        session_id: SessionId,
    ) -> Result<Vec<SessionResponseRecord>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT
                id, session_id, question_id, user_answer, score,
                feedback, time_taken_seconds, created_at
            FROM session_responses
            WHERE session_id = ?1
            ORDER BY created_at ASC, id ASC
            ",
        )
        .bind(session_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut responses = Vec::with_capacity(rows.len());
        for row in rows {
            responses.push(map_response_row(&row)?);
        }
        Ok(responses)
    }
}
