use interview_core::model::{Category, Question};

use super::{SqliteRepository, mapping::map_question_row};
use crate::repository::{QuestionRepository, StorageError};

#[async_trait::async_trait]
impl QuestionRepository for SqliteRepository {
    async fn upsert_question(&self, question: &Question) -> Result<(), StorageError> {
        let tags = serde_json::to_string(question.tags())
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        sqlx::query(
            r"
            INSERT INTO questions (
                id, category, difficulty, prompt, sample_answer, tags,
                time_limit_secs, is_active, created_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ON CONFLICT(id) DO UPDATE SET
                -- keep created_at from the original insert; only update mutable fields
                category = excluded.category,
                difficulty = excluded.difficulty,
                prompt = excluded.prompt,
                sample_answer = excluded.sample_answer,
                tags = excluded.tags,
                time_limit_secs = excluded.time_limit_secs,
                is_active = excluded.is_active
            ",
        )
        .bind(question.id().to_string())
        .bind(question.category().as_str())
        .bind(question.difficulty().as_str())
        .bind(question.prompt().to_owned())
        .bind(question.sample_answer().map(str::to_owned))
        .bind(tags)
        .bind(question.time_limit_secs().map(i64::from))
        .bind(question.is_active())
        .bind(question.created_at())
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }

    async fn list_active(&self, category: Option<Category>) -> Result<Vec<Question>, StorageError> {
        let rows = if let Some(category) = category {
            sqlx::query(
                r"
                SELECT
                    id, category, difficulty, prompt, sample_answer, tags,
                    time_limit_secs, is_active, created_at
                FROM questions
                WHERE is_active = 1 AND category = ?1
                ORDER BY created_at ASC, id ASC
                ",
            )
            .bind(category.as_str())
            .fetch_all(&self.pool)
            .await
        } else {
            sqlx::query(
                r"
                SELECT
                    id, category, difficulty, prompt, sample_answer, tags,
                    time_limit_secs, is_active, created_at
                FROM questions
                WHERE is_active = 1
                ORDER BY created_at ASC, id ASC
                ",
            )
            .fetch_all(&self.pool)
            .await
        }
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut questions = Vec::with_capacity(rows.len());
        for row in rows {
            questions.push(map_question_row(&row)?);
        }
        Ok(questions)
    }
}
