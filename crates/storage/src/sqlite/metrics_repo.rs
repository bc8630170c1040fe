use interview_core::model::{PerformanceMetrics, UserId};

use super::{SqliteRepository, mapping::map_metrics_row};
use crate::repository::{PerformanceMetricsRepository, StorageError};

#[async_trait::async_trait]
impl PerformanceMetricsRepository for SqliteRepository {
    async fn upsert_daily(&self, metrics: &PerformanceMetrics) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO performance_metrics (
                id, user_id, metric_date, total_sessions, total_questions_answered,
                average_score, hr_score, technical_score, behavioral_score, created_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            ON CONFLICT(user_id, metric_date) DO UPDATE SET
                total_sessions = excluded.total_sessions,
                total_questions_answered = excluded.total_questions_answered,
                average_score = excluded.average_score,
                hr_score = excluded.hr_score,
                technical_score = excluded.technical_score,
                behavioral_score = excluded.behavioral_score
            ",
        )
        .bind(metrics.id().to_string())
        .bind(metrics.user_id().to_string())
        .bind(metrics.metric_date())
        .bind(i64::from(metrics.total_sessions()))
        .bind(i64::from(metrics.total_questions_answered()))
        .bind(metrics.average_score())
        .bind(metrics.score_for(interview_core::model::Category::Hr))
        .bind(metrics.score_for(interview_core::model::Category::Technical))
        .bind(metrics.score_for(interview_core::model::Category::Behavioral))
        .bind(metrics.created_at())
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<PerformanceMetrics>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT
                id, user_id, metric_date, total_sessions, total_questions_answered,
                average_score, hr_score, technical_score, behavioral_score, created_at
            FROM performance_metrics
            WHERE user_id = ?1
            ORDER BY metric_date ASC
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut metrics = Vec::with_capacity(rows.len());
        for row in rows {
            metrics.push(map_metrics_row(&row)?);
        }
        Ok(metrics)
    }
}
