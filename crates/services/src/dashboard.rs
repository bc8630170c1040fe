use chrono::{Datelike, Duration, NaiveDate};
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;

use interview_core::Clock;
use interview_core::model::{Category, PerformanceMetrics, UserId};
use storage::repository::{PerformanceMetricsRepository, PracticeSessionRepository, StorageError};

/// Errors emitted by `DashboardService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DashboardError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Headline numbers for the dashboard tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardStats {
    pub total_sessions: u32,
    pub total_questions: u32,
    /// Rounded percentage over completed sessions; 0 when none completed.
    pub average_score: u32,
    /// Consecutive days with recorded activity, ending today or yesterday.
    pub streak_days: u32,
}

/// One point of the weekly progress chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressPoint {
    pub label: String,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryScore {
    pub category: Category,
    pub score: f64,
}

// Sample series shown until real metrics exist for the account.
const SAMPLE_WEEKLY: [(&str, f64); 7] = [
    ("Mon", 65.0),
    ("Tue", 72.0),
    ("Wed", 68.0),
    ("Thu", 78.0),
    ("Fri", 82.0),
    ("Sat", 85.0),
    ("Sun", 88.0),
];

const SAMPLE_CATEGORY: [(Category, f64); 3] = [
    (Category::Hr, 78.0),
    (Category::Technical, 65.0),
    (Category::Behavioral, 82.0),
];

/// Read-only aggregation over persisted sessions and metric rollups.
#[derive(Clone)]
pub struct DashboardService {
    clock: Clock,
    sessions: Arc<dyn PracticeSessionRepository>,
    metrics: Arc<dyn PerformanceMetricsRepository>,
}

impl DashboardService {
    #[must_use]
    pub fn new(
        clock: Clock,
        sessions: Arc<dyn PracticeSessionRepository>,
        metrics: Arc<dyn PerformanceMetricsRepository>,
    ) -> Self {
        Self {
            clock,
            sessions,
            metrics,
        }
    }

    /// Headline stats from the user's persisted session records.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError` for storage failures.
    pub async fn stats(&self, user_id: UserId) -> Result<DashboardStats, DashboardError> {
        let sessions = self.sessions.list_for_user(user_id).await?;
        let metrics = self.metrics.list_for_user(user_id).await?;

        let total_questions = sessions
            .iter()
            .map(interview_core::model::PracticeSessionRecord::completed_questions)
            .sum();

        let completed: Vec<_> = sessions.iter().filter(|s| s.is_completed()).collect();
        let average_score = if completed.is_empty() {
            0
        } else {
            let sum: f64 = completed
                .iter()
                .map(|s| s.average_score().unwrap_or(0.0))
                .sum();
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let rounded = (sum / completed.len() as f64).round().max(0.0) as u32;
            rounded
        };

        Ok(DashboardStats {
            total_sessions: u32::try_from(sessions.len()).unwrap_or(u32::MAX),
            total_questions,
            average_score,
            streak_days: self.streak(&metrics),
        })
    }

    /// Last seven recorded daily scores, oldest first. Falls back to a
    /// sample series when the account has no metrics yet.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError` for storage failures.
    pub async fn weekly_progress(
        &self,
        user_id: UserId,
    ) -> Result<Vec<ProgressPoint>, DashboardError> {
        let metrics = self.metrics.list_for_user(user_id).await?;
        if metrics.is_empty() {
            return Ok(SAMPLE_WEEKLY
                .iter()
                .map(|(label, score)| ProgressPoint {
                    label: (*label).to_string(),
                    score: *score,
                })
                .collect());
        }

        let start = metrics.len().saturating_sub(7);
        Ok(metrics[start..]
            .iter()
            .map(|m| ProgressPoint {
                label: weekday_label(m.metric_date()),
                score: m.average_score().unwrap_or(0.0),
            })
            .collect())
    }

    /// Latest per-category score, newest rollup wins. Sample values when no
    /// metrics exist.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError` for storage failures.
    pub async fn category_scores(
        &self,
        user_id: UserId,
    ) -> Result<Vec<CategoryScore>, DashboardError> {
        let metrics = self.metrics.list_for_user(user_id).await?;
        if metrics.is_empty() {
            return Ok(SAMPLE_CATEGORY
                .iter()
                .map(|(category, score)| CategoryScore {
                    category: *category,
                    score: *score,
                })
                .collect());
        }

        Ok(Category::ALL
            .iter()
            .map(|category| CategoryScore {
                category: *category,
                score: metrics
                    .iter()
                    .rev()
                    .find_map(|m| m.score_for(*category))
                    .unwrap_or(0.0),
            })
            .collect())
    }

    fn streak(&self, metrics: &[PerformanceMetrics]) -> u32 {
        let days: BTreeSet<NaiveDate> = metrics.iter().map(PerformanceMetrics::metric_date).collect();
        let today = self.clock.now().date_naive();

        let mut cursor = if days.contains(&today) {
            today
        } else if days.contains(&(today - Duration::days(1))) {
            today - Duration::days(1)
        } else {
            return 0;
        };

        let mut streak = 0;
        while days.contains(&cursor) {
            streak += 1;
            cursor -= Duration::days(1);
        }
        streak
    }
}

fn weekday_label(date: NaiveDate) -> String {
    match date.weekday() {
        chrono::Weekday::Mon => "Mon",
        chrono::Weekday::Tue => "Tue",
        chrono::Weekday::Wed => "Wed",
        chrono::Weekday::Thu => "Thu",
        chrono::Weekday::Fri => "Fri",
        chrono::Weekday::Sat => "Sat",
        chrono::Weekday::Sun => "Sun",
    }
    .to_string()
}
