use chrono::{DateTime, NaiveDate, Utc};

use crate::model::ids::{MetricsId, UserId};
use crate::model::question::Category;

/// Per-user daily rollup of practice activity.
///
/// Written by the seed tool; read by the dashboard for the weekly progress
/// chart, category scores and the day streak.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceMetrics {
    id: MetricsId,
    user_id: UserId,
    metric_date: NaiveDate,
    total_sessions: u32,
    total_questions_answered: u32,
    average_score: Option<f64>,
    hr_score: Option<f64>,
    technical_score: Option<f64>,
    behavioral_score: Option<f64>,
    created_at: DateTime<Utc>,
}

impl PerformanceMetrics {
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        id: MetricsId,
        user_id: UserId,
        metric_date: NaiveDate,
        total_sessions: u32,
        total_questions_answered: u32,
        average_score: Option<f64>,
        hr_score: Option<f64>,
        technical_score: Option<f64>,
        behavioral_score: Option<f64>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            metric_date,
            total_sessions,
            total_questions_answered,
            average_score,
            hr_score,
            technical_score,
            behavioral_score,
            created_at,
        }
    }

    #[must_use]
    pub fn id(&self) -> MetricsId {
        self.id
    }

    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    #[must_use]
    pub fn metric_date(&self) -> NaiveDate {
        self.metric_date
    }

    #[must_use]
    pub fn total_sessions(&self) -> u32 {
        self.total_sessions
    }

    #[must_use]
    pub fn total_questions_answered(&self) -> u32 {
        self.total_questions_answered
    }

    #[must_use]
    pub fn average_score(&self) -> Option<f64> {
        self.average_score
    }

    /// Average score for one category, when a rollup exists for it.
    #[must_use]
    pub fn score_for(&self, category: Category) -> Option<f64> {
        match category {
            Category::Hr => self.hr_score,
            Category::Technical => self.technical_score,
            Category::Behavioral => self.behavioral_score,
        }
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
    fn score_for_picks_the_matching_category() {
        let metrics = PerformanceMetrics::new(
            MetricsId::generate(),
            UserId::generate(),
            fixed_now().date_naive(),
            2,
            9,
            Some(74.0),
            Some(78.0),
            Some(65.0),
            None,
            fixed_now(),
        );
        assert_eq!(metrics.score_for(Category::Hr), Some(78.0));
        assert_eq!(metrics.score_for(Category::Technical), Some(65.0));
        assert_eq!(metrics.score_for(Category::Behavioral), None);
    }
}
