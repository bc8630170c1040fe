use services::InterviewSummary;

use super::time_fmt::format_mm_ss;

/// Display strings for the end-of-interview stats row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterviewSummaryVm {
    pub questions_label: String,
    pub total_time_label: String,
    pub avg_label: String,
}

#[must_use]
pub fn map_interview_summary(summary: &InterviewSummary) -> InterviewSummaryVm {
    InterviewSummaryVm {
        questions_label: summary.question_count.to_string(),
        total_time_label: format_mm_ss(summary.total_secs),
        avg_label: format!("{}s", summary.avg_secs_per_question),
    }
}

/// Progress through the question list, as a 0..=100 percentage.
#[must_use]
pub fn progress_percent(current_index: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let done = (current_index + 1).min(total);
    u32::try_from(done * 100 / total).unwrap_or(100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_formats_total_time() {
        let vm = map_interview_summary(&InterviewSummary {
            question_count: 3,
            total_secs: 125,
            avg_secs_per_question: 41,
        });
        assert_eq!(vm.questions_label, "3");
        assert_eq!(vm.total_time_label, "02:05");
        assert_eq!(vm.avg_label, "41s");
    }

    #[test]
    fn zero_question_summary_stays_defined() {
        let vm = map_interview_summary(&InterviewSummary {
            question_count: 0,
            total_secs: 0,
            avg_secs_per_question: 0,
        });
        assert_eq!(vm.avg_label, "0s");
        assert_eq!(progress_percent(0, 0), 0);
    }

    #[test]
    fn progress_moves_with_the_cursor() {
        assert_eq!(progress_percent(0, 4), 25);
        assert_eq!(progress_percent(3, 4), 100);
    }
}
