use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::BTreeSet;
use thiserror::Error;

use interview_core::model::{Category, Question};

use crate::capture::CaptureStream;

/// The selectable interview lengths.
pub const QUESTION_COUNT_CHOICES: [usize; 4] = [3, 5, 7, 10];

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InterviewError {
    #[error("select at least one category")]
    NoCategorySelected,

    #[error("unsupported question count: {raw}")]
    InvalidQuestionCount { raw: usize },

    #[error("no questions available for the selected categories")]
    NoQuestions,

    #[error("interview has already started")]
    NotInSetup,

    #[error("no interview is running")]
    NotRunning,
}

//
// ─── SETUP ─────────────────────────────────────────────────────────────────────
//

/// Choices made before an interview starts. These survive a reset so a
/// follow-up interview starts from the same configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterviewSetup {
    categories: BTreeSet<Category>,
    question_count: usize,
    video_enabled: bool,
    audio_enabled: bool,
}

impl Default for InterviewSetup {
    fn default() -> Self {
        Self {
            categories: BTreeSet::from(Category::ALL),
            question_count: 5,
            video_enabled: true,
            audio_enabled: true,
        }
    }
}

impl InterviewSetup {
    /// Toggle a category's membership in the selection.
    pub fn toggle_category(&mut self, category: Category) {
        if !self.categories.remove(&category) {
            self.categories.insert(category);
        }
    }

    #[must_use]
    pub fn has_category(&self, category: Category) -> bool {
        self.categories.contains(&category)
    }

    #[must_use]
    pub fn categories(&self) -> &BTreeSet<Category> {
        &self.categories
    }

    #[must_use]
    pub fn has_selection(&self) -> bool {
        !self.categories.is_empty()
    }

    /// Pick one of the fixed interview lengths.
    ///
    /// # Errors
    ///
    /// Returns `InterviewError::InvalidQuestionCount` for values outside
    /// [`QUESTION_COUNT_CHOICES`].
    pub fn set_question_count(&mut self, count: usize) -> Result<(), InterviewError> {
        if !QUESTION_COUNT_CHOICES.contains(&count) {
            return Err(InterviewError::InvalidQuestionCount { raw: count });
        }
        self.question_count = count;
        Ok(())
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.question_count
    }

    pub fn set_video_enabled(&mut self, enabled: bool) {
        self.video_enabled = enabled;
    }

    pub fn set_audio_enabled(&mut self, enabled: bool) {
        self.audio_enabled = enabled;
    }

    #[must_use]
    pub fn video_enabled(&self) -> bool {
        self.video_enabled
    }

    #[must_use]
    pub fn audio_enabled(&self) -> bool {
        self.audio_enabled
    }

    #[must_use]
    pub fn capture_requested(&self) -> bool {
        self.video_enabled || self.audio_enabled
    }
}

//
// ─── FLOW ──────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterviewStage {
    Setup,
    Interview,
    Complete,
}

/// Result of [`InterviewFlow::next_question`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterviewStep {
    Advanced,
    Completed,
}

/// End-of-interview aggregate shown on the complete stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterviewSummary {
    pub question_count: usize,
    pub total_secs: u32,
    /// Integer average; 0 when no questions were asked.
    pub avg_secs_per_question: u32,
}

/// One row of the end-of-interview review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterviewReviewItem {
    pub prompt: String,
    /// `None` marks a question left without an answer.
    pub answer: Option<String>,
}

/// Mock interview session: `Setup → Interview → Complete`, with an explicit
/// reset back to `Setup`.
///
/// Owns the ephemeral state of one run — the drawn question list, the answer
/// per index, both second counters, and any acquired capture stream. Nothing
/// is persisted; the outcome is gone once the flow is dropped or reset.
pub struct InterviewFlow {
    stage: InterviewStage,
    setup: InterviewSetup,
    questions: Vec<Question>,
    current: usize,
    answers: Vec<String>,
    total_secs: u32,
    question_secs: u32,
    timer_running: bool,
    stream: Option<CaptureStream>,
}

impl Default for InterviewFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl InterviewFlow {
    #[must_use]
    pub fn new() -> Self {
        Self {
            stage: InterviewStage::Setup,
            setup: InterviewSetup::default(),
            questions: Vec::new(),
            current: 0,
            answers: Vec::new(),
            total_secs: 0,
            question_secs: 0,
            timer_running: false,
            stream: None,
        }
    }

    #[must_use]
    pub fn stage(&self) -> InterviewStage {
        self.stage
    }

    #[must_use]
    pub fn setup(&self) -> &InterviewSetup {
        &self.setup
    }

    pub fn setup_mut(&mut self) -> &mut InterviewSetup {
        &mut self.setup
    }

    /// Draw this interview's question list from the pool: keep the selected
    /// categories, shuffle, take the configured prefix.
    ///
    /// The flow stays in `Setup`; a failed plan aborts the transition.
    ///
    /// # Errors
    ///
    /// Returns `NoCategorySelected` when the selection is empty and
    /// `NoQuestions` when the filtered pool is empty.
    pub fn plan<R: Rng + ?Sized>(
        &self,
        pool: &[Question],
        rng: &mut R,
    ) -> Result<Vec<Question>, InterviewError> {
        if !self.setup.has_selection() {
            return Err(InterviewError::NoCategorySelected);
        }

        let mut drawn: Vec<Question> = pool
            .iter()
            .filter(|q| self.setup.categories.contains(&q.category()))
            .cloned()
            .collect();
        drawn.shuffle(rng);
        drawn.truncate(self.setup.question_count);

        if drawn.is_empty() {
            return Err(InterviewError::NoQuestions);
        }
        Ok(drawn)
    }

    /// [`InterviewFlow::plan`] with the thread-local generator.
    ///
    /// # Errors
    ///
    /// Same as [`InterviewFlow::plan`].
    pub fn plan_default(&self, pool: &[Question]) -> Result<Vec<Question>, InterviewError> {
        self.plan(pool, &mut rand::rng())
    }

    /// Force both capture toggles off, after a failed device acquisition.
    pub fn disable_capture(&mut self) {
        self.setup.video_enabled = false;
        self.setup.audio_enabled = false;
    }

    /// Enter the interview stage with a planned question list and an
    /// optionally acquired capture stream.
    ///
    /// # Errors
    ///
    /// Returns `NotInSetup` outside of setup and `NoQuestions` for an empty
    /// list.
    pub fn begin(
        &mut self,
        questions: Vec<Question>,
        stream: Option<CaptureStream>,
    ) -> Result<(), InterviewError> {
        if self.stage != InterviewStage::Setup {
            return Err(InterviewError::NotInSetup);
        }
        if questions.is_empty() {
            return Err(InterviewError::NoQuestions);
        }

        self.answers = vec![String::new(); questions.len()];
        self.questions = questions;
        self.current = 0;
        self.total_secs = 0;
        self.question_secs = 0;
        self.timer_running = true;
        self.stream = stream;
        self.stage = InterviewStage::Interview;
        Ok(())
    }

    /// Advance both counters by one second. Both move in lockstep from the
    /// same tick; outside a running interview this is a no-op.
    pub fn tick(&mut self) {
        if self.stage == InterviewStage::Interview && self.timer_running {
            self.total_secs += 1;
            self.question_secs += 1;
        }
    }

    /// Store the answer for the current question and move on. At the last
    /// index this finishes the interview instead of advancing.
    ///
    /// # Errors
    ///
    /// Returns `NotRunning` outside the interview stage.
    pub fn next_question(&mut self, answer: &str) -> Result<InterviewStep, InterviewError> {
        if self.stage != InterviewStage::Interview {
            return Err(InterviewError::NotRunning);
        }

        self.answers[self.current] = answer.to_string();
        if self.current + 1 < self.questions.len() {
            self.current += 1;
            self.question_secs = 0;
            Ok(InterviewStep::Advanced)
        } else {
            self.complete();
            Ok(InterviewStep::Completed)
        }
    }

    /// End the interview early (or from the last question): stop the
    /// counters, release the capture tracks, keep the in-progress answer.
    ///
    /// # Errors
    ///
    /// Returns `NotRunning` outside the interview stage.
    pub fn finish(&mut self, answer: &str) -> Result<(), InterviewError> {
        if self.stage != InterviewStage::Interview {
            return Err(InterviewError::NotRunning);
        }
        self.answers[self.current] = answer.to_string();
        self.complete();
        Ok(())
    }

    fn complete(&mut self) {
        self.timer_running = false;
        if let Some(mut stream) = self.stream.take() {
            stream.stop_all();
        }
        self.stage = InterviewStage::Complete;
    }

    /// Back to setup. Counters, answers and the drawn list are cleared; the
    /// setup choices stay as they were.
    pub fn reset(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop_all();
        }
        self.stage = InterviewStage::Setup;
        self.questions.clear();
        self.answers.clear();
        self.current = 0;
        self.total_secs = 0;
        self.question_secs = 0;
        self.timer_running = false;
    }

    #[must_use]
    pub fn summary(&self) -> InterviewSummary {
        let question_count = self.questions.len();
        let avg_secs_per_question = if question_count == 0 {
            0
        } else {
            self.total_secs / u32::try_from(question_count).unwrap_or(u32::MAX)
        };
        InterviewSummary {
            question_count,
            total_secs: self.total_secs,
            avg_secs_per_question,
        }
    }

    #[must_use]
    pub fn review(&self) -> Vec<InterviewReviewItem> {
        self.questions
            .iter()
            .zip(&self.answers)
            .map(|(question, answer)| InterviewReviewItem {
                prompt: question.prompt().to_string(),
                answer: (!answer.trim().is_empty()).then(|| answer.clone()),
            })
            .collect()
    }

    // ─── Getters ───────────────────────────────────────────────────────────

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.current + 1 == self.questions.len()
    }

    /// The answer saved at `index` so far.
    #[must_use]
    pub fn saved_answer(&self, index: usize) -> Option<&str> {
        self.answers.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn total_secs(&self) -> u32 {
        self.total_secs
    }

    #[must_use]
    pub fn question_secs(&self) -> u32 {
        self.question_secs
    }

    #[must_use]
    pub fn is_timer_running(&self) -> bool {
        self.timer_running
    }

    #[must_use]
    pub fn capture_stream(&self) -> Option<&CaptureStream> {
        self.stream.as_ref()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::{CaptureTrack, TrackKind};
    use interview_core::model::{Difficulty, QuestionDraft, QuestionId};
    use interview_core::time::fixed_now;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn build_question(category: Category, prompt: &str) -> Question {
        QuestionDraft {
            category,
            difficulty: Difficulty::Medium,
            prompt: prompt.to_string(),
            sample_answer: None,
            tags: Vec::new(),
            time_limit_secs: None,
        }
        .validate(fixed_now())
        .unwrap()
        .assign_id(QuestionId::generate())
    }

    fn pool_two_per_category() -> Vec<Question> {
        let mut pool = Vec::new();
        for category in Category::ALL {
            pool.push(build_question(category, &format!("{category} one")));
            pool.push(build_question(category, &format!("{category} two")));
        }
        pool
    }

    #[test]
    fn plan_respects_count_and_categories() {
        let pool = pool_two_per_category();
        let mut flow = InterviewFlow::new();
        flow.setup_mut().toggle_category(Category::Behavioral);
        flow.setup_mut().set_question_count(3).unwrap();

        let mut rng = StdRng::seed_from_u64(7);
        let drawn = flow.plan(&pool, &mut rng).unwrap();
        assert_eq!(drawn.len(), 3);
        assert!(
            drawn
                .iter()
                .all(|q| matches!(q.category(), Category::Hr | Category::Technical))
        );
    }

    #[test]
    fn plan_is_capped_by_the_filtered_pool() {
        let pool = pool_two_per_category();
        let mut flow = InterviewFlow::new();
        flow.setup_mut().toggle_category(Category::Technical);
        flow.setup_mut().toggle_category(Category::Behavioral);
        flow.setup_mut().set_question_count(10).unwrap();

        let mut rng = StdRng::seed_from_u64(1);
        let drawn = flow.plan(&pool, &mut rng).unwrap();
        // Only the two HR questions remain.
        assert_eq!(drawn.len(), 2);
    }

    #[test]
    fn plan_requires_a_category() {
        let pool = pool_two_per_category();
        let mut flow = InterviewFlow::new();
        for category in Category::ALL {
            flow.setup_mut().toggle_category(category);
        }
        let mut rng = StdRng::seed_from_u64(1);
        let err = flow.plan(&pool, &mut rng).unwrap_err();
        assert!(matches!(err, InterviewError::NoCategorySelected));
        assert_eq!(flow.stage(), InterviewStage::Setup);
    }

    #[test]
    fn empty_filtered_pool_aborts_the_transition() {
        let pool: Vec<Question> = vec![build_question(Category::Hr, "only hr")];
        let mut flow = InterviewFlow::new();
        // Deselect HR; the remaining categories have no questions in the pool.
        flow.setup_mut().toggle_category(Category::Hr);
        let mut rng = StdRng::seed_from_u64(1);
        let err = flow.plan(&pool, &mut rng).unwrap_err();
        assert!(matches!(err, InterviewError::NoQuestions));
        assert_eq!(flow.stage(), InterviewStage::Setup);
    }

    #[test]
    fn question_count_choices_are_enforced() {
        let mut setup = InterviewSetup::default();
        assert!(setup.set_question_count(7).is_ok());
        let err = setup.set_question_count(4).unwrap_err();
        assert!(matches!(err, InterviewError::InvalidQuestionCount { raw: 4 }));
        assert_eq!(setup.question_count(), 7);
    }

    #[test]
    fn advancing_through_all_questions_completes() {
        let pool = pool_two_per_category();
        let mut flow = InterviewFlow::new();
        let mut rng = StdRng::seed_from_u64(3);
        let drawn = flow.plan(&pool, &mut rng).unwrap();
        let n = drawn.len();
        flow.begin(drawn, None).unwrap();

        for i in 0..n - 1 {
            let step = flow.next_question(&format!("answer {i}")).unwrap();
            assert_eq!(step, InterviewStep::Advanced);
        }
        assert_eq!(flow.current_index(), n - 1);
        assert_eq!(flow.stage(), InterviewStage::Interview);

        let step = flow.next_question("last answer").unwrap();
        assert_eq!(step, InterviewStep::Completed);
        assert_eq!(flow.stage(), InterviewStage::Complete);
        assert_eq!(flow.saved_answer(n - 1), Some("last answer"));
    }

    #[test]
    fn total_elapsed_equals_tick_count() {
        let pool = pool_two_per_category();
        let mut flow = InterviewFlow::new();
        flow.setup_mut().set_question_count(3).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let drawn = flow.plan(&pool, &mut rng).unwrap();
        flow.begin(drawn, None).unwrap();

        // Ticks before the interview started must not have counted.
        for _ in 0..4 {
            flow.tick();
        }
        flow.next_question("one").unwrap();
        assert_eq!(flow.question_secs(), 0);
        for _ in 0..6 {
            flow.tick();
        }
        flow.next_question("two").unwrap();
        flow.next_question("three").unwrap();

        assert_eq!(flow.stage(), InterviewStage::Complete);
        assert_eq!(flow.total_secs(), 10);

        // Counters are frozen after completion.
        flow.tick();
        assert_eq!(flow.total_secs(), 10);
    }

    #[test]
    fn setup_to_complete_scenario_with_two_categories() {
        // 6-question pool, two per category; select hr + technical, ask for 3.
        let pool = pool_two_per_category();
        let mut flow = InterviewFlow::new();
        flow.setup_mut().toggle_category(Category::Behavioral);
        flow.setup_mut().set_question_count(3).unwrap();

        let mut rng = StdRng::seed_from_u64(11);
        let drawn = flow.plan(&pool, &mut rng).unwrap();
        assert_eq!(drawn.len(), 3);
        assert!(
            drawn
                .iter()
                .all(|q| matches!(q.category(), Category::Hr | Category::Technical))
        );

        flow.begin(drawn, None).unwrap();
        let mut ticks = 0;
        for answer in ["a", "b", "c"] {
            for _ in 0..3 {
                flow.tick();
                ticks += 1;
            }
            flow.next_question(answer).unwrap();
        }
        assert_eq!(flow.stage(), InterviewStage::Complete);
        assert_eq!(flow.summary().total_secs, ticks);
    }

    #[test]
    fn finish_releases_capture_tracks() {
        let pool = pool_two_per_category();
        let mut flow = InterviewFlow::new();
        flow.setup_mut().set_question_count(3).unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        let drawn = flow.plan(&pool, &mut rng).unwrap();

        let stream = CaptureStream::new(vec![
            CaptureTrack::new(TrackKind::Video),
            CaptureTrack::new(TrackKind::Audio),
        ]);
        flow.begin(drawn, Some(stream)).unwrap();
        assert!(flow.capture_stream().is_some());

        flow.finish("ended early").unwrap();
        assert_eq!(flow.stage(), InterviewStage::Complete);
        // The stream has been taken and stopped.
        assert!(flow.capture_stream().is_none());
        assert!(!flow.is_timer_running());
        assert_eq!(flow.saved_answer(0), Some("ended early"));
    }

    #[test]
    fn summary_guards_the_zero_question_division() {
        let flow = InterviewFlow::new();
        let summary = flow.summary();
        assert_eq!(summary.question_count, 0);
        assert_eq!(summary.avg_secs_per_question, 0);
    }

    #[test]
    fn review_marks_unanswered_questions() {
        let pool = pool_two_per_category();
        let mut flow = InterviewFlow::new();
        flow.setup_mut().set_question_count(3).unwrap();
        let mut rng = StdRng::seed_from_u64(4);
        let drawn = flow.plan(&pool, &mut rng).unwrap();
        flow.begin(drawn, None).unwrap();

        flow.next_question("first answer").unwrap();
        flow.finish("  ").unwrap();

        let review = flow.review();
        assert_eq!(review.len(), 3);
        assert_eq!(review[0].answer.as_deref(), Some("first answer"));
        assert_eq!(review[1].answer, None);
        assert_eq!(review[2].answer, None);
    }

    #[test]
    fn reset_returns_to_setup_keeping_choices() {
        let pool = pool_two_per_category();
        let mut flow = InterviewFlow::new();
        flow.setup_mut().toggle_category(Category::Hr);
        flow.setup_mut().set_question_count(3).unwrap();
        flow.setup_mut().set_video_enabled(false);

        let mut rng = StdRng::seed_from_u64(6);
        let drawn = flow.plan(&pool, &mut rng).unwrap();
        flow.begin(drawn, None).unwrap();
        flow.tick();
        flow.finish("done").unwrap();

        flow.reset();
        assert_eq!(flow.stage(), InterviewStage::Setup);
        assert_eq!(flow.total_secs(), 0);
        assert_eq!(flow.total_questions(), 0);
        assert!(!flow.setup().has_category(Category::Hr));
        assert_eq!(flow.setup().question_count(), 3);
        assert!(!flow.setup().video_enabled());
    }

    #[test]
    fn begin_rejects_reentry_and_step_rejects_setup() {
        let pool = pool_two_per_category();
        let mut flow = InterviewFlow::new();
        assert!(matches!(
            flow.next_question("x").unwrap_err(),
            InterviewError::NotRunning
        ));

        let mut rng = StdRng::seed_from_u64(9);
        let drawn = flow.plan(&pool, &mut rng).unwrap();
        flow.begin(drawn.clone(), None).unwrap();
        assert!(matches!(
            flow.begin(drawn, None).unwrap_err(),
            InterviewError::NotInSetup
        ));
    }
}
