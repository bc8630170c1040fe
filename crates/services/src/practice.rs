use std::collections::BTreeSet;
use thiserror::Error;

use interview_core::model::Question;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PracticeError {
    #[error("no questions available for practice")]
    Empty,

    #[error("answer text cannot be empty")]
    EmptyAnswer,

    #[error("question already completed")]
    AlreadyCompleted,
}

/// Outcome of advancing the per-question countdown by one second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No countdown is running.
    Idle,
    /// Countdown advanced; seconds remaining.
    Counting(u32),
    /// The countdown just hit zero. Reported exactly once.
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Countdown {
    remaining: u32,
    running: bool,
}

//
// ─── PRACTICE FLOW ─────────────────────────────────────────────────────────────
//

/// In-memory walkthrough of one category's questions.
///
/// Steps through the list one question at a time, tracking the set of
/// completed indices and an optional per-question countdown. Nothing here is
/// persisted; the whole flow is discarded on navigation or reset.
#[derive(Debug)]
pub struct PracticeFlow {
    questions: Vec<Question>,
    current: usize,
    started: bool,
    completed: BTreeSet<usize>,
    show_sample: bool,
    countdown: Option<Countdown>,
}

impl PracticeFlow {
    /// Create a flow over a non-empty question list.
    ///
    /// # Errors
    ///
    /// Returns `PracticeError::Empty` if no questions are provided.
    pub fn new(questions: Vec<Question>) -> Result<Self, PracticeError> {
        if questions.is_empty() {
            return Err(PracticeError::Empty);
        }
        Ok(Self {
            questions,
            current: 0,
            started: false,
            completed: BTreeSet::new(),
            show_sample: false,
            countdown: None,
        })
    }

    /// Begin the walkthrough, arming the countdown for the first question.
    pub fn start(&mut self) {
        self.started = true;
        self.load_countdown(true);
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Advance to the next question. Clamped at the last index; crossing a
    /// boundary loads and restarts the new question's countdown.
    pub fn next(&mut self) {
        if self.current + 1 < self.questions.len() {
            self.current += 1;
            self.show_sample = false;
            self.load_countdown(true);
        }
    }

    /// Step back one question. Clamped at index zero; the previous
    /// question's countdown is loaded but left paused.
    pub fn previous(&mut self) {
        if self.current > 0 {
            self.current -= 1;
            self.show_sample = false;
            self.load_countdown(false);
        }
    }

    /// Jump straight to `index`. Out-of-range jumps are ignored; any running
    /// countdown stops.
    pub fn jump_to(&mut self, index: usize) {
        if index < self.questions.len() {
            self.current = index;
            self.show_sample = false;
            self.countdown = None;
        }
    }

    /// Submit the answer for the current question.
    ///
    /// Marks the index completed, reveals the sample answer, and stops the
    /// countdown. Completion is one-way per index.
    ///
    /// # Errors
    ///
    /// Returns `PracticeError::EmptyAnswer` for blank text and
    /// `PracticeError::AlreadyCompleted` when the index was already
    /// submitted; neither changes any state.
    pub fn submit_answer(&mut self, answer: &str) -> Result<(), PracticeError> {
        if answer.trim().is_empty() {
            return Err(PracticeError::EmptyAnswer);
        }
        if self.completed.contains(&self.current) {
            return Err(PracticeError::AlreadyCompleted);
        }

        self.completed.insert(self.current);
        self.show_sample = true;
        self.stop_countdown();
        Ok(())
    }

    /// Reveal the sample answer without completing the question.
    pub fn reveal_sample(&mut self) {
        self.show_sample = true;
    }

    /// Advance the countdown by one second.
    ///
    /// When the countdown reaches zero it stops and `Expired` is returned
    /// exactly once; later ticks are `Idle`. No answer is auto-submitted.
    pub fn tick(&mut self) -> TickOutcome {
        let Some(countdown) = self.countdown.as_mut() else {
            return TickOutcome::Idle;
        };
        if !countdown.running {
            return TickOutcome::Idle;
        }

        countdown.remaining = countdown.remaining.saturating_sub(1);
        if countdown.remaining == 0 {
            countdown.running = false;
            TickOutcome::Expired
        } else {
            TickOutcome::Counting(countdown.remaining)
        }
    }

    /// Clear all progress and return to the first question.
    pub fn reset(&mut self) {
        self.current = 0;
        self.started = false;
        self.completed.clear();
        self.show_sample = false;
        self.countdown = None;
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
    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    #[must_use]
    pub fn is_current_completed(&self) -> bool {
        self.completed.contains(&self.current)
    }

    #[must_use]
    pub fn is_index_completed(&self, index: usize) -> bool {
        self.completed.contains(&index)
    }

    /// Completion is derived: every index has been submitted.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed.len() == self.questions.len()
    }

    #[must_use]
    pub fn show_sample(&self) -> bool {
        self.show_sample
    }

    /// Seconds remaining while a countdown is running.
    #[must_use]
    pub fn countdown_remaining(&self) -> Option<u32> {
        self.countdown
            .filter(|c| c.running)
            .map(|c| c.remaining)
    }

    #[must_use]
    pub fn countdown_running(&self) -> bool {
        self.countdown.is_some_and(|c| c.running)
    }

    // ─── Internals ─────────────────────────────────────────────────────────

    fn load_countdown(&mut self, running: bool) {
        self.countdown = self
            .current_question()
            .and_then(Question::time_limit_secs)
            .map(|remaining| Countdown { remaining, running });
    }

    fn stop_countdown(&mut self) {
        if let Some(countdown) = self.countdown.as_mut() {
            countdown.running = false;
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
