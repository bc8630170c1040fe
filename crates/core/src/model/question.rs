use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::ids::QuestionId;

//
// ─── CATEGORY & DIFFICULTY ─────────────────────────────────────────────────────
//

/// Question category, partitioning the pool.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Hr,
    Technical,
    Behavioral,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Hr, Category::Technical, Category::Behavioral];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Hr => "hr",
            Category::Technical => "technical",
            Category::Behavioral => "behavioral",
        }
    }

    /// Human-facing label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Category::Hr => "HR",
            Category::Technical => "Technical",
            Category::Behavioral => "Behavioral",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown question category: {raw}")]
pub struct ParseCategoryError {
    pub raw: String,
}

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hr" => Ok(Category::Hr),
            "technical" => Ok(Category::Technical),
            "behavioral" => Ok(Category::Behavioral),
            other => Err(ParseCategoryError {
                raw: other.to_string(),
            }),
        }
    }
}

/// Question difficulty. Display attribute only; nothing scores by it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown difficulty: {raw}")]
pub struct ParseDifficultyError {
    pub raw: String,
}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(ParseDifficultyError {
                raw: other.to_string(),
            }),
        }
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub category: Category,
    pub difficulty: Difficulty,
    pub prompt: String,
    pub sample_answer: Option<String>,
    pub tags: Vec<String>,
    pub time_limit_secs: Option<u32>,
}

impl QuestionDraft {
    /// Validate the draft into an id-less question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyPrompt` if the prompt is blank after
    /// trimming, and `QuestionError::ZeroTimeLimit` for a zero time limit.
    pub fn validate(self, now: DateTime<Utc>) -> Result<ValidatedQuestion, QuestionError> {
        let prompt = self.prompt.trim().to_string();
        if prompt.is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }

        if self.time_limit_secs == Some(0) {
            return Err(QuestionError::ZeroTimeLimit);
        }

        let sample_answer = self
            .sample_answer
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let tags = self
            .tags
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();

        Ok(ValidatedQuestion {
            category: self.category,
            difficulty: self.difficulty,
            prompt,
            sample_answer,
            tags,
            time_limit_secs: self.time_limit_secs,
            created_at: now,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedQuestion {
    category: Category,
    difficulty: Difficulty,
    prompt: String,
    sample_answer: Option<String>,
    tags: Vec<String>,
    time_limit_secs: Option<u32>,
    created_at: DateTime<Utc>,
}

impl ValidatedQuestion {
    #[must_use]
    pub fn assign_id(self, id: QuestionId) -> Question {
        Question {
            id,
            category: self.category,
            difficulty: self.difficulty,
            prompt: self.prompt,
            sample_answer: self.sample_answer,
            tags: self.tags,
            time_limit_secs: self.time_limit_secs,
            is_active: true,
            created_at: self.created_at,
        }
    }
}

/// A bank question. Read-only from the application's perspective: only the
/// seed tool writes these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    category: Category,
    difficulty: Difficulty,
    prompt: String,
    sample_answer: Option<String>,
    tags: Vec<String>,
    time_limit_secs: Option<u32>,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl Question {
    /// Rehydrate a question from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the persisted fields fail validation.
    #[allow(clippy::too_many_arguments)]
    pub fn from_persisted(
        id: QuestionId,
        category: Category,
        difficulty: Difficulty,
        prompt: String,
        sample_answer: Option<String>,
        tags: Vec<String>,
        time_limit_secs: Option<u32>,
        is_active: bool,
        created_at: DateTime<Utc>,
    ) -> Result<Self, QuestionError> {
        let validated = QuestionDraft {
            category,
            difficulty,
            prompt,
            sample_answer,
            tags,
            time_limit_secs,
        }
        .validate(created_at)?;

        let mut question = validated.assign_id(id);
        question.is_active = is_active;
        Ok(question)
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn sample_answer(&self) -> Option<&str> {
        self.sample_answer.as_deref()
    }

    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    #[must_use]
    pub fn time_limit_secs(&self) -> Option<u32> {
        self.time_limit_secs
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

//
// ─── VALIDATION ERRORS ─────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("time limit must be positive when present")]
    ZeroTimeLimit,
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
