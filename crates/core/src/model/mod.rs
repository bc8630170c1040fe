mod ids;
mod metrics;
mod profile;
mod question;
mod session;

pub use ids::{MetricsId, ParseIdError, ProfileId, QuestionId, ResponseId, SessionId, UserId};

pub use question::{
    Category, Difficulty, ParseCategoryError, ParseDifficultyError, Question, QuestionDraft,
    QuestionError, ValidatedQuestion,
};

pub use profile::{AvatarUrl, ExperienceLevel, Profile, ProfileError, ProfileFields};

pub use session::{PracticeSessionRecord, SessionRecordError, SessionResponseRecord};

pub use metrics::PerformanceMetrics;
