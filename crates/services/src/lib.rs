#![forbid(unsafe_code)]

pub mod auth;
pub mod capture;
pub mod dashboard;
pub mod interview;
pub mod practice;
pub mod profile_service;
pub mod question_service;

pub use interview_core::Clock;

pub use auth::{AuthError, AuthService, IdentityProvider, LocalIdentityProvider, UserIdentity};
pub use capture::{
    CaptureError, CaptureStream, CaptureTrack, MediaCapture, NullCapture, TrackKind,
};
pub use dashboard::{
    CategoryScore, DashboardError, DashboardService, DashboardStats, ProgressPoint,
};
pub use interview::{
    InterviewError, InterviewFlow, InterviewReviewItem, InterviewSetup, InterviewStage,
    InterviewStep, InterviewSummary, QUESTION_COUNT_CHOICES,
};
pub use practice::{PracticeError, PracticeFlow, TickOutcome};
pub use profile_service::{ProfileService, ProfileServiceError};
pub use question_service::{QuestionService, QuestionServiceError};
