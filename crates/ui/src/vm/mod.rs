mod interview_vm;
mod markdown_vm;
mod practice_vm;
mod profile_vm;
mod time_fmt;

pub use interview_vm::{InterviewSummaryVm, map_interview_summary, progress_percent};
pub use markdown_vm::{markdown_to_html, sanitize_html};
pub use practice_vm::{category_badge_class, countdown_class, difficulty_badge_class};
pub use profile_vm::initials;
pub use time_fmt::{format_m_ss, format_mm_ss};
