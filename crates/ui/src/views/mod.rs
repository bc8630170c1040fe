mod dashboard;
mod interview;
mod landing;
mod practice;
mod profile;
mod sign_in;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use dashboard::DashboardView;
pub use interview::InterviewView;
pub use landing::LandingView;
pub use practice::PracticeView;
pub use profile::ProfileView;
pub use sign_in::SignInView;
pub use state::{ViewError, ViewState, view_state_from_resource};
