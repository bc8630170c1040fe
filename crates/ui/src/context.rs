use std::sync::Arc;

use services::{AuthService, DashboardService, MediaCapture, ProfileService, QuestionService};

/// Everything the views need, handed in by the composition root.
pub trait UiApp: Send + Sync {
    fn auth(&self) -> Arc<AuthService>;
    fn questions(&self) -> Arc<QuestionService>;
    fn profiles(&self) -> Arc<ProfileService>;
    fn dashboard(&self) -> Arc<DashboardService>;
    fn capture(&self) -> Arc<dyn MediaCapture>;
}

#[derive(Clone)]
pub struct AppContext {
    auth: Arc<AuthService>,
    questions: Arc<QuestionService>,
    profiles: Arc<ProfileService>,
    dashboard: Arc<DashboardService>,
    capture: Arc<dyn MediaCapture>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            auth: app.auth(),
            questions: app.questions(),
            profiles: app.profiles(),
            dashboard: app.dashboard(),
            capture: app.capture(),
        }
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn questions(&self) -> Arc<QuestionService> {
        Arc::clone(&self.questions)
    }

    #[must_use]
    pub fn profiles(&self) -> Arc<ProfileService> {
        Arc::clone(&self.profiles)
    }

    #[must_use]
    pub fn dashboard(&self) -> Arc<DashboardService> {
        Arc::clone(&self.dashboard)
    }

    #[must_use]
    pub fn capture(&self) -> Arc<dyn MediaCapture> {
        Arc::clone(&self.capture)
    }
}

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
