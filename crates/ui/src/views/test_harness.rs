use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};

use interview_core::model::{Difficulty, QuestionDraft, QuestionId, UserId};
use interview_core::time::{fixed_clock, fixed_now};
use services::{
    AuthService, DashboardService, LocalIdentityProvider, MediaCapture, NullCapture,
    ProfileService, QuestionService, UserIdentity,
};
use storage::repository::{QuestionRepository, Storage};

use crate::context::{UiApp, build_app_context};
use crate::notice::Notices;
use crate::session::SessionContext;
use crate::views::{
    DashboardView, InterviewView, LandingView, PracticeView, ProfileView, SignInView,
};

pub const SMOKE_EMAIL: &str = "smoke@example.com";

struct TestApp {
    auth: Arc<AuthService>,
    questions: Arc<QuestionService>,
    profiles: Arc<ProfileService>,
    dashboard: Arc<DashboardService>,
    capture: Arc<dyn MediaCapture>,
}

impl UiApp for TestApp {
    fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    fn questions(&self) -> Arc<QuestionService> {
        Arc::clone(&self.questions)
    }

    fn profiles(&self) -> Arc<ProfileService> {
        Arc::clone(&self.profiles)
    }

    fn dashboard(&self) -> Arc<DashboardService> {
        Arc::clone(&self.dashboard)
    }

    fn capture(&self) -> Arc<dyn MediaCapture> {
        Arc::clone(&self.capture)
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum ViewKind {
    Landing,
    SignIn,
    Dashboard,
    Practice(Option<String>),
    Interview,
    Profile,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    signed_in: bool,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(Notices::new);
    let session = use_context_provider(SessionContext::new);
    let mut initialized = use_signal(|| false);
    if !initialized() {
        initialized.set(true);
        if props.signed_in {
            session.set_identity(Some(UserIdentity::new(
                UserId::derived_from(SMOKE_EMAIL),
                SMOKE_EMAIL.to_string(),
            )));
        }
        session.mark_resolved();
    }
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Landing => rsx! { LandingView {} },
        ViewKind::SignIn => rsx! { SignInView {} },
        ViewKind::Dashboard => rsx! { DashboardView {} },
        ViewKind::Practice(category) => rsx! { PracticeView { category } },
        ViewKind::Interview => rsx! { InterviewView {} },
        ViewKind::Profile => rsx! { ProfileView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub storage: Storage,
    pub user_id: UserId,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Put a small bank into storage: two questions per category.
pub async fn seed_questions(storage: &Storage) {
    let mut minute = 0;
    for category in interview_core::model::Category::ALL {
        for i in 0..2 {
            minute += 1;
            let question = QuestionDraft {
                category,
                difficulty: Difficulty::Medium,
                prompt: format!("{} smoke question {i}", category.label()),
                sample_answer: Some("A sample answer.".to_string()),
                tags: vec!["smoke".to_string()],
                time_limit_secs: Some(60),
            }
            .validate(fixed_now() + chrono::Duration::minutes(minute))
            .unwrap()
            .assign_id(QuestionId::generate());
            storage
                .questions
                .upsert_question(&question)
                .await
                .expect("seed question");
        }
    }
}

pub async fn setup_view_harness(view: ViewKind, signed_in: bool) -> ViewHarness {
    let storage = Storage::in_memory();
    let questions = Arc::new(QuestionService::new(Arc::clone(&storage.questions)));
    setup_view_harness_with_questions(view, signed_in, storage, questions).await
}

pub async fn setup_view_harness_with_questions(
    view: ViewKind,
    signed_in: bool,
    storage: Storage,
    questions: Arc<QuestionService>,
) -> ViewHarness {
    let clock = fixed_clock();
    let auth = Arc::new(AuthService::new(
        clock,
        Arc::new(LocalIdentityProvider::new()),
        Arc::clone(&storage.profiles),
    ));
    let profiles = Arc::new(ProfileService::new(clock, Arc::clone(&storage.profiles)));
    let dashboard = Arc::new(DashboardService::new(
        clock,
        Arc::clone(&storage.sessions),
        Arc::clone(&storage.metrics),
    ));

    let app = Arc::new(TestApp {
        auth,
        questions,
        profiles,
        dashboard,
        capture: Arc::new(NullCapture),
    });

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            signed_in,
        },
    );

    ViewHarness {
        dom,
        storage,
        user_id: UserId::derived_from(SMOKE_EMAIL),
    }
}

/// Question repository that always fails, for the fetch-failure paths.
pub struct FailingQuestionRepo;

#[async_trait::async_trait]
impl QuestionRepository for FailingQuestionRepo {
    async fn upsert_question(
        &self,
        _question: &interview_core::model::Question,
    ) -> Result<(), storage::repository::StorageError> {
        Err(storage::repository::StorageError::Connection(
            "fail".to_string(),
        ))
    }

    async fn list_active(
        &self,
        _category: Option<interview_core::model::Category>,
    ) -> Result<Vec<interview_core::model::Question>, storage::repository::StorageError> {
        Err(storage::repository::StorageError::Connection(
            "fail".to_string(),
        ))
    }
}
