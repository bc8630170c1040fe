use std::sync::Arc;

use chrono::Duration;
use interview_core::model::{
    Category, MetricsId, PerformanceMetrics, PracticeSessionRecord, SessionId,
};
use interview_core::time::fixed_now;
use services::QuestionService;
use storage::repository::{
    PerformanceMetricsRepository as _, PracticeSessionRepository as _, Storage,
};

use super::test_harness::{
    FailingQuestionRepo, ViewKind, seed_questions, setup_view_harness,
    setup_view_harness_with_questions,
};

#[tokio::test(flavor = "current_thread")]
async fn landing_view_smoke_renders_hero() {
    let mut harness = setup_view_harness(ViewKind::Landing, false).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Interview practice"), "missing hero in {html}");
    assert!(html.contains("Get Started"), "missing cta in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn sign_in_view_smoke_renders_form() {
    let mut harness = setup_view_harness(ViewKind::SignIn, false).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Sign In"), "missing title in {html}");
    assert!(html.contains("you@example.com"), "missing input in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn practice_view_smoke_lists_categories_with_counts() {
    let storage = Storage::in_memory();
    seed_questions(&storage).await;
    let questions = Arc::new(QuestionService::new(Arc::clone(&storage.questions)));
    let mut harness =
        setup_view_harness_with_questions(ViewKind::Practice(None), false, storage, questions)
            .await;
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Practice Mode"), "missing title in {html}");
    assert!(html.contains("HR Questions"), "missing hr card in {html}");
    assert!(
        html.contains("2 questions available"),
        "missing counts in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn practice_view_smoke_fetch_failure_shows_empty_state() {
    let storage = Storage::in_memory();
    let questions = Arc::new(QuestionService::new(Arc::new(FailingQuestionRepo)));
    let mut harness = setup_view_harness_with_questions(
        ViewKind::Practice(Some("hr".to_string())),
        false,
        storage,
        questions,
    )
    .await;
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(
        html.contains("No questions available"),
        "missing empty state in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_view_smoke_renders_sample_chart_for_fresh_account() {
    let mut harness = setup_view_harness(ViewKind::Dashboard, true).await;
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Welcome back"), "missing greeting in {html}");
    assert!(html.contains("Practice Sessions"), "missing tiles in {html}");
    assert!(html.contains("Mon"), "missing sample chart in {html}");
    assert!(
        html.contains("Start Mock Interview"),
        "missing interview cta in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_view_smoke_aggregates_real_records() {
    let storage = Storage::in_memory();
    let questions = Arc::new(QuestionService::new(Arc::clone(&storage.questions)));
    let mut harness = setup_view_harness_with_questions(
        ViewKind::Dashboard,
        true,
        storage,
        questions,
    )
    .await;

    let now = fixed_now();
    let session = PracticeSessionRecord::from_persisted(
        SessionId::generate(),
        harness.user_id,
        Some(Category::Hr),
        5,
        5,
        Some(80.0),
        now - Duration::minutes(30),
        Some(now),
        Some(1800),
    )
    .unwrap();
    harness.storage.sessions.insert_session(&session).await.unwrap();

    let metrics = PerformanceMetrics::new(
        MetricsId::generate(),
        harness.user_id,
        now.date_naive(),
        1,
        5,
        Some(80.0),
        Some(80.0),
        None,
        None,
        now,
    );
    harness.storage.metrics.upsert_daily(&metrics).await.unwrap();

    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("80%"), "missing average score in {html}");
    assert!(html.contains("1 🔥"), "missing streak in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_view_smoke_gates_signed_out_users() {
    let mut harness = setup_view_harness(ViewKind::Dashboard, false).await;
    harness.rebuild();
    let html = harness.render();
    assert!(
        html.contains("Sign in to see your dashboard"),
        "missing gate in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn interview_view_smoke_renders_setup_stage() {
    let storage = Storage::in_memory();
    seed_questions(&storage).await;
    let questions = Arc::new(QuestionService::new(Arc::clone(&storage.questions)));
    let mut harness =
        setup_view_harness_with_questions(ViewKind::Interview, true, storage, questions).await;
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Mock Interview"), "missing title in {html}");
    assert!(
        html.contains("Interview Settings"),
        "missing setup card in {html}"
    );
    assert!(
        html.contains("Number of Questions"),
        "missing count picker in {html}"
    );
    assert!(html.contains("Start Interview"), "missing start in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn profile_view_smoke_gates_and_renders() {
    let mut harness = setup_view_harness(ViewKind::Profile, false).await;
    harness.rebuild();
    let html = harness.render();
    assert!(
        html.contains("Sign in to edit your profile"),
        "missing gate in {html}"
    );

    let mut harness = setup_view_harness(ViewKind::Profile, true).await;
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Profile Settings"), "missing title in {html}");
    assert!(
        html.contains("smoke@example.com"),
        "missing email in {html}"
    );
    assert!(html.contains("Experience Level"), "missing levels in {html}");
}
