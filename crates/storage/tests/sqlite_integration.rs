use chrono::Duration;
use interview_core::model::{
    AvatarUrl, Category, Difficulty, ExperienceLevel, MetricsId, PerformanceMetrics,
    PracticeSessionRecord, Profile, ProfileFields, ProfileId, QuestionDraft, QuestionId,
    ResponseId, SessionId, SessionResponseRecord, UserId,
};
use interview_core::time::fixed_now;
use storage::repository::{
    PerformanceMetricsRepository as _, PracticeSessionRepository as _, ProfileRepository as _,
    QuestionRepository as _, SessionResponseRepository as _, Storage,
};

async fn sqlite_storage() -> Storage {
    Storage::sqlite("sqlite::memory:")
        .await
        .expect("in-memory sqlite")
}

fn build_question(category: Category, prompt: &str, minutes_ago: i64) -> interview_core::model::Question {
    QuestionDraft {
        category,
        difficulty: Difficulty::Medium,
        prompt: prompt.to_string(),
        sample_answer: Some("Structure the answer with STAR.".to_string()),
        tags: vec!["seeded".to_string(), "integration".to_string()],
        time_limit_secs: Some(120),
    }
    .validate(fixed_now() - Duration::minutes(minutes_ago))
    .unwrap()
    .assign_id(QuestionId::generate())
}

#[tokio::test]
async fn question_roundtrip_and_category_filter() {
    let storage = sqlite_storage().await;

    let hr = build_question(Category::Hr, "Why do you want this role?", 3);
    let tech = build_question(Category::Technical, "Explain async vs threads.", 2);
    let behavioral = build_question(Category::Behavioral, "Tell me about a failure.", 1);
    for q in [&hr, &tech, &behavioral] {
        storage.questions.upsert_question(q).await.unwrap();
    }

    let all = storage.questions.list_active(None).await.unwrap();
    assert_eq!(all.len(), 3);
    // Ordered by created_at ascending.
    assert_eq!(all[0].id(), hr.id());
    assert_eq!(all[0].tags(), ["seeded".to_string(), "integration".to_string()]);
    assert_eq!(all[0].time_limit_secs(), Some(120));

    let technical = storage
        .questions
        .list_active(Some(Category::Technical))
        .await
        .unwrap();
    assert_eq!(technical.len(), 1);
    assert_eq!(technical[0].prompt(), "Explain async vs threads.");
}

#[tokio::test]
async fn inactive_questions_are_not_listed() {
    let storage = sqlite_storage().await;
    let question = build_question(Category::Hr, "Active?", 1);
    storage.questions.upsert_question(&question).await.unwrap();

    let inactive = interview_core::model::Question::from_persisted(
        QuestionId::generate(),
        Category::Hr,
        Difficulty::Easy,
        "Retired question".to_string(),
        None,
        Vec::new(),
        None,
        false,
        fixed_now(),
    )
    .unwrap();
    storage.questions.upsert_question(&inactive).await.unwrap();

    let listed = storage.questions.list_active(None).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id(), question.id());
}

#[tokio::test]
async fn profile_upsert_is_full_overwrite() {
    let storage = sqlite_storage().await;
    let user_id = UserId::derived_from("it@example.com");
    let now = fixed_now();

    let mut profile = Profile::new(ProfileId::generate(), user_id, now);
    profile.apply(
        ProfileFields {
            full_name: Some("Integration Tester".to_string()),
            avatar_url: Some(AvatarUrl::new("https://example.com/a.png").unwrap()),
            target_role: Some("Backend Engineer".to_string()),
            experience_level: Some(ExperienceLevel::Mid),
        },
        now,
    );
    storage.profiles.upsert_profile(&profile).await.unwrap();

    // Overwrite with emptier fields; every column must follow.
    profile.apply(
        ProfileFields {
            full_name: Some("Integration Tester".to_string()),
            ..ProfileFields::default()
        },
        now + Duration::minutes(1),
    );
    storage.profiles.upsert_profile(&profile).await.unwrap();

    let fetched = storage
        .profiles
        .get_by_user(user_id)
        .await
        .unwrap()
        .expect("profile exists");
    assert_eq!(fetched.full_name(), Some("Integration Tester"));
    assert_eq!(fetched.avatar_url(), None);
    assert_eq!(fetched.target_role(), None);
    assert_eq!(fetched.experience_level(), None);
    assert_eq!(fetched.created_at(), now);

    let missing = storage
        .profiles
        .get_by_user(UserId::derived_from("nobody@example.com"))
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn sessions_responses_and_metrics_roundtrip() {
    let storage = sqlite_storage().await;
    let user_id = UserId::derived_from("stats@example.com");
    let now = fixed_now();

    let question = build_question(Category::Hr, "Walk me through your resume.", 1);
    storage.questions.upsert_question(&question).await.unwrap();

    let session = PracticeSessionRecord::from_persisted(
        SessionId::generate(),
        user_id,
        Some(Category::Hr),
        5,
        4,
        Some(76.0),
        now - Duration::hours(1),
        Some(now),
        Some(3600),
    )
    .unwrap();
    storage.sessions.insert_session(&session).await.unwrap();

    let response = SessionResponseRecord::new(
        ResponseId::generate(),
        session.id(),
        question.id(),
        Some("I started out in QA, then moved to backend work.".to_string()),
        Some(76.0),
        None,
        Some(110),
        now - Duration::minutes(50),
    );
    storage.responses.insert_response(&response).await.unwrap();

    let metrics = PerformanceMetrics::new(
        MetricsId::generate(),
        user_id,
        now.date_naive(),
        1,
        4,
        Some(76.0),
        Some(76.0),
        None,
        None,
        now,
    );
    storage.metrics.upsert_daily(&metrics).await.unwrap();

    let sessions = storage.sessions.list_for_user(user_id).await.unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].completed_questions(), 4);
    assert!(sessions[0].is_completed());

    let responses = storage
        .responses
        .list_for_session(session.id())
        .await
        .unwrap();
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0].time_taken_secs(), Some(110));

    let listed = storage.metrics.list_for_user(user_id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].score_for(Category::Hr), Some(76.0));
}
