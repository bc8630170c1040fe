use dioxus::prelude::*;
use std::time::Duration;

use interview_core::model::{Category, Question};
use services::{
    InterviewError, InterviewFlow, InterviewStage, InterviewStep, MediaCapture as _,
    QUESTION_COUNT_CHOICES,
};

use crate::context::AppContext;
use crate::notice::Notices;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{
    category_badge_class, difficulty_badge_class, format_mm_ss, map_interview_summary,
    progress_percent,
};

#[component]
pub fn InterviewView() -> Element {
    let ctx = use_context::<AppContext>();
    let notices = use_context::<Notices>();

    let mut flow = use_signal(InterviewFlow::new);
    let mut answer = use_signal(String::new);

    let question_service = ctx.questions();
    let capture_service = ctx.capture();

    let resource = use_resource(move || {
        let questions = question_service.clone();
        async move {
            match questions.list_active(None).await {
                Ok(list) => Ok(list),
                Err(_) => {
                    notices.error("Failed to load questions");
                    Err(ViewError::Unknown)
                }
            }
        }
    });

    // Single one-second tick driving both interview counters in lockstep.
    // The task dies with the view; outside a running interview each pass is
    // a no-op.
    use_future(move || async move {
        loop {
            tokio::time::sleep(Duration::from_secs(1)).await;
            if flow.peek().is_timer_running() {
                flow.write().tick();
            }
        }
    });

    let start_interview = move |pool: Vec<Question>| {
        let capture = std::sync::Arc::clone(&capture_service);
        move |_: ()| {
            let capture = std::sync::Arc::clone(&capture);
            let pool = pool.clone();
            spawn(async move {
                let drawn = {
                    let flow_guard = flow.read();
                    flow_guard.plan_default(&pool)
                };
                let drawn = match drawn {
                    Ok(drawn) => drawn,
                    Err(InterviewError::NoQuestions) => {
                        notices.error("No questions available for selected categories");
                        return;
                    }
                    Err(_) => {
                        notices.error("Select at least one category");
                        return;
                    }
                };

                // Capture is best-effort: a refused device drops recording
                // but never blocks the interview.
                let (video, audio) = {
                    let flow_guard = flow.read();
                    (
                        flow_guard.setup().video_enabled(),
                        flow_guard.setup().audio_enabled(),
                    )
                };
                let stream = if video || audio {
                    match capture.acquire(video, audio).await {
                        Ok(stream) => Some(stream),
                        Err(_) => {
                            notices.error("Could not access camera/microphone");
                            flow.write().disable_capture();
                            None
                        }
                    }
                } else {
                    None
                };

                answer.set(String::new());
                if flow.write().begin(drawn, stream).is_err() {
                    notices.error("Interview is already running");
                }
            });
        }
    };

    let on_next = move |_| {
        let text = answer();
        let step = flow.write().next_question(&text);
        match step {
            Ok(InterviewStep::Advanced) => {
                let next_saved = {
                    let flow_guard = flow.read();
                    flow_guard
                        .saved_answer(flow_guard.current_index())
                        .unwrap_or_default()
                        .to_string()
                };
                answer.set(next_saved);
            }
            Ok(InterviewStep::Completed) => {
                notices.success("Interview completed!");
            }
            Err(_) => {}
        }
    };

    let on_end = move |_| {
        let text = answer();
        if flow.write().finish(&text).is_ok() {
            notices.success("Interview completed!");
        }
    };

    let on_reset = move |_| {
        flow.write().reset();
        answer.set(String::new());
        let mut resource = resource;
        resource.restart();
    };

    let state = view_state_from_resource(&resource);
    let stage = flow.read().stage();

    rsx! {
        div { class: "page interview-page",
            match stage {
                InterviewStage::Setup => rsx! {
                    header { class: "view-header view-header--center",
                        h1 { class: "view-title", "Mock Interview" }
                        p { class: "view-subtitle",
                            "Simulate a real interview experience with timed questions"
                        }
                    }
                    match state {
                        ViewState::Idle => rsx! {
                            p { "Idle" }
                        },
                        ViewState::Loading => rsx! {
                            p { "Loading questions..." }
                        },
                        ViewState::Error(_) => rsx! {
                            SetupCard { pool: Vec::new(), flow, start: start_interview(Vec::new()) }
                        },
                        ViewState::Ready(pool) => rsx! {
                            SetupCard {
                                pool: pool.clone(),
                                flow,
                                start: start_interview(pool.clone()),
                            }
                        },
                    }
                },
                InterviewStage::Interview => rsx! {
                    InterviewStagePanel {
                        flow,
                        answer_text: answer(),
                        on_answer: move |text| answer.set(text),
                        on_next,
                        on_end,
                    }
                },
                InterviewStage::Complete => rsx! {
                    CompletePanel { flow, on_reset }
                },
            }
        }
    }
}

#[component]
fn SetupCard(
    pool: Vec<Question>,
    flow: Signal<InterviewFlow>,
    start: EventHandler<()>,
) -> Element {
    let flow_guard = flow.read();
    let setup = flow_guard.setup();
    let can_start = setup.has_selection() && !pool.is_empty();
    let selected: Vec<(Category, bool)> = Category::ALL
        .iter()
        .map(|c| (*c, setup.has_category(*c)))
        .collect();
    let counts: Vec<(usize, bool)> = QUESTION_COUNT_CHOICES
        .iter()
        .map(|count| (*count, setup.question_count() == *count))
        .collect();
    let video_enabled = setup.video_enabled();
    let audio_enabled = setup.audio_enabled();
    drop(flow_guard);

    let mut flow = flow;

    rsx! {
        div { class: "setup-card",
            h2 { class: "setup-card__title", "Interview Settings" }

            div { class: "setup-section",
                span { class: "field-label", "Question Categories" }
                div { class: "toggle-row",
                    for (category, is_on) in selected {
                        {
                            let toggle_class = if is_on {
                                format!("toggle toggle--on toggle--{}", category.as_str())
                            } else {
                                "toggle".to_string()
                            };
                            let label = if is_on {
                                format!("✓ {}", category.label())
                            } else {
                                category.label().to_string()
                            };
                            rsx! {
                                button {
                                    class: "{toggle_class}",
                                    r#type: "button",
                                    onclick: move |_| flow.write().setup_mut().toggle_category(category),
                                    "{label}"
                                }
                            }
                        }
                    }
                }
            }

            div { class: "setup-section",
                span { class: "field-label", "Number of Questions" }
                div { class: "toggle-row",
                    for (count, is_on) in counts {
                        {
                            let toggle_class = if is_on { "toggle toggle--on" } else { "toggle" };
                            rsx! {
                                button {
                                    class: "{toggle_class}",
                                    r#type: "button",
                                    onclick: move |_| {
                                        // Choices come from the fixed list, so this cannot fail.
                                        let _ = flow.write().setup_mut().set_question_count(count);
                                    },
                                    "{count}"
                                }
                            }
                        }
                    }
                }
            }

            div { class: "setup-section",
                span { class: "field-label", "Recording Options" }
                div { class: "toggle-row",
                    {
                        let video_class = if video_enabled { "toggle toggle--on" } else { "toggle" };
                        let video_label = if video_enabled { "Video On" } else { "Video Off" };
                        let audio_class = if audio_enabled { "toggle toggle--on" } else { "toggle" };
                        let audio_label = if audio_enabled { "Audio On" } else { "Audio Off" };
                        rsx! {
                            button {
                                class: "{video_class}",
                                r#type: "button",
                                onclick: move |_| {
                                    let enabled = flow.read().setup().video_enabled();
                                    flow.write().setup_mut().set_video_enabled(!enabled);
                                },
                                "{video_label}"
                            }
                            button {
                                class: "{audio_class}",
                                r#type: "button",
                                onclick: move |_| {
                                    let enabled = flow.read().setup().audio_enabled();
                                    flow.write().setup_mut().set_audio_enabled(!enabled);
                                },
                                "{audio_label}"
                            }
                        }
                    }
                }
                p { class: "setup-hint",
                    "Enable camera and microphone for a more realistic experience"
                }
            }

            button {
                class: "btn btn-primary btn-lg setup-card__start",
                r#type: "button",
                disabled: !can_start,
                onclick: move |_| start.call(()),
                "Start Interview"
            }
        }
    }
}

#[component]
fn InterviewStagePanel(
    flow: Signal<InterviewFlow>,
    answer_text: String,
    on_answer: EventHandler<String>,
    on_next: EventHandler<()>,
    on_end: EventHandler<()>,
) -> Element {
    let flow_guard = flow.read();
    let Some(question) = flow_guard.current_question().cloned() else {
        return rsx! {
            p { "No questions available." }
        };
    };
    let current_index = flow_guard.current_index();
    let total = flow_guard.total_questions();
    let is_last = flow_guard.is_last_question();
    let question_secs = flow_guard.question_secs();
    let total_secs = flow_guard.total_secs();
    let video_live = flow_guard
        .capture_stream()
        .is_some_and(|stream| stream.has_video());
    drop(flow_guard);

    let progress = progress_percent(current_index, total);
    let position_label = format!("Question {} of {total}", current_index + 1);
    let question_time_label = format_mm_ss(question_secs);
    let total_time_label = format_mm_ss(total_secs);
    let difficulty_class = difficulty_badge_class(question.difficulty());
    let difficulty_label = question.difficulty().to_string();
    let category_class = category_badge_class(question.category());
    let category_label = question.category().label();
    let suggested_label = question
        .time_limit_secs()
        .map(|limit| format!("{}m suggested", limit.div_ceil(60)));

    rsx! {
        div { class: "interview-grid",
            aside { class: "interview-side",
                div { class: "camera-panel",
                    if video_live {
                        div { class: "camera-panel__live", "● Recording" }
                    } else {
                        div { class: "camera-panel__off", "Camera off" }
                    }
                }
                div { class: "timer-panel",
                    div { class: "timer-row",
                        span { class: "timer-row__label", "Question Time" }
                        span { class: "timer-row__value", "{question_time_label}" }
                    }
                    div { class: "timer-row timer-row--total",
                        span { class: "timer-row__label", "Total Time" }
                        span { class: "timer-row__value", "{total_time_label}" }
                    }
                }
                button {
                    class: "btn btn-danger",
                    r#type: "button",
                    onclick: move |_| on_end.call(()),
                    "End Interview"
                }
            }

            section { class: "interview-main",
                div { class: "progress-row",
                    span { class: "progress-label", "{position_label}" }
                    div { class: "progress-track",
                        div { class: "progress-fill", style: "width: {progress}%;" }
                    }
                    span { class: "progress-label", "{progress}% complete" }
                }

                div { class: "question-card",
                    header { class: "question-card__header",
                        span { class: "{category_class}", "{category_label}" }
                        span { class: "{difficulty_class}", "{difficulty_label}" }
                        if let Some(suggested) = suggested_label {
                            span { class: "badge badge--tag", "{suggested}" }
                        }
                    }
                    h2 { class: "question-card__prompt", "{question.prompt()}" }

                    textarea {
                        class: "answer-input answer-input--tall",
                        placeholder: "Type your response here... Think about structure, examples, and clarity.",
                        value: "{answer_text}",
                        oninput: move |evt| on_answer.call(evt.value()),
                    }

                    div { class: "question-card__actions question-card__actions--spread",
                        p { class: "setup-hint",
                            if is_last { "This is the last question" } else { "Answer and click Next to continue" }
                        }
                        button {
                            class: "btn btn-primary",
                            r#type: "button",
                            onclick: move |_| on_next.call(()),
                            if is_last { "Finish Interview" } else { "Next Question" }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn CompletePanel(flow: Signal<InterviewFlow>, on_reset: EventHandler<()>) -> Element {
    let flow_guard = flow.read();
    let summary = map_interview_summary(&flow_guard.summary());
    let review = flow_guard.review();
    drop(flow_guard);

    rsx! {
        div { class: "complete-stage",
            h1 { class: "complete-stage__title", "Interview Complete! 🎉" }
            p { class: "complete-stage__subtitle", "Great job completing your mock interview!" }

            div { class: "stat-grid stat-grid--three",
                div { class: "stat-tile",
                    div { class: "stat-tile__value", "{summary.questions_label}" }
                    p { class: "stat-tile__label", "Questions Answered" }
                }
                div { class: "stat-tile",
                    div { class: "stat-tile__value", "{summary.total_time_label}" }
                    p { class: "stat-tile__label", "Total Time" }
                }
                div { class: "stat-tile",
                    div { class: "stat-tile__value", "{summary.avg_label}" }
                    p { class: "stat-tile__label", "Avg per Question" }
                }
            }

            div { class: "review-card",
                h3 { class: "review-card__title", "Your Responses" }
                for (index, item) in review.iter().enumerate() {
                    {
                        let number = (index + 1).to_string();
                        rsx! {
                            div { class: "review-item",
                                div { class: "review-item__head",
                                    span { class: "review-item__number", "{number}" }
                                    p { class: "review-item__prompt", "{item.prompt}" }
                                }
                                match item.answer.as_deref() {
                                    Some(answer) => rsx! {
                                        p { class: "review-item__answer", "{answer}" }
                                    },
                                    None => rsx! {
                                        p { class: "review-item__answer review-item__answer--missing",
                                            em { "No answer provided" }
                                        }
                                    },
                                }
                            }
                        }
                    }
                }
            }

            button {
                class: "btn btn-secondary",
                r#type: "button",
                onclick: move |_| on_reset.call(()),
                "Start New Interview"
            }
        }
    }
}
