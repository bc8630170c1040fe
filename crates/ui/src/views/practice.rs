use dioxus::prelude::*;
use std::time::Duration;

use interview_core::model::{Category, Question};
use services::{PracticeError, PracticeFlow, TickOutcome};

use crate::context::AppContext;
use crate::notice::Notices;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{
    category_badge_class, countdown_class, difficulty_badge_class, format_m_ss, markdown_to_html,
};

#[component]
pub fn PracticeView(category: Option<String>) -> Element {
    let ctx = use_context::<AppContext>();
    let notices = use_context::<Notices>();

    let mut selected =
        use_signal(move || category.as_deref().and_then(|c| c.parse::<Category>().ok()));
    let mut flow = use_signal(|| None::<PracticeFlow>);
    let mut answer = use_signal(String::new);

    let resource = use_resource(move || {
        let questions = ctx.questions();
        let category = selected();
        async move {
            match questions.list_active(category).await {
                Ok(list) => Ok(list),
                Err(_) => {
                    notices.error("Failed to load questions");
                    Err(ViewError::Unknown)
                }
            }
        }
    });

    // One-second countdown driver. The task dies with the view; while no
    // countdown is running each pass is a cheap no-op.
    use_future(move || async move {
        loop {
            tokio::time::sleep(Duration::from_secs(1)).await;
            let running = flow
                .peek()
                .as_ref()
                .is_some_and(PracticeFlow::countdown_running);
            if !running {
                continue;
            }
            let outcome = flow.write().as_mut().map(PracticeFlow::tick);
            if outcome == Some(TickOutcome::Expired) {
                notices.info("Time's up! Review your answer.");
            }
        }
    });

    let mut select_category = move |category: Category| {
        selected.set(Some(category));
        flow.set(None);
        answer.set(String::new());
    };

    let start_session = move |questions: Vec<Question>| {
        move |_: MouseEvent| {
            match PracticeFlow::new(questions.clone()) {
                Ok(mut started) => {
                    started.start();
                    answer.set(String::new());
                    flow.set(Some(started));
                }
                Err(_) => notices.error("No questions available for this category"),
            }
        }
    };

    let state = view_state_from_resource(&resource);
    let flow_guard = flow.read();
    let session_active = flow_guard.as_ref().is_some_and(PracticeFlow::is_started);

    let subtitle = match selected() {
        Some(category) => format!("Practicing {} questions", category.label()),
        None => "Select a category to begin".to_string(),
    };

    rsx! {
        div { class: "page practice-page",
            header { class: "view-header",
                h1 { class: "view-title", "Practice Mode" }
                p { class: "view-subtitle", "{subtitle}" }
            }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading questions..." }
                },
                // A failed fetch renders exactly like an empty bank; the
                // failure itself was surfaced as a notice.
                ViewState::Error(_) => rsx! {
                    EmptyBank {}
                },
                ViewState::Ready(questions) => rsx! {
                    if !session_active {
                        div { class: "category-grid",
                            for category in Category::ALL {
                                {
                                    let count = if selected() == Some(category) {
                                        questions.len()
                                    } else {
                                        questions.iter().filter(|q| q.category() == category).count()
                                    };
                                    let selected_class = if selected() == Some(category) {
                                        "category-card category-card--selected"
                                    } else {
                                        "category-card"
                                    };
                                    rsx! {
                                        button {
                                            class: "{selected_class} category-card--{category.as_str()}",
                                            r#type: "button",
                                            onclick: move |_| select_category(category),
                                            h3 { class: "category-card__title", "{category.label()} Questions" }
                                            p { class: "category-card__body", "{count} questions available" }
                                        }
                                    }
                                }
                            }
                        }

                        if selected().is_some() && questions.is_empty() {
                            EmptyBank {}
                        }
                        if selected().is_some() && !questions.is_empty() {
                            div { class: "practice-start",
                                button {
                                    class: "btn btn-primary btn-lg",
                                    r#type: "button",
                                    onclick: start_session(questions.clone()),
                                    "Start Practice Session"
                                }
                            }
                        }
                    } else if let Some(active) = flow_guard.as_ref() {
                        PracticeSession {
                            current_index: active.current_index(),
                            total: active.total_questions(),
                            countdown: active.countdown_remaining(),
                            question: active.current_question().cloned(),
                            completed_current: active.is_current_completed(),
                            completed_indices: (0..active.total_questions())
                                .map(|i| active.is_index_completed(i))
                                .collect::<Vec<_>>(),
                            show_sample: active.show_sample(),
                            complete: active.is_complete(),
                            answer_text: answer(),
                            on_answer: move |text| answer.set(text),
                            on_submit: move |()| {
                                let text = answer();
                                let result = flow.write().as_mut().map(|f| f.submit_answer(&text));
                                match result {
                                    Some(Ok(())) => notices.success("Answer saved!"),
                                    Some(Err(PracticeError::EmptyAnswer)) => {
                                        notices.error("Write an answer before submitting");
                                    }
                                    Some(Err(_)) | None => {}
                                }
                            },
                            on_reveal: move |()| {
                                if let Some(f) = flow.write().as_mut() {
                                    f.reveal_sample();
                                }
                            },
                            on_next: move |()| {
                                if let Some(f) = flow.write().as_mut() {
                                    f.next();
                                }
                                answer.set(String::new());
                            },
                            on_previous: move |()| {
                                if let Some(f) = flow.write().as_mut() {
                                    f.previous();
                                }
                                answer.set(String::new());
                            },
                            on_jump: move |index| {
                                if let Some(f) = flow.write().as_mut() {
                                    f.jump_to(index);
                                }
                                answer.set(String::new());
                            },
                            on_practice_again: move |()| {
                                flow.set(None);
                                answer.set(String::new());
                            },
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn EmptyBank() -> Element {
    rsx! {
        div { class: "empty-card",
            h3 { class: "empty-card__title", "No questions available" }
            p { class: "empty-card__body", "Questions for this category will be added soon." }
        }
    }
}

#[component]
#[allow(clippy::too_many_arguments)]
fn PracticeSession(
    current_index: usize,
    total: usize,
    countdown: Option<u32>,
    question: Option<Question>,
    completed_current: bool,
    completed_indices: Vec<bool>,
    show_sample: bool,
    complete: bool,
    answer_text: String,
    on_answer: EventHandler<String>,
    on_submit: EventHandler<()>,
    on_reveal: EventHandler<()>,
    on_next: EventHandler<()>,
    on_previous: EventHandler<()>,
    on_jump: EventHandler<usize>,
    on_practice_again: EventHandler<()>,
) -> Element {
    let progress = if total == 0 {
        0
    } else {
        (current_index + 1) * 100 / total
    };
    let progress_label = format!("{} / {}", current_index + 1, total);
    let submit_disabled = completed_current || answer_text.trim().is_empty();

    rsx! {
        div { class: "practice-session",
            div { class: "progress-row",
                div { class: "progress-track",
                    div { class: "progress-fill", style: "width: {progress}%;" }
                }
                span { class: "progress-label", "{progress_label}" }
            }

            if let Some(remaining) = countdown {
                {
                    let timer_class = countdown_class(remaining);
                    let timer_label = format_m_ss(remaining);
                    rsx! {
                        div { class: "{timer_class}",
                            span { class: "practice-timer__value", "{timer_label}" }
                        }
                    }
                }
            }

            if let Some(question) = question {
                {
                    let difficulty_class = difficulty_badge_class(question.difficulty());
                    let difficulty_label = question.difficulty().to_string();
                    let category_class = category_badge_class(question.category());
                    let category_label = question.category().label();
                    let prompt = question.prompt().to_string();
                    let tags: Vec<String> = question.tags().iter().take(2).cloned().collect();
                    let sample_html = question.sample_answer().map(markdown_to_html);
                    rsx! {
                div { class: "question-card",
                    header { class: "question-card__header",
                        span { class: "{difficulty_class}", "{difficulty_label}" }
                        span { class: "{category_class}", "{category_label}" }
                        for tag in tags {
                            span { class: "badge badge--tag", "{tag}" }
                        }
                    }
                    h2 { class: "question-card__prompt", "{prompt}" }

                    textarea {
                        class: "answer-input",
                        placeholder: "Type your answer here...",
                        disabled: completed_current,
                        value: "{answer_text}",
                        oninput: move |evt| on_answer.call(evt.value()),
                    }

                    if !completed_current {
                        div { class: "question-card__actions",
                            button {
                                class: "btn btn-primary",
                                r#type: "button",
                                disabled: submit_disabled,
                                onclick: move |_| on_submit.call(()),
                                "Submit Answer"
                            }
                            button {
                                class: "btn btn-ghost",
                                r#type: "button",
                                onclick: move |_| on_reveal.call(()),
                                "Show Sample Answer"
                            }
                        }
                    }

                    if show_sample {
                        if let Some(sample_html) = sample_html {
                            div { class: "sample-answer",
                                h4 { class: "sample-answer__title", "Sample Answer" }
                                div {
                                    class: "sample-answer__body",
                                    dangerous_inner_html: "{sample_html}",
                                }
                            }
                        }
                    }
                }
                    }
                }
            }

            div { class: "practice-nav",
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    disabled: current_index == 0,
                    onclick: move |_| on_previous.call(()),
                    "Previous"
                }
                div { class: "practice-dots",
                    for index in 0..total {
                        {
                            let dot_class = if index == current_index {
                                "practice-dot practice-dot--current"
                            } else if completed_indices.get(index).copied().unwrap_or(false) {
                                "practice-dot practice-dot--done"
                            } else {
                                "practice-dot"
                            };
                            let dot_label = format!("Go to question {}", index + 1);
                            rsx! {
                                button {
                                    class: "{dot_class}",
                                    r#type: "button",
                                    aria_label: "{dot_label}",
                                    onclick: move |_| on_jump.call(index),
                                }
                            }
                        }
                    }
                }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    disabled: total == 0 || current_index == total - 1,
                    onclick: move |_| on_next.call(()),
                    "Next"
                }
            }

            if complete {
                div { class: "complete-card",
                    h3 { class: "complete-card__title", "Session Complete! 🎉" }
                    p { class: "complete-card__body",
                        "You've completed all {total} questions in this session."
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: move |_| on_practice_again.call(()),
                        "Practice Again"
                    }
                }
            }
        }
    }
}
