use dioxus::prelude::*;
use dioxus_router::Link;

use interview_core::model::Category;
use services::{CategoryScore, DashboardStats, ProgressPoint};

use crate::context::AppContext;
use crate::routes::Route;
use crate::session::SessionContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};

#[derive(Clone, Debug, PartialEq)]
struct DashboardData {
    greeting_name: Option<String>,
    stats: DashboardStats,
    weekly: Vec<ProgressPoint>,
    category_scores: Vec<CategoryScore>,
}

struct PracticeCard {
    category: Category,
    title: &'static str,
    description: &'static str,
}

const PRACTICE_CARDS: [PracticeCard; 3] = [
    PracticeCard {
        category: Category::Hr,
        title: "HR Questions",
        description: "Salary, expectations, company fit",
    },
    PracticeCard {
        category: Category::Technical,
        title: "Technical Questions",
        description: "Algorithms, system design, coding",
    },
    PracticeCard {
        category: Category::Behavioral,
        title: "Behavioral Questions",
        description: "STAR method, soft skills",
    },
];

#[component]
pub fn DashboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let session = use_context::<SessionContext>();

    // Hooks run unconditionally; the signed-out gates come after.
    let resource = use_resource(move || {
        let dashboard = ctx.dashboard();
        let profiles = ctx.profiles();
        let user_id = session.user_id();
        async move {
            let Some(user_id) = user_id else {
                return Err(ViewError::Unknown);
            };
            let stats = dashboard
                .stats(user_id)
                .await
                .map_err(|_| ViewError::Unknown)?;
            let weekly = dashboard
                .weekly_progress(user_id)
                .await
                .map_err(|_| ViewError::Unknown)?;
            let category_scores = dashboard
                .category_scores(user_id)
                .await
                .map_err(|_| ViewError::Unknown)?;
            // A failed profile read only costs the greeting.
            let greeting_name = profiles
                .get(user_id)
                .await
                .ok()
                .flatten()
                .and_then(|profile| {
                    profile
                        .full_name()
                        .and_then(|name| name.split_whitespace().next())
                        .map(str::to_string)
                });

            Ok::<_, ViewError>(DashboardData {
                greeting_name,
                stats,
                weekly,
                category_scores,
            })
        }
    });

    if !session.is_resolved() {
        return rsx! {
            div { class: "page", p { "Loading..." } }
        };
    }
    if !session.is_signed_in() {
        return rsx! {
            div { class: "page",
                p { "Sign in to see your dashboard." }
                Link { class: "btn btn-primary", to: Route::SignIn {}, "Sign In" }
            }
        };
    }

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page dashboard-page",
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let mut resource = resource;
                            resource.restart();
                        },
                        "Retry"
                    }
                },
                ViewState::Ready(data) => rsx! {
                    header { class: "view-header",
                        h1 { class: "view-title",
                            match data.greeting_name.as_deref() {
                                Some(name) => rsx! { "Welcome back, {name}!" },
                                None => rsx! { "Welcome back!" },
                            }
                        }
                        p { class: "view-subtitle", "Ready to sharpen your interview skills today?" }
                    }

                    div { class: "stat-grid",
                        StatTile { value: data.stats.total_sessions.to_string(), label: "Practice Sessions" }
                        StatTile { value: data.stats.total_questions.to_string(), label: "Questions Answered" }
                        StatTile { value: format!("{}%", data.stats.average_score), label: "Average Score" }
                        StatTile { value: format!("{} 🔥", data.stats.streak_days), label: "Day Streak" }
                    }

                    div { class: "dashboard-panels",
                        div { class: "panel",
                            h3 { class: "panel__title", "Weekly Progress" }
                            div { class: "bar-chart",
                                for point in &data.weekly {
                                    {
                                        let height = format!("height: {:.0}%;", point.score.clamp(0.0, 100.0));
                                        let score_label = format!("{:.0}", point.score);
                                        let label = point.label.clone();
                                        rsx! {
                                            div { class: "bar-chart__column",
                                                div {
                                                    class: "bar-chart__bar",
                                                    style: "{height}",
                                                    title: "{score_label}",
                                                }
                                                span { class: "bar-chart__label", "{label}" }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                        div { class: "panel",
                            h3 { class: "panel__title", "Category Scores" }
                            for item in &data.category_scores {
                                {
                                    let label = item.category.label();
                                    let fill_class = format!(
                                        "score-row__fill score-row__fill--{}",
                                        item.category.as_str()
                                    );
                                    let value_label = format!("{:.0}%", item.score);
                                    let width = format!("width: {:.0}%;", item.score.clamp(0.0, 100.0));
                                    rsx! {
                                        div { class: "score-row",
                                            div { class: "score-row__head",
                                                span { "{label}" }
                                                span { class: "score-row__value", "{value_label}" }
                                            }
                                            div { class: "score-row__track",
                                                div { class: "{fill_class}", style: "{width}" }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }

                    section { class: "practice-cta",
                        h2 { class: "section-title", "Start Practicing" }
                        div { class: "category-grid",
                            for card in PRACTICE_CARDS {
                                Link {
                                    class: "category-card category-card--{card.category.as_str()}",
                                    to: Route::Practice { category: Some(card.category.as_str().to_string()) },
                                    h3 { class: "category-card__title", "{card.title}" }
                                    p { class: "category-card__body", "{card.description}" }
                                }
                            }
                        }
                    }

                    section { class: "interview-cta",
                        div { class: "interview-cta__text",
                            h3 { "Ready for a Full Mock Interview?" }
                            p { "A realistic simulation with timed questions and an end-of-session review." }
                        }
                        Link { class: "btn btn-primary btn-lg", to: Route::MockInterview {}, "Start Mock Interview" }
                    }
                },
            }
        }
    }
}

#[component]
fn StatTile(value: String, label: &'static str) -> Element {
    rsx! {
        div { class: "stat-tile",
            div { class: "stat-tile__value", "{value}" }
            p { class: "stat-tile__label", "{label}" }
        }
    }
}
