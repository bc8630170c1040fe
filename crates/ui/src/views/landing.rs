use dioxus::prelude::*;
use dioxus_router::Link;

use crate::routes::Route;
use crate::session::SessionContext;

struct Feature {
    title: &'static str,
    description: &'static str,
}

const FEATURES: [Feature; 4] = [
    Feature {
        title: "Question Bank",
        description: "HR, technical and behavioral questions with sample answers.",
    },
    Feature {
        title: "Mock Interviews",
        description: "Timed interview simulations with optional camera and microphone.",
    },
    Feature {
        title: "Sample Answers",
        description: "Compare your response against a model answer after every question.",
    },
    Feature {
        title: "Progress Tracking",
        description: "Session counts, scores and streaks on your dashboard.",
    },
];

#[component]
pub fn LandingView() -> Element {
    let session = use_context::<SessionContext>();

    rsx! {
        div { class: "page landing-page",
            section { class: "hero",
                h1 { class: "hero__title", "Interview practice that sticks" }
                p { class: "hero__subtitle",
                    "Work through curated question sets, run timed mock interviews, \
                     and review sample answers at your own pace."
                }
                div { class: "hero__actions",
                    if session.is_signed_in() {
                        Link { class: "btn btn-primary btn-lg", to: Route::Dashboard {}, "Go to Dashboard" }
                    } else {
                        Link { class: "btn btn-primary btn-lg", to: Route::SignIn {}, "Get Started" }
                    }
                    Link {
                        class: "btn btn-secondary btn-lg",
                        to: Route::Practice { category: None },
                        "Browse Questions"
                    }
                }
            }

            section { class: "features",
                for feature in FEATURES {
                    div { class: "feature-card",
                        h3 { class: "feature-card__title", "{feature.title}" }
                        p { class: "feature-card__body", "{feature.description}" }
                    }
                }
            }
        }
    }
}
