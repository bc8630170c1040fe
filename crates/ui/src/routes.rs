use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable, use_navigator};

use crate::context::AppContext;
use crate::notice::{NoticeStack, Notices};
use crate::session::SessionContext;
use crate::views::{
    DashboardView, InterviewView, LandingView, PracticeView, ProfileView, SignInView,
};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", LandingView)] Landing {},
        #[route("/login", SignInView)] SignIn {},
        #[route("/dashboard", DashboardView)] Dashboard {},
        #[route("/practice?:category", PracticeView)] Practice { category: Option<String> },
        #[route("/mock-interview", InterviewView)] MockInterview {},
        #[route("/profile", ProfileView)] Profile {},
}

#[component]
fn Layout() -> Element {
    let ctx = use_context::<AppContext>();
    use_context_provider(Notices::new);
    let session = use_context_provider(SessionContext::new);

    // Resolve the signed-in identity once; pages gate on `is_resolved`.
    use_future(move || {
        let auth = ctx.auth();
        async move {
            if let Ok(identity) = auth.current().await {
                session.set_identity(identity);
            }
            session.mark_resolved();
        }
    });

    rsx! {
        div { class: "app",
            Navbar {}
            NoticeStack {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Navbar() -> Element {
    let ctx = use_context::<AppContext>();
    let session = use_context::<SessionContext>();
    let notices = use_context::<Notices>();
    let navigator = use_navigator();

    let on_sign_out = move |_| {
        let auth = ctx.auth();
        spawn(async move {
            if auth.sign_out().await.is_err() {
                notices.error("Failed to sign out");
                return;
            }
            session.set_identity(None);
            navigator.push(Route::Landing {});
        });
    };

    rsx! {
        nav { class: "navbar",
            Link { class: "navbar__brand", to: Route::Landing {}, "Prep" }
            div { class: "navbar__links",
                if !session.is_resolved() {
                    span { class: "navbar__loading", "…" }
                } else if session.is_signed_in() {
                    Link { to: Route::Dashboard {}, "Dashboard" }
                    Link { to: Route::Practice { category: None }, "Practice" }
                    Link { to: Route::MockInterview {}, "Mock Interview" }
                    Link { class: "navbar__profile", to: Route::Profile {}, "Profile" }
                    button {
                        class: "btn btn-ghost",
                        r#type: "button",
                        onclick: on_sign_out,
                        "Sign Out"
                    }
                } else {
                    Link { class: "btn btn-primary", to: Route::SignIn {}, "Sign In" }
                }
            }
        }
    }
}
