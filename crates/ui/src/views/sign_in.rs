use dioxus::prelude::*;
use dioxus_router::use_navigator;

use crate::context::AppContext;
use crate::notice::Notices;
use crate::routes::Route;
use crate::session::SessionContext;

#[component]
pub fn SignInView() -> Element {
    let ctx = use_context::<AppContext>();
    let session = use_context::<SessionContext>();
    let notices = use_context::<Notices>();
    let navigator = use_navigator();

    let mut email = use_signal(String::new);
    let mut submitting = use_signal(|| false);

    let on_submit = move |_| {
        if submitting() {
            return;
        }
        let auth = ctx.auth();
        let address = email();
        spawn(async move {
            submitting.set(true);
            match auth.sign_in(&address).await {
                Ok(identity) => {
                    session.set_identity(Some(identity));
                    navigator.push(Route::Dashboard {});
                }
                Err(services::AuthError::EmptyEmail) => {
                    notices.error("Enter an email address to sign in");
                }
                Err(_) => {
                    notices.error("Sign in failed. Please try again.");
                }
            }
            submitting.set(false);
        });
    };

    rsx! {
        div { class: "page signin-page",
            div { class: "signin-card",
                h1 { class: "signin-card__title", "Sign In" }
                p { class: "signin-card__subtitle",
                    "Use your email address. New addresses get a fresh account."
                }
                label { class: "field-label", r#for: "signin-email", "Email" }
                input {
                    class: "field-input",
                    id: "signin-email",
                    r#type: "email",
                    placeholder: "you@example.com",
                    value: "{email()}",
                    oninput: move |evt| email.set(evt.value()),
                }
                button {
                    class: "btn btn-primary btn-lg signin-card__submit",
                    r#type: "button",
                    disabled: submitting() || email().trim().is_empty(),
                    onclick: on_submit,
                    if submitting() { "Signing in..." } else { "Sign In" }
                }
            }
        }
    }
}
