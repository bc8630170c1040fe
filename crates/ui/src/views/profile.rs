use dioxus::prelude::*;
use dioxus_router::Link;

use interview_core::model::{AvatarUrl, ExperienceLevel, ProfileFields};

use crate::context::AppContext;
use crate::notice::Notices;
use crate::routes::Route;
use crate::session::SessionContext;
use crate::vm::initials;

#[component]
pub fn ProfileView() -> Element {
    let ctx = use_context::<AppContext>();
    let session = use_context::<SessionContext>();
    let notices = use_context::<Notices>();

    let mut full_name = use_signal(String::new);
    let mut avatar_url = use_signal(String::new);
    let mut target_role = use_signal(String::new);
    let mut experience = use_signal(|| None::<ExperienceLevel>);
    let mut saving = use_signal(|| false);
    let mut loaded = use_signal(|| false);

    let profile_service = ctx.profiles();
    let profile_service_for_loader = profile_service.clone();

    // Read failure falls back silently to empty fields; the editor still
    // works and a save recreates the row. Hooks run unconditionally; the
    // signed-out gates come after.
    let _loader = use_resource(move || {
        let profiles = profile_service_for_loader.clone();
        let user_id = session.user_id();
        async move {
            let Some(user_id) = user_id else {
                return;
            };
            if let Ok(Some(profile)) = profiles.get(user_id).await {
                full_name.set(profile.full_name().unwrap_or_default().to_string());
                avatar_url.set(
                    profile
                        .avatar_url()
                        .map(|u| u.as_str().to_string())
                        .unwrap_or_default(),
                );
                target_role.set(profile.target_role().unwrap_or_default().to_string());
                experience.set(profile.experience_level());
            }
            loaded.set(true);
        }
    });

    if !session.is_resolved() {
        return rsx! {
            div { class: "page", p { "Loading..." } }
        };
    }
    let Some(identity) = session.identity() else {
        return rsx! {
            div { class: "page",
                p { "Sign in to edit your profile." }
                Link { class: "btn btn-primary", to: Route::SignIn {}, "Sign In" }
            }
        };
    };
    let user_id = identity.id();
    let email = identity.email().to_string();

    let on_save = move |_| {
        if saving() {
            return;
        }
        let profiles = profile_service.clone();

        let avatar_raw = avatar_url();
        let avatar = if avatar_raw.trim().is_empty() {
            None
        } else {
            match AvatarUrl::new(avatar_raw.trim()) {
                Ok(url) => Some(url),
                Err(_) => {
                    notices.error("Avatar must be a valid URL");
                    return;
                }
            }
        };

        let fields = ProfileFields {
            full_name: Some(full_name()),
            avatar_url: avatar,
            target_role: Some(target_role()),
            experience_level: experience(),
        };

        spawn(async move {
            saving.set(true);
            match profiles.update(user_id, fields).await {
                Ok(_) => notices.success("Profile updated successfully!"),
                // Local edits stay in the inputs for a manual retry.
                Err(_) => notices.error("Failed to save profile"),
            }
            saving.set(false);
        });
    };

    if !loaded() {
        return rsx! {
            div { class: "page", p { "Loading..." } }
        };
    }

    let avatar_initials = {
        let name = full_name();
        if name.trim().is_empty() {
            "U".to_string()
        } else {
            initials(&name)
        }
    };

    rsx! {
        div { class: "page profile-page",
            header { class: "view-header",
                h1 { class: "view-title", "Profile Settings" }
                p { class: "view-subtitle", "Manage your account and interview preferences" }
            }

            div { class: "profile-card",
                div { class: "avatar-row",
                    span { class: "avatar-fallback", "{avatar_initials}" }
                    div {
                        h3 { class: "avatar-row__name",
                            if full_name().trim().is_empty() { "User" } else { "{full_name()}" }
                        }
                        p { class: "avatar-row__email", "{email}" }
                    }
                }
            }

            div { class: "profile-card",
                h3 { class: "profile-card__title", "Personal Information" }
                label { class: "field-label", r#for: "profile-name", "Full Name" }
                input {
                    class: "field-input",
                    id: "profile-name",
                    r#type: "text",
                    placeholder: "John Doe",
                    value: "{full_name()}",
                    oninput: move |evt| full_name.set(evt.value()),
                }

                label { class: "field-label", r#for: "profile-email", "Email" }
                input {
                    class: "field-input field-input--disabled",
                    id: "profile-email",
                    r#type: "email",
                    disabled: true,
                    value: "{email}",
                }
                p { class: "setup-hint", "Email cannot be changed" }

                label { class: "field-label", r#for: "profile-avatar", "Avatar URL" }
                input {
                    class: "field-input",
                    id: "profile-avatar",
                    r#type: "url",
                    placeholder: "https://example.com/avatar.jpg",
                    value: "{avatar_url()}",
                    oninput: move |evt| avatar_url.set(evt.value()),
                }
            }

            div { class: "profile-card",
                h3 { class: "profile-card__title", "Career Preferences" }
                label { class: "field-label", r#for: "profile-role", "Target Role" }
                input {
                    class: "field-input",
                    id: "profile-role",
                    r#type: "text",
                    placeholder: "e.g., Software Engineer, Product Manager",
                    value: "{target_role()}",
                    oninput: move |evt| target_role.set(evt.value()),
                }

                span { class: "field-label", "Experience Level" }
                div { class: "toggle-row",
                    for level in ExperienceLevel::ALL {
                        {
                            let toggle_class = if experience() == Some(level) {
                                "toggle toggle--on"
                            } else {
                                "toggle"
                            };
                            rsx! {
                                button {
                                    class: "{toggle_class}",
                                    r#type: "button",
                                    onclick: move |_| experience.set(Some(level)),
                                    "{level.label()}"
                                }
                            }
                        }
                    }
                }
            }

            button {
                class: "btn btn-primary btn-lg profile-save",
                r#type: "button",
                disabled: saving(),
                onclick: on_save,
                if saving() { "Saving..." } else { "Save Changes" }
            }
        }
    }
}
