use dioxus::prelude::*;
use std::time::Duration;

/// How long a notice stays on screen.
const NOTICE_TTL: Duration = Duration::from_secs(4);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

impl NoticeLevel {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            NoticeLevel::Info => "notice notice--info",
            NoticeLevel::Success => "notice notice--success",
            NoticeLevel::Error => "notice notice--error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub level: NoticeLevel,
    pub message: String,
}

/// Transient notice queue, the app's user-visible log. Pushed notices
/// auto-dismiss after a few seconds.
#[derive(Clone, Copy)]
pub struct Notices {
    items: Signal<Vec<Notice>>,
    next_id: Signal<u64>,
}

impl Notices {
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Signal::new(Vec::new()),
            next_id: Signal::new(0),
        }
    }

    pub fn push(&self, level: NoticeLevel, message: impl Into<String>) {
        let mut next_id = self.next_id;
        let id = next_id();
        next_id.set(id + 1);

        let mut items = self.items;
        items.write().push(Notice {
            id,
            level,
            message: message.into(),
        });

        spawn(async move {
            tokio::time::sleep(NOTICE_TTL).await;
            items.write().retain(|notice| notice.id != id);
        });
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(NoticeLevel::Info, message);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(NoticeLevel::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(NoticeLevel::Error, message);
    }

    pub fn dismiss(&self, id: u64) {
        let mut items = self.items;
        items.write().retain(|notice| notice.id != id);
    }

    #[must_use]
    pub fn current(&self) -> Vec<Notice> {
        self.items.read().clone()
    }
}

impl Default for Notices {
    fn default() -> Self {
        Self::new()
    }
}

#[component]
pub fn NoticeStack() -> Element {
    let notices = use_context::<Notices>();
    let current = notices.current();

    rsx! {
        div { class: "notice-stack", aria_live: "polite",
            for notice in current {
                div {
                    key: "{notice.id}",
                    class: "{notice.level.class()}",
                    span { class: "notice__message", "{notice.message}" }
                    button {
                        class: "notice__dismiss",
                        r#type: "button",
                        onclick: move |_| notices.dismiss(notice.id),
                        "×"
                    }
                }
            }
        }
    }
}
