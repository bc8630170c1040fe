use dioxus::prelude::*;

use interview_core::model::UserId;
use services::UserIdentity;

/// Signed-in state shared by the navbar and every gated page.
///
/// `resolved` stays false while the identity is still being looked up, so
/// pages can gate rendering on it instead of flashing a signed-out state.
#[derive(Clone, Copy)]
pub struct SessionContext {
    identity: Signal<Option<UserIdentity>>,
    resolved: Signal<bool>,
}

impl SessionContext {
    #[must_use]
    pub fn new() -> Self {
        Self {
            identity: Signal::new(None),
            resolved: Signal::new(false),
        }
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        *self.resolved.read()
    }

    #[must_use]
    pub fn identity(&self) -> Option<UserIdentity> {
        self.identity.read().clone()
    }

    #[must_use]
    pub fn user_id(&self) -> Option<UserId> {
        self.identity.read().as_ref().map(UserIdentity::id)
    }

    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.identity.read().is_some()
    }

    pub fn set_identity(&self, identity: Option<UserIdentity>) {
        let mut signal = self.identity;
        signal.set(identity);
    }

    pub fn mark_resolved(&self) {
        let mut signal = self.resolved;
        signal.set(true);
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}
