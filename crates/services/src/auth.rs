use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use interview_core::Clock;
use interview_core::model::{Profile, ProfileId, UserId};
use storage::repository::{ProfileRepository, StorageError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error("email cannot be empty")]
    EmptyEmail,

    #[error("identity provider failure: {0}")]
    Provider(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// The signed-in user as the rest of the app sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    id: UserId,
    email: String,
}

impl UserIdentity {
    #[must_use]
    pub fn new(id: UserId, email: String) -> Self {
        Self { id, email }
    }

    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}

/// Seam over the authentication backend. Pages resolve the current identity
/// through this before rendering anything gated.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// The currently signed-in identity, if any.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` when the provider cannot be reached.
    async fn current(&self) -> Result<Option<UserIdentity>, AuthError>;

    /// Sign in with an email address.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::EmptyEmail` for a blank address, or a provider
    /// failure.
    async fn sign_in(&self, email: &str) -> Result<UserIdentity, AuthError>;

    /// Drop the current identity.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` when the provider cannot be reached.
    async fn sign_out(&self) -> Result<(), AuthError>;
}

/// Identity provider holding accounts in process memory. The user id is
/// derived from the normalized email, so the same address signs in to the
/// same account across runs.
#[derive(Default)]
pub struct LocalIdentityProvider {
    current: Mutex<Option<UserIdentity>>,
}

impl LocalIdentityProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_err<T>(err: std::sync::PoisonError<T>) -> AuthError {
        AuthError::Provider(err.to_string())
    }
}

#[async_trait]
impl IdentityProvider for LocalIdentityProvider {
    async fn current(&self) -> Result<Option<UserIdentity>, AuthError> {
        let guard = self.current.lock().map_err(Self::lock_err)?;
        Ok(guard.clone())
    }

    async fn sign_in(&self, email: &str) -> Result<UserIdentity, AuthError> {
        let email = email.trim().to_lowercase();
        if email.is_empty() {
            return Err(AuthError::EmptyEmail);
        }

        let identity = UserIdentity::new(UserId::derived_from(&email), email);
        let mut guard = self.current.lock().map_err(Self::lock_err)?;
        *guard = Some(identity.clone());
        Ok(identity)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let mut guard = self.current.lock().map_err(Self::lock_err)?;
        *guard = None;
        Ok(())
    }
}

/// Auth gate used by every page: resolves the identity and, on sign-in,
/// makes sure the user's profile row exists.
#[derive(Clone)]
pub struct AuthService {
    clock: Clock,
    provider: Arc<dyn IdentityProvider>,
    profiles: Arc<dyn ProfileRepository>,
}

impl AuthService {
    #[must_use]
    pub fn new(
        clock: Clock,
        provider: Arc<dyn IdentityProvider>,
        profiles: Arc<dyn ProfileRepository>,
    ) -> Self {
        Self {
            clock,
            provider,
            profiles,
        }
    }

    /// The currently signed-in identity, if any.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` for provider failures.
    pub async fn current(&self) -> Result<Option<UserIdentity>, AuthError> {
        self.provider.current().await
    }

    /// Sign in and ensure the account's profile exists.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` for provider or storage failures.
    pub async fn sign_in(&self, email: &str) -> Result<UserIdentity, AuthError> {
        let identity = self.provider.sign_in(email).await?;

        if self.profiles.get_by_user(identity.id()).await?.is_none() {
            let profile = Profile::new(ProfileId::generate(), identity.id(), self.clock.now());
            self.profiles.upsert_profile(&profile).await?;
        }

        Ok(identity)
    }

    /// Sign out.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` for provider failures.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        self.provider.sign_out().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use interview_core::time::fixed_clock;
    use storage::repository::InMemoryRepository;

    fn service() -> (AuthService, Arc<InMemoryRepository>) {
        let repo = Arc::new(InMemoryRepository::new());
        let service = AuthService::new(
            fixed_clock(),
            Arc::new(LocalIdentityProvider::new()),
            repo.clone(),
        );
        (service, repo)
    }

    #[tokio::test]
    async fn sign_in_creates_the_profile_once() {
        let (service, repo) = service();
        let identity = service.sign_in("User@Example.com ").await.unwrap();
        assert_eq!(identity.email(), "user@example.com");

        let profile = repo.get_by_user(identity.id()).await.unwrap().unwrap();
        let created_at = profile.created_at();

        // A second sign-in resolves to the same user and keeps the profile.
        let again = service.sign_in("user@example.com").await.unwrap();
        assert_eq!(again.id(), identity.id());
        let profile = repo.get_by_user(identity.id()).await.unwrap().unwrap();
        assert_eq!(profile.created_at(), created_at);
    }

    #[tokio::test]
    async fn blank_email_is_rejected() {
        let (service, _) = service();
        let err = service.sign_in("   ").await.unwrap_err();
        assert!(matches!(err, AuthError::EmptyEmail));
        assert!(service.current().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn sign_out_clears_the_identity() {
        let (service, _) = service();
        service.sign_in("someone@example.com").await.unwrap();
        assert!(service.current().await.unwrap().is_some());
        service.sign_out().await.unwrap();
        assert!(service.current().await.unwrap().is_none());
    }
}
