use std::sync::Arc;
use thiserror::Error;

use interview_core::Clock;
use interview_core::model::{Profile, ProfileFields, ProfileId, UserId};
use storage::repository::{ProfileRepository, StorageError};

/// Errors emitted by `ProfileService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProfileServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Single-record read/update of the signed-in user's profile.
#[derive(Clone)]
pub struct ProfileService {
    clock: Clock,
    profiles: Arc<dyn ProfileRepository>,
}

impl ProfileService {
    #[must_use]
    pub fn new(clock: Clock, profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { clock, profiles }
    }

    /// The user's profile. Callers fall back to empty fields when this
    /// fails; a read failure is not surfaced to the user.
    ///
    /// # Errors
    ///
    /// Returns `ProfileServiceError` for storage failures.
    pub async fn get(&self, user_id: UserId) -> Result<Option<Profile>, ProfileServiceError> {
        Ok(self.profiles.get_by_user(user_id).await?)
    }

    /// Full-field overwrite of the user's profile. Creates the row when the
    /// sign-in bootstrap did not.
    ///
    /// # Errors
    ///
    /// Returns `ProfileServiceError` for storage failures; local edits are
    /// the caller's to keep for retry.
    pub async fn update(
        &self,
        user_id: UserId,
        fields: ProfileFields,
    ) -> Result<Profile, ProfileServiceError> {
        let now = self.clock.now();
        let mut profile = match self.profiles.get_by_user(user_id).await? {
            Some(profile) => profile,
            None => Profile::new(ProfileId::generate(), user_id, now),
        };
        profile.apply(fields, now);
        self.profiles.upsert_profile(&profile).await?;
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use interview_core::model::ExperienceLevel;
    use interview_core::time::fixed_clock;
    use storage::repository::InMemoryRepository;

    #[tokio::test]
    async fn update_overwrites_all_fields() {
        let repo = Arc::new(InMemoryRepository::new());
        let service = ProfileService::new(fixed_clock(), repo);
        let user_id = UserId::derived_from("edit@example.com");

        let first = service
            .update(
                user_id,
                ProfileFields {
                    full_name: Some("First Name".to_string()),
                    target_role: Some("SRE".to_string()),
                    experience_level: Some(ExperienceLevel::Lead),
                    ..ProfileFields::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(first.full_name(), Some("First Name"));

        // Overwrite with a sparser set of fields; everything else clears.
        let second = service
            .update(
                user_id,
                ProfileFields {
                    full_name: Some("Second Name".to_string()),
                    ..ProfileFields::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(second.full_name(), Some("Second Name"));
        assert_eq!(second.target_role(), None);
        assert_eq!(second.experience_level(), None);
        assert_eq!(second.id(), first.id());

        let fetched = service.get(user_id).await.unwrap().unwrap();
        assert_eq!(fetched, second);
    }

    #[tokio::test]
    async fn missing_profile_reads_as_none() {
        let repo = Arc::new(InMemoryRepository::new());
        let service = ProfileService::new(fixed_clock(), repo);
        let found = service
            .get(UserId::derived_from("ghost@example.com"))
            .await
            .unwrap();
        assert!(found.is_none());
    }
}
