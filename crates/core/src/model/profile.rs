use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use url::Url;

use crate::model::ids::{ProfileId, UserId};

/// Validated avatar reference (absolute URL).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarUrl(Url);

impl AvatarUrl {
    /// Parse and validate an avatar URL.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::InvalidAvatarUrl` if the value is not a valid
    /// absolute URL.
    pub fn new(value: impl AsRef<str>) -> Result<Self, ProfileError> {
        let url = Url::parse(value.as_ref()).map_err(ProfileError::InvalidAvatarUrl)?;
        Ok(Self(url))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for AvatarUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Self-reported experience level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExperienceLevel {
    Entry,
    Mid,
    Senior,
    Lead,
}

impl ExperienceLevel {
    pub const ALL: [ExperienceLevel; 4] = [
        ExperienceLevel::Entry,
        ExperienceLevel::Mid,
        ExperienceLevel::Senior,
        ExperienceLevel::Lead,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "entry",
            ExperienceLevel::Mid => "mid",
            ExperienceLevel::Senior => "senior",
            ExperienceLevel::Lead => "lead",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "Entry",
            ExperienceLevel::Mid => "Mid",
            ExperienceLevel::Senior => "Senior",
            ExperienceLevel::Lead => "Lead",
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ExperienceLevel {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "entry" => Ok(ExperienceLevel::Entry),
            "mid" => Ok(ExperienceLevel::Mid),
            "senior" => Ok(ExperienceLevel::Senior),
            "lead" => Ok(ExperienceLevel::Lead),
            other => Err(ProfileError::UnknownExperienceLevel {
                raw: other.to_string(),
            }),
        }
    }
}

/// The editable portion of a profile. Updates overwrite every field; there
/// is no partial patch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileFields {
    pub full_name: Option<String>,
    pub avatar_url: Option<AvatarUrl>,
    pub target_role: Option<String>,
    pub experience_level: Option<ExperienceLevel>,
}

impl ProfileFields {
    /// Trim free-text fields, mapping blanks to `None`.
    #[must_use]
    pub fn normalized(self) -> Self {
        let trim = |value: Option<String>| {
            value
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };
        Self {
            full_name: trim(self.full_name),
            avatar_url: self.avatar_url,
            target_role: trim(self.target_role),
            experience_level: self.experience_level,
        }
    }
}

/// One profile per user. Created at sign-in, mutated only through
/// [`Profile::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    id: ProfileId,
    user_id: UserId,
    fields: ProfileFields,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Profile {
    /// A fresh, empty profile for a newly signed-in user.
    #[must_use]
    pub fn new(id: ProfileId, user_id: UserId, now: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id,
            fields: ProfileFields::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Rehydrate a profile from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::InvalidTimeRange` if `updated_at` precedes
    /// `created_at`.
    pub fn from_persisted(
        id: ProfileId,
        user_id: UserId,
        fields: ProfileFields,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, ProfileError> {
        if updated_at < created_at {
            return Err(ProfileError::InvalidTimeRange);
        }
        Ok(Self {
            id,
            user_id,
            fields,
            created_at,
            updated_at,
        })
    }

    /// Full-field overwrite, stamping `updated_at`.
    pub fn apply(&mut self, fields: ProfileFields, now: DateTime<Utc>) {
        self.fields = fields.normalized();
        self.updated_at = now;
    }

    #[must_use]
    pub fn id(&self) -> ProfileId {
        self.id
    }

    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    #[must_use]
    pub fn fields(&self) -> &ProfileFields {
        &self.fields
    }

    #[must_use]
    pub fn full_name(&self) -> Option<&str> {
        self.fields.full_name.as_deref()
    }

    #[must_use]
    pub fn avatar_url(&self) -> Option<&AvatarUrl> {
        self.fields.avatar_url.as_ref()
    }

    #[must_use]
    pub fn target_role(&self) -> Option<&str> {
        self.fields.target_role.as_deref()
    }

    #[must_use]
    pub fn experience_level(&self) -> Option<ExperienceLevel> {
        self.fields.experience_level
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProfileError {
    #[error("invalid avatar url: {0}")]
    InvalidAvatarUrl(#[source] url::ParseError),

    #[error("unknown experience level: {raw}")]
    UnknownExperienceLevel { raw: String },

    #[error("updated_at is before created_at")]
    InvalidTimeRange,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn apply_overwrites_every_field() {
        let now = fixed_now();
        let mut profile = Profile::new(ProfileId::generate(), UserId::generate(), now);
        profile.apply(
            ProfileFields {
                full_name: Some("Ada Lovelace".to_string()),
                avatar_url: None,
                target_role: Some("Staff Engineer".to_string()),
                experience_level: Some(ExperienceLevel::Senior),
            },
            now,
        );

        // A later apply with empty fields clears the earlier values.
        let later = now + chrono::Duration::minutes(1);
        profile.apply(ProfileFields::default(), later);
        assert_eq!(profile.full_name(), None);
        assert_eq!(profile.target_role(), None);
        assert_eq!(profile.experience_level(), None);
        assert_eq!(profile.updated_at(), later);
    }

    #[test]
    fn normalize_trims_blank_text() {
        let fields = ProfileFields {
            full_name: Some("  ".to_string()),
            avatar_url: None,
            target_role: Some("  Engineer ".to_string()),
            experience_level: None,
        }
        .normalized();
        assert_eq!(fields.full_name, None);
        assert_eq!(fields.target_role.as_deref(), Some("Engineer"));
    }

    #[test]
    fn avatar_url_rejects_garbage() {
        assert!(AvatarUrl::new("not a url").is_err());
        assert!(AvatarUrl::new("https://example.com/a.png").is_ok());
    }

    #[test]
    fn from_persisted_rejects_reversed_timestamps() {
        let now = fixed_now();
        let err = Profile::from_persisted(
            ProfileId::generate(),
            UserId::generate(),
            ProfileFields::default(),
            now,
            now - chrono::Duration::seconds(1),
        )
        .unwrap_err();
        assert!(matches!(err, ProfileError::InvalidTimeRange));
    }

    #[test]
    fn experience_level_roundtrip() {
        for level in ExperienceLevel::ALL {
            assert_eq!(level.as_str().parse::<ExperienceLevel>().unwrap(), level);
        }
    }
}
