use interview_core::model::{Profile, UserId};

use super::{SqliteRepository, mapping::map_profile_row};
use crate::repository::{ProfileRepository, StorageError};

#[async_trait::async_trait]
impl ProfileRepository for SqliteRepository {
    async fn upsert_profile(&self, profile: &Profile) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO profiles (
                id, user_id, full_name, avatar_url, target_role,
                experience_level, created_at, updated_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ON CONFLICT(user_id) DO UPDATE SET
                -- an update is a full-field overwrite; id and created_at are stable
                full_name = excluded.full_name,
                avatar_url = excluded.avatar_url,
                target_role = excluded.target_role,
                experience_level = excluded.experience_level,
                updated_at = excluded.updated_at
            ",
        )
        .bind(profile.id().to_string())
        .bind(profile.user_id().to_string())
        .bind(profile.full_name().map(str::to_owned))
        .bind(profile.avatar_url().map(|u| u.as_str().to_owned()))
        .bind(profile.target_role().map(str::to_owned))
        .bind(profile.experience_level().map(|l| l.as_str().to_owned()))
        .bind(profile.created_at())
        .bind(profile.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }

    async fn get_by_user(&self, user_id: UserId) -> Result<Option<Profile>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT
                id, user_id, full_name, avatar_url, target_role,
                experience_level, created_at, updated_at
            FROM profiles
            WHERE user_id = ?1
            ",
        )
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        row.map(|row| map_profile_row(&row)).transpose()
    }
}
