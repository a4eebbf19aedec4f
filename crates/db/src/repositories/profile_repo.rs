//! Repository for the `user_profiles` table.

use sqlx::PgPool;
use dreamhome_core::types::DbId;

use crate::accessor::Table;
use crate::models::profile::UserProfile;
use crate::models::user::{User, UserWithProfile};

pub struct ProfileRepo;

impl ProfileRepo {
    /// Fetch a user's profile, creating an empty one on first access.
    pub async fn get_or_create(pool: &PgPool, user_id: DbId) -> Result<UserProfile, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_profiles (user_id) VALUES ($1)
             ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id
             RETURNING {}",
            UserProfile::COLUMNS
        );
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Attach the profile to a user for login/validate responses.
    pub async fn merge(pool: &PgPool, user: User) -> Result<UserWithProfile, sqlx::Error> {
        let profile = Self::get_or_create(pool, user.user_id).await?;
        Ok(UserWithProfile {
            user: user.into(),
            profile,
        })
    }
}
