//! Per-user profile details.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use dreamhome_core::types::{DbId, Timestamp};

use crate::accessor::{Record, Table};

/// A row from the `user_profiles` table. One per user, keyed by `user_id`.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserProfile {
    pub user_id: DbId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub updated_at: Timestamp,
}

impl Table for UserProfile {
    const NAME: &'static str = "user_profiles";
    const PRIMARY_KEY: &'static str = "user_id";
    const COLUMNS: &'static str =
        "user_id, first_name, last_name, phone, bio, avatar_url, updated_at";
}

/// Patch for the caller's own profile.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

impl UpdateProfile {
    pub fn to_patch(&self, now: Timestamp) -> Record {
        let patch = Record::new()
            .set_some("first_name", self.first_name.as_deref())
            .set_some("last_name", self.last_name.as_deref())
            .set_some("phone", self.phone.as_deref())
            .set_some("bio", self.bio.as_deref())
            .set_some("avatar_url", self.avatar_url.as_deref());
        if patch.is_empty() {
            patch
        } else {
            patch.set("updated_at", now)
        }
    }
}
