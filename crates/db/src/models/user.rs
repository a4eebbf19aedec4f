//! User accounts.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use dreamhome_core::types::{DbId, Timestamp};

use crate::accessor::{Record, Table};
use crate::models::profile::UserProfile;

/// Full user row from the `users` table.
///
/// Contains the password hash -- never serialize this directly.
/// Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub user_id: DbId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    /// Staff record this account belongs to, if the user is an agent.
    pub staff_id: Option<String>,
    pub is_active: bool,
    pub is_approved: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Table for User {
    const NAME: &'static str = "users";
    const PRIMARY_KEY: &'static str = "user_id";
    const COLUMNS: &'static str = "user_id, username, email, password_hash, role, staff_id, \
        is_active, is_approved, created_at, updated_at";
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub user_id: DbId,
    pub username: String,
    pub email: String,
    pub role: String,
    pub staff_id: Option<String>,
    pub is_active: bool,
    pub is_approved: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            username: user.username,
            email: user.email,
            role: user.role,
            staff_id: user.staff_id,
            is_active: user.is_active,
            is_approved: user.is_approved,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// A user merged with their profile, as returned by login and validate.
#[derive(Debug, Clone, Serialize)]
pub struct UserWithProfile {
    #[serde(flatten)]
    pub user: UserResponse,
    pub profile: UserProfile,
}

/// Registration payload. The password is hashed before it reaches the store.
#[derive(Debug, Default, Deserialize)]
pub struct CreateUser {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    pub staff_id: Option<String>,
}

/// Validated, hashed registration ready for insert.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub staff_id: Option<String>,
}

impl NewUser {
    pub fn to_record(&self) -> Record {
        Record::new()
            .set("username", self.username.as_str())
            .set("email", self.email.as_str())
            .set("password_hash", self.password_hash.as_str())
            .set("role", self.role.as_str())
            .set("staff_id", self.staff_id.as_deref())
            .set("is_active", true)
            .set("is_approved", true)
    }
}

/// Account patch. Role, activation and staff link are admin-only; the
/// handler enforces that before building the patch.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUser {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    pub staff_id: Option<String>,
    pub is_active: Option<bool>,
}

impl UpdateUser {
    /// Whether the patch touches fields only an admin may change.
    pub fn touches_privileged_fields(&self) -> bool {
        self.role.is_some() || self.staff_id.is_some() || self.is_active.is_some()
    }

    /// Column patch; `password_hash` is supplied by the caller when a new
    /// password was given.
    pub fn to_patch(&self, password_hash: Option<String>, now: Timestamp) -> Record {
        let patch = Record::new()
            .set_some("username", self.username.as_deref().map(str::trim))
            .set_some("email", self.email.as_deref().map(str::trim))
            .set_some("password_hash", password_hash)
            .set_some("role", self.role.as_deref())
            .set_some("staff_id", self.staff_id.as_deref())
            .set_some("is_active", self.is_active);
        if patch.is_empty() {
            patch
        } else {
            patch.set("updated_at", now)
        }
    }
}

