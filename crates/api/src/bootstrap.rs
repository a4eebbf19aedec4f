//! First-start admin account.

use dreamhome_core::roles::ROLE_ADMIN;
use dreamhome_core::types::DbId;
use dreamhome_db::models::user::{NewUser, User};
use dreamhome_db::repositories::ProfileRepo;
use dreamhome_db::{Filter, TableAccessor};
use sqlx::PgPool;

use crate::auth::password::hash_password;
use crate::config::BootstrapAdmin;
use crate::error::{AppError, AppResult};

/// Create the configured admin account unless an account with that email
/// already exists. Returns the account's id either way.
///
/// An existing account is left untouched: its password and role are not
/// reset on restart.
#[tracing::instrument(skip_all, fields(email = %admin.email))]
pub async fn ensure_admin_user(pool: &PgPool, admin: &BootstrapAdmin) -> AppResult<DbId> {
    let by_email = Filter::new().eq("email", admin.email.as_str());
    if let Some(existing) = TableAccessor::<User>::find_one(pool, &by_email).await? {
        tracing::debug!(user_id = existing.user_id, "Bootstrap admin already present");
        return Ok(existing.user_id);
    }

    let password_hash = hash_password(&admin.password)
        .map_err(|e| AppError::InternalError(format!("Failed to hash admin password: {e}")))?;

    let new_user = NewUser {
        username: admin.email.clone(),
        email: admin.email.clone(),
        password_hash,
        role: ROLE_ADMIN.to_string(),
        staff_id: None,
    };
    let user = TableAccessor::<User>::create(pool, &new_user.to_record()).await?;
    ProfileRepo::get_or_create(pool, user.user_id).await?;

    tracing::info!(user_id = user.user_id, "Bootstrap admin created");
    Ok(user.user_id)
}
