//! Handlers for `/profiles`. A profile row is created on first access.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use dreamhome_core::types::DbId;
use dreamhome_db::models::profile::{UpdateProfile, UserProfile};
use dreamhome_db::repositories::ProfileRepo;
use dreamhome_db::{Filter, TableAccessor};

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::handlers::users::find_user;
use crate::middleware::auth::AuthUser;
use crate::response::Saved;
use crate::state::AppState;

/// GET /api/profiles/me
pub async fn get_my_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<UserProfile>> {
    Ok(Json(ProfileRepo::get_or_create(&state.pool, user.user_id).await?))
}

/// PATCH /api/profiles/me
pub async fn update_my_profile(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(input): AppJson<UpdateProfile>,
) -> AppResult<Json<Saved<UserProfile>>> {
    ProfileRepo::get_or_create(&state.pool, user.user_id).await?;

    let patch = input.to_patch(Utc::now());
    TableAccessor::<UserProfile>::update(
        &state.pool,
        &Filter::by_key::<UserProfile>(user.user_id),
        &patch,
    )
    .await?;

    let profile = ProfileRepo::get_or_create(&state.pool, user.user_id).await?;
    tracing::debug!(user_id = user.user_id, fields = patch.len(), "Profile updated");

    Ok(Json(Saved::new("Profile updated successfully", "profile", profile)))
}

/// GET /api/profiles/{user_id}
pub async fn get_profile(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(user_id): AppPath<DbId>,
) -> AppResult<Json<UserProfile>> {
    find_user(&state.pool, user_id).await?;
    user.actor().ensure_self_or_admin(user_id)?;
    Ok(Json(ProfileRepo::get_or_create(&state.pool, user_id).await?))
}
