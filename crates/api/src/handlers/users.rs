//! Handlers for the `/users` resource.
//!
//! Registration is public. Listing, counting and deleting accounts are
//! admin-only; a user may read and update their own account, but role,
//! staff link and activation can only be changed by an admin.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::Utc;
use dreamhome_core::error::CoreError;
use dreamhome_core::roles::{is_known_role, ROLE_USER};
use dreamhome_core::types::DbId;
use dreamhome_core::validation::{present, require_fields, validate_email};
use dreamhome_db::models::staff::Staff;
use dreamhome_db::models::user::{
    CreateUser, NewUser, UpdateUser, User, UserResponse, UserWithProfile,
};
use dreamhome_db::repositories::ProfileRepo;
use dreamhome_db::{Direction, Filter, Query as TableQuery, TableAccessor};
use serde::Serialize;
use sqlx::PgPool;

use crate::auth::password::{check_password_policy, hash_password};
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::handlers::auth::{issue_token, session_headers};
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::{MessageResponse, Saved};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Body of a successful registration.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: &'static str,
    pub user: UserWithProfile,
    pub token: String,
}

/// `{ "total": n }`.
#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub total: i64,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub(crate) async fn find_user(pool: &PgPool, user_id: DbId) -> AppResult<User> {
    let user = TableAccessor::<User>::find_by_key(pool, user_id)
        .await?
        .ok_or_else(|| CoreError::not_found("User", user_id))?;
    Ok(user)
}

/// 400 when another account already uses `email`.
async fn ensure_email_free(pool: &PgPool, email: &str, except: Option<DbId>) -> AppResult<()> {
    let holder = TableAccessor::<User>::find_one(pool, &Filter::new().eq("email", email)).await?;
    match holder {
        Some(user) if Some(user.user_id) != except => {
            Err(CoreError::Validation("User already exists".into()).into())
        }
        _ => Ok(()),
    }
}

async fn ensure_staff_exists(pool: &PgPool, staff_id: Option<&str>) -> AppResult<()> {
    if let Some(staff_id) = staff_id {
        TableAccessor::<Staff>::find_by_key(pool, staff_id)
            .await?
            .ok_or_else(|| CoreError::not_found("Staff", staff_id))?;
    }
    Ok(())
}

fn ensure_known_role(role: &str) -> Result<(), CoreError> {
    if is_known_role(role) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Unknown role '{role}'. Expected 'admin' or 'user'"
        )))
    }
}

fn hash(password: &str) -> AppResult<String> {
    hash_password(password).map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))
}

fn active_users() -> TableQuery {
    TableQuery::filter(Filter::new().eq("is_active", true)).order_by("created_at", Direction::Desc)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/users/create
///
/// Anyone may register an ordinary account and is signed in straight away.
/// An admin caller may also choose the role and staff link; the admin's own
/// session is left untouched.
pub async fn create_user(
    State(state): State<AppState>,
    MaybeAuthUser(caller): MaybeAuthUser,
    AppJson(input): AppJson<CreateUser>,
) -> AppResult<(StatusCode, HeaderMap, Json<RegisterResponse>)> {
    require_fields(&[
        ("username", present(input.username.as_deref())),
        ("email", present(input.email.as_deref())),
        ("password", present(input.password.as_deref())),
    ])?;
    let username = input.username.as_deref().unwrap_or_default().trim();
    let email = input.email.as_deref().unwrap_or_default().trim();
    let password = input.password.as_deref().unwrap_or_default();

    validate_email(email)?;
    check_password_policy(password)?;

    let by_admin = caller.as_ref().is_some_and(AuthUser::is_admin);
    let role = input.role.as_deref().map(str::trim).unwrap_or(ROLE_USER);
    ensure_known_role(role)?;
    if !by_admin && (role != ROLE_USER || input.staff_id.is_some()) {
        return Err(CoreError::Forbidden("Only admins can assign roles or staff links".into()).into());
    }

    ensure_email_free(&state.pool, email, None).await?;
    ensure_staff_exists(&state.pool, input.staff_id.as_deref()).await?;

    let new_user = NewUser {
        username: username.to_string(),
        email: email.to_string(),
        password_hash: hash(password)?,
        role: role.to_string(),
        staff_id: input.staff_id.clone(),
    };
    let user = TableAccessor::<User>::create(&state.pool, &new_user.to_record()).await?;

    let token = issue_token(&state, &user)?;
    let headers = if by_admin {
        HeaderMap::new()
    } else {
        session_headers(&state, &token)?
    };

    tracing::info!(
        user_id = user.user_id,
        role = %user.role,
        created_by = ?caller.as_ref().map(|c| c.user_id),
        "User registered"
    );
    let user = ProfileRepo::merge(&state.pool, user).await?;

    Ok((
        StatusCode::CREATED,
        headers,
        Json(RegisterResponse {
            message: "User registered successfully",
            user,
            token,
        }),
    ))
}

/// GET /api/users?limit=&offset=
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    AppQuery(params): AppQuery<PaginationParams>,
) -> AppResult<Json<Vec<UserResponse>>> {
    let query = active_users().limit(params.limit()).offset(params.offset());
    let users = TableAccessor::<User>::find(&state.pool, &query).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /api/users/active
pub async fn list_active_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = TableAccessor::<User>::find(&state.pool, &active_users()).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /api/users/count
pub async fn count_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<CountResponse>> {
    let total =
        TableAccessor::<User>::count(&state.pool, &Filter::new().eq("is_active", true)).await?;
    Ok(Json(CountResponse { total }))
}

/// GET /api/users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(user_id): AppPath<DbId>,
) -> AppResult<Json<UserResponse>> {
    let found = find_user(&state.pool, user_id).await?;
    user.actor().ensure_self_or_admin(user_id)?;
    Ok(Json(found.into()))
}

/// PUT /api/users/{user_id}
pub async fn update_user(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(user_id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateUser>,
) -> AppResult<Json<Saved<UserResponse>>> {
    if let Some(role) = input.role.as_deref() {
        ensure_known_role(role)?;
    }
    let email = input.email.as_deref().map(str::trim);
    if let Some(email) = email {
        validate_email(email)?;
    }
    if let Some(password) = input.password.as_deref() {
        check_password_policy(password)?;
    }

    find_user(&state.pool, user_id).await?;
    ensure_staff_exists(&state.pool, input.staff_id.as_deref()).await?;

    let actor = user.actor();
    actor.ensure_self_or_admin(user_id)?;
    if input.touches_privileged_fields() && !actor.is_admin() {
        return Err(CoreError::Forbidden(
            "Only admins can change role, staff link or activation".into(),
        )
        .into());
    }

    if let Some(email) = email {
        ensure_email_free(&state.pool, email, Some(user_id)).await?;
    }
    let password_hash = input.password.as_deref().map(hash).transpose()?;

    let by_key = Filter::by_key::<User>(user_id);
    TableAccessor::<User>::update(&state.pool, &by_key, &input.to_patch(password_hash, Utc::now()))
        .await?;

    let updated = find_user(&state.pool, user_id).await?;
    tracing::info!(user_id, updated_by = user.user_id, "User updated");

    Ok(Json(Saved::new("User updated successfully", "user", updated.into())))
}

/// DELETE /api/users/{user_id}
pub async fn delete_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppPath(user_id): AppPath<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let deleted = TableAccessor::<User>::delete(&state.pool, &Filter::by_key::<User>(user_id)).await?;
    if deleted == 0 {
        return Err(CoreError::not_found("User", user_id).into());
    }
    tracing::info!(user_id, admin_id = admin.user_id, "User deleted");

    Ok(Json(MessageResponse {
        message: "User deleted successfully",
    }))
}
