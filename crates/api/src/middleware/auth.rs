//! Session-token authentication extractors for Axum handlers.
//!
//! The token is read from the `token` cookie, falling back to an
//! `Authorization: Bearer` header. The user row is loaded on every request so
//! deactivation and role changes take effect immediately.

use axum::extract::FromRequestParts;
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::request::Parts;
use dreamhome_core::access::Actor;
use dreamhome_core::error::CoreError;
use dreamhome_core::roles::ROLE_ADMIN;
use dreamhome_core::types::DbId;
use dreamhome_db::models::user::User;
use dreamhome_db::TableAccessor;

use crate::auth::cookie::token_from_cookie_header;
use crate::auth::jwt::validate_token;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Authenticated user.
///
/// Use this as an extractor parameter in any handler that requires authentication:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
    pub username: String,
    pub email: String,
    /// `"admin"` or `"user"`.
    pub role: String,
    /// Linked staff record; set for agents.
    pub staff_id: Option<String>,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }

    /// Borrowed view used by the access rules in `dreamhome_core::access`.
    pub fn actor(&self) -> Actor<'_> {
        Actor {
            user_id: self.user_id,
            role: &self.role,
            staff_id: self.staff_id.as_deref(),
        }
    }
}

impl From<User> for AuthUser {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            username: user.username,
            email: user.email,
            role: user.role,
            staff_id: user.staff_id,
        }
    }
}

fn unauthorized(message: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(message.into()))
}

/// Session token from the cookie, else from a Bearer header.
fn request_token(parts: &Parts) -> Option<&str> {
    let from_cookie = parts
        .headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(token_from_cookie_header);

    from_cookie.or_else(|| {
        parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
    })
}

/// `Ok(None)` when no token was sent; `Err` (401) when a token was sent but
/// is invalid, expired, or belongs to a missing or deactivated account.
async fn authenticate(parts: &Parts, state: &AppState) -> AppResult<Option<AuthUser>> {
    let Some(token) = request_token(parts) else {
        return Ok(None);
    };

    let claims = validate_token(token, &state.config.jwt)
        .map_err(|_| unauthorized("Invalid or expired token"))?;

    let user = TableAccessor::<User>::find_by_key(&state.pool, claims.user_id)
        .await?
        .ok_or_else(|| unauthorized("Account no longer exists"))?;

    if !user.is_active {
        return Err(unauthorized("Account is deactivated"));
    }

    Ok(Some(user.into()))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authenticate(parts, state)
            .await?
            .ok_or_else(|| unauthorized("Authentication required"))
    }
}

/// The signed-in user when there is one.
///
/// A missing or unusable token yields `MaybeAuthUser(None)` rather than a
/// rejection, so public routes keep working with a stale cookie.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<AuthUser>);

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match authenticate(parts, state).await {
            Ok(user) => Ok(MaybeAuthUser(user)),
            Err(AppError::Core(CoreError::Unauthorized(reason))) => {
                tracing::debug!(%reason, "Ignoring unusable session token on public route");
                Ok(MaybeAuthUser(None))
            }
            Err(e) => Err(e),
        }
    }
}
