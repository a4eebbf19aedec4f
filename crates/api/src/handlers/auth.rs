//! Handlers for `/auth`: login, session validation and logout.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, HeaderValue};
use axum::Json;
use dreamhome_core::error::CoreError;
use dreamhome_core::validation::{present, require_fields};
use dreamhome_db::models::user::{User, UserWithProfile};
use dreamhome_db::repositories::ProfileRepo;
use dreamhome_db::{Filter, TableAccessor};
use serde::{Deserialize, Serialize};

use crate::auth::cookie::{clear_session_cookie, session_cookie};
use crate::auth::jwt::generate_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

/// Credentials posted to `POST /auth/login`.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// `{ "user": ... }` returned by login and validate.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: UserWithProfile,
}

fn set_cookie(value: &str) -> AppResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(
        SET_COOKIE,
        HeaderValue::from_str(value)
            .map_err(|e| AppError::InternalError(format!("Invalid cookie header: {e}")))?,
    );
    Ok(headers)
}

/// `Set-Cookie` header storing `token` as the session cookie.
pub(crate) fn session_headers(state: &AppState, token: &str) -> AppResult<HeaderMap> {
    set_cookie(&session_cookie(
        token,
        state.config.jwt.max_age_secs(),
        state.config.cookie_secure,
    ))
}

pub(crate) fn issue_token(state: &AppState, user: &User) -> AppResult<String> {
    generate_token(user.user_id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))
}

/// POST /api/auth/login
///
/// 404 for an unknown email, 401 for a wrong password, 403 for a
/// deactivated account.
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<(HeaderMap, Json<SessionResponse>)> {
    require_fields(&[
        ("email", present(input.email.as_deref())),
        ("password", present(input.password.as_deref())),
    ])?;
    let email = input.email.as_deref().unwrap_or_default().trim();
    let password = input.password.as_deref().unwrap_or_default();

    let user = TableAccessor::<User>::find_one(&state.pool, &Filter::new().eq("email", email))
        .await?
        .ok_or_else(|| CoreError::not_found("User", email))?;

    let valid = verify_password(password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Stored password hash is unreadable: {e}")))?;
    if !valid {
        tracing::debug!(user_id = user.user_id, "Login rejected: wrong password");
        return Err(CoreError::Unauthorized("Invalid password".into()).into());
    }
    if !user.is_active {
        return Err(CoreError::Forbidden("Account is deactivated".into()).into());
    }

    let token = issue_token(&state, &user)?;
    let headers = session_headers(&state, &token)?;

    tracing::info!(user_id = user.user_id, "User logged in");
    let user = ProfileRepo::merge(&state.pool, user).await?;

    Ok((headers, Json(SessionResponse { user })))
}

/// GET /api/auth/validate
pub async fn validate(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<SessionResponse>> {
    let row = TableAccessor::<User>::find_by_key(&state.pool, user.user_id)
        .await?
        .ok_or_else(|| CoreError::not_found("User", user.user_id))?;
    let user = ProfileRepo::merge(&state.pool, row).await?;
    Ok(Json(SessionResponse { user }))
}

/// POST /api/auth/logout
pub async fn logout(State(state): State<AppState>) -> AppResult<(HeaderMap, Json<MessageResponse>)> {
    let headers = set_cookie(&clear_session_cookie(state.config.cookie_secure))?;
    Ok((
        headers,
        Json(MessageResponse {
            message: "Logged out successfully",
        }),
    ))
}
