//! Handlers for the `/clients` resource.
//!
//! Client emails are unique. A duplicate is reported as a validation error
//! (400) before the insert is attempted.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use dreamhome_core::error::CoreError;
use dreamhome_core::validation::{present, require_fields, validate_email};
use dreamhome_db::models::client::{Client, CreateClient, UpdateClient};
use dreamhome_db::{Direction, Filter, Query, TableAccessor};
use sqlx::PgPool;

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::handlers::branches::ensure_branch_exists;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::Saved;
use crate::state::AppState;

/// 400 when another client already uses `email`.
async fn ensure_email_free(pool: &PgPool, email: &str, except: Option<&str>) -> AppResult<()> {
    let holder = TableAccessor::<Client>::find_one(pool, &Filter::new().eq("email", email)).await?;
    match holder {
        Some(client) if Some(client.client_id.as_str()) != except => Err(CoreError::Validation(
            "A client with this email already exists".into(),
        )
        .into()),
        _ => Ok(()),
    }
}

/// GET /api/clients
pub async fn list_clients(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<Vec<Client>>> {
    let query = Query::new()
        .order_by("last_name", Direction::Asc)
        .order_by("first_name", Direction::Asc);
    Ok(Json(TableAccessor::<Client>::find(&state.pool, &query).await?))
}

/// GET /api/clients/{client_id}
pub async fn get_client(
    State(state): State<AppState>,
    _user: AuthUser,
    AppPath(client_id): AppPath<String>,
) -> AppResult<Json<Client>> {
    let client = TableAccessor::<Client>::find_by_key(&state.pool, client_id.as_str())
        .await?
        .ok_or_else(|| CoreError::not_found("Client", &client_id))?;
    Ok(Json(client))
}

/// POST /api/clients
pub async fn create_client(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppJson(input): AppJson<CreateClient>,
) -> AppResult<(StatusCode, Json<Saved<Client>>)> {
    require_fields(&[
        ("client_id", present(input.client_id.as_deref())),
        ("first_name", present(input.first_name.as_deref())),
        ("last_name", present(input.last_name.as_deref())),
        ("email", present(input.email.as_deref())),
        ("preferred_contact", present(input.preferred_contact.as_deref())),
    ])?;
    let email = input.email.as_deref().unwrap_or_default().trim();
    validate_email(email)?;
    ensure_email_free(&state.pool, email, None).await?;

    let client_id = input.client_id.as_deref().unwrap_or_default();
    if TableAccessor::<Client>::count(&state.pool, &Filter::by_key::<Client>(client_id)).await? > 0 {
        return Err(CoreError::Conflict(format!("Client {client_id} already exists")).into());
    }
    ensure_branch_exists(&state.pool, input.branch_no.as_deref()).await?;

    let client = TableAccessor::<Client>::create(&state.pool, &input.to_record()).await?;
    tracing::info!(client_id = %client.client_id, admin_id = admin.user_id, "Client registered");

    Ok((
        StatusCode::CREATED,
        Json(Saved::new("Client registered successfully", "client", client)),
    ))
}

/// PATCH /api/clients/{client_id}
pub async fn update_client(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    AppPath(client_id): AppPath<String>,
    AppJson(input): AppJson<UpdateClient>,
) -> AppResult<Json<Saved<Client>>> {
    if let Some(email) = input.email.as_deref().map(str::trim) {
        validate_email(email)?;
        ensure_email_free(&state.pool, email, Some(client_id.as_str())).await?;
    }
    ensure_branch_exists(&state.pool, input.branch_no.as_deref()).await?;

    let by_key = Filter::by_key::<Client>(client_id.as_str());
    if TableAccessor::<Client>::update(&state.pool, &by_key, &input.to_patch()).await? == 0 {
        return Err(CoreError::not_found("Client", &client_id).into());
    }

    let client = TableAccessor::<Client>::find_one(&state.pool, &by_key)
        .await?
        .ok_or_else(|| CoreError::not_found("Client", &client_id))?;

    Ok(Json(Saved::new("Client updated successfully", "client", client)))
}
