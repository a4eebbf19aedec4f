//! Handlers for the `/staff` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use dreamhome_core::error::CoreError;
use dreamhome_core::validation::{present, require_fields, validate_email};
use dreamhome_db::models::staff::{CreateStaff, Staff, UpdateStaff};
use dreamhome_db::{Direction, Filter, Query, TableAccessor};

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::handlers::branches::ensure_branch_exists;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::Saved;
use crate::state::AppState;

/// GET /api/staff
///
/// Ordered by last name.
pub async fn list_staff(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<Vec<Staff>>> {
    let query = Query::new()
        .order_by("last_name", Direction::Asc)
        .order_by("first_name", Direction::Asc);
    Ok(Json(TableAccessor::<Staff>::find(&state.pool, &query).await?))
}

/// GET /api/staff/{staff_id}
pub async fn get_staff(
    State(state): State<AppState>,
    _user: AuthUser,
    AppPath(staff_id): AppPath<String>,
) -> AppResult<Json<Staff>> {
    let staff = TableAccessor::<Staff>::find_by_key(&state.pool, staff_id.as_str())
        .await?
        .ok_or_else(|| CoreError::not_found("Staff member", &staff_id))?;
    Ok(Json(staff))
}

/// POST /api/staff
pub async fn create_staff(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppJson(input): AppJson<CreateStaff>,
) -> AppResult<(StatusCode, Json<Saved<Staff>>)> {
    require_fields(&[
        ("staff_id", present(input.staff_id.as_deref())),
        ("first_name", present(input.first_name.as_deref())),
        ("last_name", present(input.last_name.as_deref())),
        ("email", present(input.email.as_deref())),
    ])?;
    validate_email(input.email.as_deref().unwrap_or_default().trim())?;

    let staff_id = input.staff_id.as_deref().unwrap_or_default();
    if TableAccessor::<Staff>::count(&state.pool, &Filter::by_key::<Staff>(staff_id)).await? > 0 {
        return Err(CoreError::Conflict(format!("Staff member {staff_id} already exists")).into());
    }
    ensure_branch_exists(&state.pool, input.branch_no.as_deref()).await?;

    let staff = TableAccessor::<Staff>::create(&state.pool, &input.to_record()).await?;
    tracing::info!(staff_id = %staff.staff_id, admin_id = admin.user_id, "Staff member created");

    Ok((
        StatusCode::CREATED,
        Json(Saved::new("Staff member created successfully", "staff", staff)),
    ))
}

/// PATCH /api/staff/{staff_id}
pub async fn update_staff(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    AppPath(staff_id): AppPath<String>,
    AppJson(input): AppJson<UpdateStaff>,
) -> AppResult<Json<Saved<Staff>>> {
    if let Some(email) = input.email.as_deref() {
        validate_email(email.trim())?;
    }
    ensure_branch_exists(&state.pool, input.branch_no.as_deref()).await?;

    let by_key = Filter::by_key::<Staff>(staff_id.as_str());
    if TableAccessor::<Staff>::update(&state.pool, &by_key, &input.to_patch()).await? == 0 {
        return Err(CoreError::not_found("Staff member", &staff_id).into());
    }

    let staff = TableAccessor::<Staff>::find_one(&state.pool, &by_key)
        .await?
        .ok_or_else(|| CoreError::not_found("Staff member", &staff_id))?;

    Ok(Json(Saved::new("Staff member updated successfully", "staff", staff)))
}
