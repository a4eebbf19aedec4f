//! Handlers for the `/branches` resource.
//!
//! Any signed-in user may read; only admins may create or update.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use dreamhome_core::error::CoreError;
use dreamhome_core::validation::{present, require_fields};
use dreamhome_db::models::branch::{Branch, CreateBranch, UpdateBranch};
use dreamhome_db::{Direction, Filter, Query, TableAccessor};
use sqlx::PgPool;

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::Saved;
use crate::state::AppState;

/// 404 unless `branch_no` is absent or names an existing branch.
pub(crate) async fn ensure_branch_exists(pool: &PgPool, branch_no: Option<&str>) -> AppResult<()> {
    if let Some(branch_no) = branch_no {
        TableAccessor::<Branch>::find_by_key(pool, branch_no)
            .await?
            .ok_or_else(|| CoreError::not_found("Branch", branch_no))?;
    }
    Ok(())
}

/// GET /api/branches
pub async fn list_branches(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<Vec<Branch>>> {
    let query = Query::new().order_by("branch_no", Direction::Asc);
    let branches = TableAccessor::<Branch>::find(&state.pool, &query).await?;
    Ok(Json(branches))
}

/// GET /api/branches/{branch_no}
pub async fn get_branch(
    State(state): State<AppState>,
    _user: AuthUser,
    AppPath(branch_no): AppPath<String>,
) -> AppResult<Json<Branch>> {
    let branch = TableAccessor::<Branch>::find_by_key(&state.pool, branch_no.as_str())
        .await?
        .ok_or_else(|| CoreError::not_found("Branch", &branch_no))?;
    Ok(Json(branch))
}

/// POST /api/branches
pub async fn create_branch(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppJson(input): AppJson<CreateBranch>,
) -> AppResult<(StatusCode, Json<Saved<Branch>>)> {
    require_fields(&[
        ("branch_no", present(input.branch_no.as_deref())),
        ("street", present(input.street.as_deref())),
        ("city", present(input.city.as_deref())),
        ("postcode", present(input.postcode.as_deref())),
    ])?;

    let branch_no = input.branch_no.as_deref().unwrap_or_default();
    let existing = TableAccessor::<Branch>::count(&state.pool, &Filter::by_key::<Branch>(branch_no)).await?;
    if existing > 0 {
        return Err(CoreError::Conflict(format!("Branch {branch_no} already exists")).into());
    }

    let branch = TableAccessor::<Branch>::create(&state.pool, &input.to_record()).await?;
    tracing::info!(branch_no = %branch.branch_no, admin_id = admin.user_id, "Branch created");

    Ok((
        StatusCode::CREATED,
        Json(Saved::new("Branch created successfully", "branch", branch)),
    ))
}

/// PATCH /api/branches/{branch_no}
///
/// The branch number itself is never changed; a `branch_no` in the body is ignored.
pub async fn update_branch(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    AppPath(branch_no): AppPath<String>,
    AppJson(input): AppJson<UpdateBranch>,
) -> AppResult<Json<Saved<Branch>>> {
    let by_key = Filter::by_key::<Branch>(branch_no.as_str());
    let affected = TableAccessor::<Branch>::update(&state.pool, &by_key, &input.to_patch()).await?;
    if affected == 0 {
        return Err(CoreError::not_found("Branch", &branch_no).into());
    }

    let branch = TableAccessor::<Branch>::find_one(&state.pool, &by_key)
        .await?
        .ok_or_else(|| CoreError::not_found("Branch", &branch_no))?;
    tracing::info!(branch_no = %branch.branch_no, "Branch updated");

    Ok(Json(Saved::new("Branch updated successfully", "branch", branch)))
}
