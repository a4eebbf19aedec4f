//! Handlers for `/approvals`, the admin audit trail of account approvals.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use dreamhome_core::types::DbId;
use dreamhome_db::models::approval::{ApproveUser, UserApproval};
use dreamhome_db::models::user::User;
use dreamhome_db::{Direction, Filter, Query, Record, TableAccessor};

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::handlers::users::find_user;
use crate::middleware::rbac::RequireAdmin;
use crate::response::Saved;
use crate::state::AppState;

/// PATCH /api/approvals/{user_id}/approve
///
/// Records who approved the account and marks it approved and active.
/// The body is optional; `{ "notes": ... }` is stored with the record.
pub async fn approve_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppPath(user_id): AppPath<DbId>,
    input: Option<AppJson<ApproveUser>>,
) -> AppResult<Json<Saved<UserApproval>>> {
    find_user(&state.pool, user_id).await?;
    let input = input.map(|AppJson(body)| body).unwrap_or_default();

    let approval =
        TableAccessor::<UserApproval>::create(&state.pool, &input.to_record(user_id, admin.user_id))
            .await?;

    let patch = Record::new()
        .set("is_approved", true)
        .set("is_active", true)
        .set("updated_at", Utc::now());
    TableAccessor::<User>::update(&state.pool, &Filter::by_key::<User>(user_id), &patch).await?;

    tracing::info!(
        user_id,
        approved_by = admin.user_id,
        approval_id = approval.approval_id,
        "User approved"
    );

    Ok(Json(Saved::new("User approved successfully", "approval", approval)))
}

/// GET /api/approvals/{user_id}/approvals
pub async fn user_approvals(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    AppPath(user_id): AppPath<DbId>,
) -> AppResult<Json<Vec<UserApproval>>> {
    let query = Query::filter(Filter::new().eq("user_id", user_id))
        .order_by("approved_at", Direction::Desc);
    Ok(Json(TableAccessor::<UserApproval>::find(&state.pool, &query).await?))
}

/// GET /api/approvals/approved
pub async fn all_approvals(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<UserApproval>>> {
    let query = Query::new().order_by("approved_at", Direction::Desc);
    Ok(Json(TableAccessor::<UserApproval>::find(&state.pool, &query).await?))
}
