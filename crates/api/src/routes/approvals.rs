//! Route definitions for the `/approvals` resource.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::approvals;
use crate::state::AppState;

/// Routes mounted at `/approvals` (admin only).
///
/// ```text
/// PATCH /{user_id}/approve     -> approve_user
/// GET   /{user_id}/approvals   -> user_approvals
/// GET   /approved              -> all_approvals
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/approved", get(approvals::all_approvals))
        .route("/{user_id}/approve", patch(approvals::approve_user))
        .route("/{user_id}/approvals", get(approvals::user_approvals))
}
