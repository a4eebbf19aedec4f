//! Route definitions for the `/branches` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::branches;
use crate::state::AppState;

/// Routes mounted at `/branches`.
///
/// ```text
/// GET   /              -> list_branches
/// POST  /              -> create_branch (admin)
/// GET   /{branch_no}   -> get_branch
/// PATCH /{branch_no}   -> update_branch (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(branches::list_branches).post(branches::create_branch),
        )
        .route(
            "/{branch_no}",
            get(branches::get_branch).patch(branches::update_branch),
        )
}
