//! Route definitions for the `/users` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// POST   /create       -> create_user (public)
/// GET    /             -> list_users (admin, paginated)
/// GET    /active       -> list_active_users (admin)
/// GET    /count        -> count_users (admin)
/// GET    /{user_id}    -> get_user (self or admin)
/// PUT    /{user_id}    -> update_user (self or admin)
/// DELETE /{user_id}    -> delete_user (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list_users))
        .route("/create", post(users::create_user))
        .route("/active", get(users::list_active_users))
        .route("/count", get(users::count_users))
        .route(
            "/{user_id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
}
