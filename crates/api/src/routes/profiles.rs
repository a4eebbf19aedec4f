//! Route definitions for the `/profiles` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::profiles;
use crate::state::AppState;

/// Routes mounted at `/profiles`.
///
/// ```text
/// GET   /me           -> get_my_profile
/// PATCH /me           -> update_my_profile
/// GET   /{user_id}    -> get_profile (self or admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/me",
            get(profiles::get_my_profile).patch(profiles::update_my_profile),
        )
        .route("/{user_id}", get(profiles::get_profile))
}
