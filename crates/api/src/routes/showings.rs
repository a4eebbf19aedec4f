//! Route definitions for the `/showings` resource.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::showings;
use crate::state::AppState;

/// Routes mounted at `/showings`.
///
/// ```text
/// POST   /                         -> request_showing (optional auth)
/// GET    /user                     -> user_showings
/// GET    /property/{property_id}   -> property_showings (admin or agent)
/// PATCH  /{showing_id}             -> update_showing_status (admin or agent)
/// DELETE /{showing_id}             -> delete_showing (owner or admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(showings::request_showing))
        .route("/user", get(showings::user_showings))
        .route("/property/{property_id}", get(showings::property_showings))
        .route(
            "/{showing_id}",
            patch(showings::update_showing_status).delete(showings::delete_showing),
        )
}
