//! Route definitions for the `/staff` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::staff;
use crate::state::AppState;

/// Routes mounted at `/staff`.
///
/// ```text
/// GET   /             -> list_staff
/// POST  /             -> create_staff (admin)
/// GET   /{staff_id}   -> get_staff
/// PATCH /{staff_id}   -> update_staff (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(staff::list_staff).post(staff::create_staff))
        .route(
            "/{staff_id}",
            get(staff::get_staff).patch(staff::update_staff),
        )
}
