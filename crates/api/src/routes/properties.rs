//! Route definitions for the `/properties` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::properties;
use crate::state::AppState;

/// Routes mounted at `/properties`.
///
/// ```text
/// GET   /                 -> list_properties (public, filtered + market summary)
/// POST  /                 -> create_property (admin or staff-linked user)
/// GET   /{property_id}    -> get_property (public, detail view)
/// PATCH /{property_id}    -> update_property (admin or agent)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(properties::list_properties).post(properties::create_property),
        )
        .route(
            "/{property_id}",
            get(properties::get_property).patch(properties::update_property),
        )
}
