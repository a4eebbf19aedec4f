//! Route definitions for the `/clients` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::clients;
use crate::state::AppState;

/// Routes mounted at `/clients`.
///
/// ```text
/// GET   /              -> list_clients
/// POST  /              -> create_client (admin)
/// GET   /{client_id}   -> get_client
/// PATCH /{client_id}   -> update_client (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(clients::list_clients).post(clients::create_client))
        .route(
            "/{client_id}",
            get(clients::get_client).patch(clients::update_client),
        )
}
