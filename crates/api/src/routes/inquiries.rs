//! Route definitions for the `/inquiries` resource.

use axum::routing::{delete, get, patch, post};
use axum::Router;

use crate::handlers::inquiries;
use crate::state::AppState;

/// Routes mounted at `/inquiries`.
///
/// ```text
/// POST   /                         -> send_inquiry (optional auth)
/// GET    /user                     -> user_inquiries
/// GET    /property/{property_id}   -> property_inquiries (admin or agent)
/// PATCH  /{inquiry_id}/respond     -> respond_to_inquiry (admin or agent)
/// DELETE /{inquiry_id}             -> delete_inquiry (owner or admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(inquiries::send_inquiry))
        .route("/user", get(inquiries::user_inquiries))
        .route("/property/{property_id}", get(inquiries::property_inquiries))
        .route("/{inquiry_id}/respond", patch(inquiries::respond_to_inquiry))
        .route("/{inquiry_id}", delete(inquiries::delete_inquiry))
}
