//! Handlers for the `/showings` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use dreamhome_core::contact::resolve_contact;
use dreamhome_core::error::CoreError;
use dreamhome_core::status::ShowingStatus;
use dreamhome_core::types::{DbId, Timestamp};
use dreamhome_core::validation::{present, require_fields};
use dreamhome_db::models::showing::{NewShowing, RequestShowing, Showing, UpdateShowingStatus};
use dreamhome_db::{Direction, Filter, Query, Record, TableAccessor};
use sqlx::PgPool;

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::handlers::properties::find_property;
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::response::{MessageResponse, Saved};
use crate::state::AppState;

async fn find_showing(pool: &PgPool, showing_id: DbId) -> AppResult<Showing> {
    let showing = TableAccessor::<Showing>::find_by_key(pool, showing_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Showing", showing_id))?;
    Ok(showing)
}

fn parse_requested_time(raw: &str) -> Result<Timestamp, CoreError> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| {
            CoreError::Validation(format!(
                "requestedTime '{raw}' is not an RFC 3339 timestamp"
            ))
        })
}

/// POST /api/showings
///
/// Signed-in callers are recorded by id; anonymous callers must leave a
/// name and an email or phone number.
pub async fn request_showing(
    State(state): State<AppState>,
    MaybeAuthUser(user): MaybeAuthUser,
    AppJson(input): AppJson<RequestShowing>,
) -> AppResult<(StatusCode, Json<Saved<Showing>>)> {
    require_fields(&[
        ("propertyId", present(input.property_id.as_deref())),
        ("requestedTime", present(input.requested_time.as_deref())),
    ])?;
    let requested_time = parse_requested_time(input.requested_time.as_deref().unwrap_or_default())?;

    let user_id = user.as_ref().map(|u| u.user_id);
    let contact = resolve_contact(
        user_id,
        input.name.as_deref(),
        input.email.as_deref(),
        input.phone.as_deref(),
    )?;

    let property =
        find_property(&state.pool, input.property_id.as_deref().unwrap_or_default().trim()).await?;

    let new_showing = NewShowing {
        property_id: property.property_id,
        user_id,
        contact,
        requested_time,
        status: ShowingStatus::Requested.as_str(),
        notes: input.notes,
    };
    let showing = TableAccessor::<Showing>::create(&state.pool, &new_showing.to_record()).await?;

    tracing::info!(
        showing_id = showing.showing_id,
        property_id = %showing.property_id,
        user_id = ?showing.user_id,
        "Showing requested"
    );

    Ok((
        StatusCode::CREATED,
        Json(Saved::new("Showing requested successfully", "showing", showing)),
    ))
}

/// GET /api/showings/user
pub async fn user_showings(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<Showing>>> {
    let query = Query::filter(Filter::new().eq("user_id", user.user_id))
        .order_by("requested_time", Direction::Desc);
    Ok(Json(TableAccessor::<Showing>::find(&state.pool, &query).await?))
}

/// GET /api/showings/property/{property_id}
pub async fn property_showings(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(property_id): AppPath<String>,
) -> AppResult<Json<Vec<Showing>>> {
    let property = find_property(&state.pool, &property_id).await?;
    user.actor()
        .ensure_can_manage_listing(property.agent_id.as_deref())?;

    let query = Query::filter(Filter::new().eq("property_id", property_id.as_str()))
        .order_by("requested_time", Direction::Asc);
    Ok(Json(TableAccessor::<Showing>::find(&state.pool, &query).await?))
}

/// PATCH /api/showings/{showing_id}
pub async fn update_showing_status(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(showing_id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateShowingStatus>,
) -> AppResult<Json<Saved<Showing>>> {
    require_fields(&[("status", present(input.status.as_deref()))])?;
    let status: ShowingStatus = input.status.as_deref().unwrap_or_default().trim().parse()?;

    let showing = find_showing(&state.pool, showing_id).await?;
    let property = find_property(&state.pool, &showing.property_id).await?;
    user.actor()
        .ensure_can_manage_listing(property.agent_id.as_deref())?;

    let patch = Record::new()
        .set("status", status.as_str())
        .set_some("notes", input.notes.as_deref())
        .set("updated_at", Utc::now());
    TableAccessor::<Showing>::update(&state.pool, &Filter::by_key::<Showing>(showing_id), &patch)
        .await?;

    let updated = find_showing(&state.pool, showing_id).await?;
    tracing::info!(showing_id, status = %status, user_id = user.user_id, "Showing status changed");

    Ok(Json(Saved::new("Showing updated successfully", "showing", updated)))
}

/// DELETE /api/showings/{showing_id}
pub async fn delete_showing(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(showing_id): AppPath<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let showing = find_showing(&state.pool, showing_id).await?;
    user.actor().ensure_owner_or_admin(showing.user_id)?;

    TableAccessor::<Showing>::delete(&state.pool, &Filter::by_key::<Showing>(showing_id)).await?;
    tracing::info!(showing_id, user_id = user.user_id, "Showing deleted");

    Ok(Json(MessageResponse {
        message: "Showing deleted successfully",
    }))
}
