//! Handlers for the `/inquiries` resource.
//!
//! Inquiries follow the same attribution rules as showings. Answering one is
//! reserved for admins and the listing's agent.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use dreamhome_core::contact::resolve_contact;
use dreamhome_core::error::CoreError;
use dreamhome_core::status::InquiryStatus;
use dreamhome_core::types::DbId;
use dreamhome_core::validation::{present, require_fields};
use dreamhome_db::models::inquiry::{Inquiry, NewInquiry, RespondToInquiry, SendInquiry};
use dreamhome_db::{Direction, Filter, Query, Record, TableAccessor};
use sqlx::PgPool;

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::handlers::properties::find_property;
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::response::{MessageResponse, Saved};
use crate::state::AppState;

async fn find_inquiry(pool: &PgPool, inquiry_id: DbId) -> AppResult<Inquiry> {
    let inquiry = TableAccessor::<Inquiry>::find_by_key(pool, inquiry_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Inquiry", inquiry_id))?;
    Ok(inquiry)
}

/// POST /api/inquiries
pub async fn send_inquiry(
    State(state): State<AppState>,
    MaybeAuthUser(user): MaybeAuthUser,
    AppJson(input): AppJson<SendInquiry>,
) -> AppResult<(StatusCode, Json<Saved<Inquiry>>)> {
    require_fields(&[
        ("propertyId", present(input.property_id.as_deref())),
        ("question", present(input.question.as_deref())),
    ])?;

    let user_id = user.as_ref().map(|u| u.user_id);
    let contact = resolve_contact(
        user_id,
        input.name.as_deref(),
        input.email.as_deref(),
        input.phone.as_deref(),
    )?;

    let property =
        find_property(&state.pool, input.property_id.as_deref().unwrap_or_default().trim()).await?;

    let new_inquiry = NewInquiry {
        property_id: property.property_id,
        user_id,
        contact,
        question: input.question.unwrap_or_default().trim().to_string(),
        status: InquiryStatus::Open.as_str(),
    };
    let inquiry = TableAccessor::<Inquiry>::create(&state.pool, &new_inquiry.to_record()).await?;

    tracing::info!(
        inquiry_id = inquiry.inquiry_id,
        property_id = %inquiry.property_id,
        user_id = ?inquiry.user_id,
        "Inquiry received"
    );

    Ok((
        StatusCode::CREATED,
        Json(Saved::new("Inquiry sent successfully", "inquiry", inquiry)),
    ))
}

/// GET /api/inquiries/user
pub async fn user_inquiries(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<Inquiry>>> {
    let query = Query::filter(Filter::new().eq("user_id", user.user_id))
        .order_by("created_at", Direction::Desc);
    Ok(Json(TableAccessor::<Inquiry>::find(&state.pool, &query).await?))
}

/// GET /api/inquiries/property/{property_id}
pub async fn property_inquiries(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(property_id): AppPath<String>,
) -> AppResult<Json<Vec<Inquiry>>> {
    let property = find_property(&state.pool, &property_id).await?;
    user.actor()
        .ensure_can_manage_listing(property.agent_id.as_deref())?;

    let query = Query::filter(Filter::new().eq("property_id", property_id.as_str()))
        .order_by("created_at", Direction::Desc);
    Ok(Json(TableAccessor::<Inquiry>::find(&state.pool, &query).await?))
}

/// PATCH /api/inquiries/{inquiry_id}/respond
///
/// Stores the answer, marks the inquiry `answered` and stamps `responded_at`.
pub async fn respond_to_inquiry(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(inquiry_id): AppPath<DbId>,
    AppJson(input): AppJson<RespondToInquiry>,
) -> AppResult<Json<Saved<Inquiry>>> {
    require_fields(&[("response", present(input.response.as_deref()))])?;

    let inquiry = find_inquiry(&state.pool, inquiry_id).await?;
    let property = find_property(&state.pool, &inquiry.property_id).await?;
    user.actor()
        .ensure_can_manage_listing(property.agent_id.as_deref())?;

    let patch = Record::new()
        .set("response", input.response.as_deref().map(str::trim))
        .set("status", InquiryStatus::Answered.as_str())
        .set("responded_at", Utc::now());
    TableAccessor::<Inquiry>::update(&state.pool, &Filter::by_key::<Inquiry>(inquiry_id), &patch)
        .await?;

    let answered = find_inquiry(&state.pool, inquiry_id).await?;
    tracing::info!(inquiry_id, user_id = user.user_id, "Inquiry answered");

    Ok(Json(Saved::new("Response sent successfully", "inquiry", answered)))
}

/// DELETE /api/inquiries/{inquiry_id}
pub async fn delete_inquiry(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(inquiry_id): AppPath<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let inquiry = find_inquiry(&state.pool, inquiry_id).await?;
    user.actor().ensure_owner_or_admin(inquiry.user_id)?;

    TableAccessor::<Inquiry>::delete(&state.pool, &Filter::by_key::<Inquiry>(inquiry_id)).await?;
    tracing::info!(inquiry_id, user_id = user.user_id, "Inquiry deleted");

    Ok(Json(MessageResponse {
        message: "Inquiry deleted successfully",
    }))
}
