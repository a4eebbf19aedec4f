//! Handlers for the `/properties` resource.
//!
//! Listing and detail are public. Publishing needs an admin or a staff-linked
//! user; editing needs an admin or the listing's agent.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use dreamhome_core::error::CoreError;
use dreamhome_core::listing::{
    market_summary, parse_min_beds, sort_listings, status_filter, ListingFilter, MarketSummary,
    PriceRange, SortOrder,
};
use dreamhome_core::status::DEFAULT_PROPERTY_STATUS;
use dreamhome_core::validation::{present, require_fields};
use dreamhome_db::models::property::{CreateProperty, Property, PropertyDetail, UpdateProperty};
use dreamhome_db::models::staff::Staff;
use dreamhome_db::repositories::PropertyRepo;
use dreamhome_db::{Filter, Query as TableQuery, TableAccessor};
use serde::Serialize;
use sqlx::PgPool;

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::query::PropertyListParams;
use crate::response::Saved;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Body of `GET /properties`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyListResponse {
    pub properties: Vec<Property>,
    pub market_summary: MarketSummary,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub(crate) async fn find_property(pool: &PgPool, property_id: &str) -> AppResult<Property> {
    let property = TableAccessor::<Property>::find_by_key(pool, property_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Property", property_id))?;
    Ok(property)
}

async fn ensure_agent_exists(pool: &PgPool, agent_id: Option<&str>) -> AppResult<()> {
    if let Some(agent_id) = agent_id {
        TableAccessor::<Staff>::find_by_key(pool, agent_id)
            .await?
            .ok_or_else(|| CoreError::not_found("Agent", agent_id))?;
    }
    Ok(())
}

async fn load_detail(pool: &PgPool, property: Property) -> AppResult<PropertyDetail> {
    let children = PropertyRepo::load_children(pool, &property.property_id).await?;
    let agent = match property.agent_id.as_deref() {
        Some(agent_id) => TableAccessor::<Staff>::find_by_key(pool, agent_id).await?,
        None => None,
    };
    Ok(PropertyDetail::assemble(property, children, agent.as_ref()))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/properties
///
/// `status` and `neighborhood` narrow the store query; `beds`, `priceRange`
/// and `keyword` are applied in memory, then `sort`. The market summary is
/// always computed over the whole table.
pub async fn list_properties(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<PropertyListParams>,
) -> AppResult<Json<PropertyListResponse>> {
    let min_beds = parse_min_beds(params.beds.as_deref())?;

    let mut filter = Filter::new();
    if let Some(status) = status_filter(params.status.as_deref()) {
        filter = filter.eq("status", status);
    }
    if let Some(neighborhood) = params
        .neighborhood
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
    {
        filter = filter.contains("address", neighborhood);
    }

    let rows = TableAccessor::<Property>::find(&state.pool, &TableQuery::filter(filter)).await?;

    let listing_filter = ListingFilter::new(
        min_beds,
        PriceRange::from_param(params.price_range.as_deref()),
        params.keyword.as_deref(),
    );
    let mut properties = listing_filter.apply(rows);
    if let Some(order) = SortOrder::from_param(params.sort.as_deref()) {
        sort_listings(&mut properties, order);
    }

    let inventory = TableAccessor::<Property>::find_all(&state.pool).await?;
    let summary = market_summary(&inventory, Utc::now().date_naive());

    tracing::debug!(
        matched = properties.len(),
        inventory = summary.inventory,
        "Listed properties"
    );

    Ok(Json(PropertyListResponse {
        properties,
        market_summary: summary,
    }))
}

/// GET /api/properties/{property_id}
pub async fn get_property(
    State(state): State<AppState>,
    AppPath(property_id): AppPath<String>,
) -> AppResult<Json<PropertyDetail>> {
    let property = find_property(&state.pool, &property_id).await?;
    Ok(Json(load_detail(&state.pool, property).await?))
}

/// POST /api/properties
///
/// A staff-linked user who omits `agentId` becomes the listing's agent.
pub async fn create_property(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(mut input): AppJson<CreateProperty>,
) -> AppResult<(StatusCode, Json<Saved<Property>>)> {
    user.actor().ensure_can_create_listing()?;

    require_fields(&[
        ("property_id", present(input.property_id.as_deref())),
        ("title", present(input.title.as_deref())),
        ("address", present(input.address.as_deref())),
        ("price", input.price.is_some_and(|p| p != 0)),
    ])?;

    let property_id = input.property_id.as_deref().unwrap_or_default().trim().to_string();
    let taken =
        TableAccessor::<Property>::count(&state.pool, &Filter::by_key::<Property>(property_id.as_str()))
            .await?;
    if taken > 0 {
        return Err(CoreError::Conflict(format!("Property {property_id} already exists")).into());
    }

    if input.agent_id.is_none() && !user.is_admin() {
        input.agent_id = user.staff_id.clone();
    }
    ensure_agent_exists(&state.pool, input.agent_id.as_deref()).await?;

    let property =
        TableAccessor::<Property>::create(&state.pool, &input.to_record(DEFAULT_PROPERTY_STATUS))
            .await?;
    PropertyRepo::insert_children(&state.pool, &property.property_id, &input.children).await?;

    tracing::info!(
        property_id = %property.property_id,
        user_id = user.user_id,
        agent_id = ?property.agent_id,
        "Property created"
    );

    Ok((
        StatusCode::CREATED,
        Json(Saved::new("Property created successfully", "property", property)),
    ))
}

/// PATCH /api/properties/{property_id}
///
/// Applies the supplied fields, replaces any supplied child collection and
/// bumps `last_updated`. Responds with the refreshed detail view.
pub async fn update_property(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(property_id): AppPath<String>,
    AppJson(input): AppJson<UpdateProperty>,
) -> AppResult<Json<Saved<PropertyDetail>>> {
    if input.price == Some(0) {
        return Err(CoreError::Validation("price must be non-zero".into()).into());
    }

    let property = find_property(&state.pool, &property_id).await?;
    ensure_agent_exists(&state.pool, input.agent_id.as_deref()).await?;
    user.actor()
        .ensure_can_manage_listing(property.agent_id.as_deref())?;

    let by_key = Filter::by_key::<Property>(property_id.as_str());
    let affected =
        TableAccessor::<Property>::update(&state.pool, &by_key, &input.to_patch(Utc::now())).await?;
    if affected == 0 {
        return Err(CoreError::not_found("Property", &property_id).into());
    }
    PropertyRepo::replace_children(&state.pool, &property_id, &input.children).await?;

    let updated = find_property(&state.pool, &property_id).await?;
    let detail = load_detail(&state.pool, updated).await?;
    tracing::info!(property_id = %property_id, user_id = user.user_id, "Property updated");

    Ok(Json(Saved::new("Property updated successfully", "property", detail)))
}
