//! Property listings and their child tables.
//!
//! A listing row is served as-is by the list endpoint. The detail endpoint
//! joins in the eight child collections and the agent's contact card, see
//! [`PropertyDetail`].

use dreamhome_core::listing::ListingFacts;
use dreamhome_core::money::format_currency;
use dreamhome_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::accessor::{Record, Table};
use crate::models::staff::Staff;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A row from the `properties` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Property {
    pub property_id: String,
    pub title: String,
    pub address: String,
    pub price: i64,
    pub status: String,
    pub beds: Option<i64>,
    pub baths: Option<f64>,
    pub area: Option<i64>,
    pub lot_size: Option<String>,
    pub year_built: Option<i64>,
    pub monthly_fees: Option<f64>,
    #[serde(rename = "type")]
    pub property_type: Option<String>,
    pub hero_image: Option<String>,
    pub description: Option<String>,
    pub lifestyle_narrative: Option<String>,
    pub neighborhood: Option<String>,
    pub walk_score: Option<i64>,
    pub transit_score: Option<i64>,
    pub open_house: Option<String>,
    pub mls_number: Option<String>,
    pub taxes: Option<f64>,
    pub agent_id: Option<String>,
    pub created_at: Timestamp,
    pub last_updated: Timestamp,
}

impl Table for Property {
    const NAME: &'static str = "properties";
    const PRIMARY_KEY: &'static str = "property_id";
    const COLUMNS: &'static str = "property_id, title, address, price, status, beds, baths, \
        area, lot_size, year_built, monthly_fees, property_type, hero_image, description, \
        lifestyle_narrative, neighborhood, walk_score, transit_score, open_house, mls_number, \
        taxes, agent_id, created_at, last_updated";
}

impl ListingFacts for Property {
    fn price(&self) -> i64 {
        self.price
    }

    fn beds(&self) -> Option<i64> {
        self.beds
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn lifestyle_narrative(&self) -> Option<&str> {
        self.lifestyle_narrative.as_deref()
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }

    fn last_updated(&self) -> Option<Timestamp> {
        Some(self.last_updated)
    }
}

// ---------------------------------------------------------------------------
// Child rows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct GalleryImage {
    pub gallery_id: DbId,
    pub property_id: String,
    pub image_url: String,
    pub is_hero: bool,
    pub sort_order: i64,
}

impl Table for GalleryImage {
    const NAME: &'static str = "property_gallery";
    const PRIMARY_KEY: &'static str = "gallery_id";
    const COLUMNS: &'static str = "gallery_id, property_id, image_url, is_hero, sort_order";
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Highlight {
    pub highlight_id: DbId,
    pub property_id: String,
    pub highlight_text: String,
    pub sort_order: i64,
}

impl Table for Highlight {
    const NAME: &'static str = "property_highlights";
    const PRIMARY_KEY: &'static str = "highlight_id";
    const COLUMNS: &'static str = "highlight_id, property_id, highlight_text, sort_order";
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SustainabilityFeature {
    pub sustainability_id: DbId,
    pub property_id: String,
    pub feature: String,
    pub sort_order: i64,
}

impl Table for SustainabilityFeature {
    const NAME: &'static str = "property_sustainability";
    const PRIMARY_KEY: &'static str = "sustainability_id";
    const COLUMNS: &'static str = "sustainability_id, property_id, feature, sort_order";
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct FloorPlan {
    pub floorplan_id: DbId,
    pub property_id: String,
    pub label: String,
    pub image_url: String,
    pub sort_order: i64,
}

impl Table for FloorPlan {
    const NAME: &'static str = "property_floorplans";
    const PRIMARY_KEY: &'static str = "floorplan_id";
    const COLUMNS: &'static str = "floorplan_id, property_id, label, image_url, sort_order";
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PropertyDocument {
    pub document_id: DbId,
    pub property_id: String,
    pub label: String,
    pub document_url: String,
    pub sort_order: i64,
}

impl Table for PropertyDocument {
    const NAME: &'static str = "property_documents";
    const PRIMARY_KEY: &'static str = "document_id";
    const COLUMNS: &'static str = "document_id, property_id, label, document_url, sort_order";
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct School {
    pub school_id: DbId,
    pub property_id: String,
    pub name: String,
    pub distance: Option<String>,
    pub sort_order: i64,
}

impl Table for School {
    const NAME: &'static str = "property_schools";
    const PRIMARY_KEY: &'static str = "school_id";
    const COLUMNS: &'static str = "school_id, property_id, name, distance, sort_order";
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct NearbyItem {
    pub nearby_id: DbId,
    pub property_id: String,
    pub item: String,
    pub sort_order: i64,
}

impl Table for NearbyItem {
    const NAME: &'static str = "property_nearby";
    const PRIMARY_KEY: &'static str = "nearby_id";
    const COLUMNS: &'static str = "nearby_id, property_id, item, sort_order";
}

/// Lifestyle tags are unordered; they come back in insertion order.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PropertyTag {
    pub tag_id: DbId,
    pub property_id: String,
    pub tag: String,
}

impl Table for PropertyTag {
    const NAME: &'static str = "property_tags";
    const PRIMARY_KEY: &'static str = "tag_id";
    const COLUMNS: &'static str = "tag_id, property_id, tag";
}

/// Every child collection of one property, as stored.
#[derive(Debug, Clone, Default)]
pub struct PropertyChildRows {
    pub gallery: Vec<GalleryImage>,
    pub highlights: Vec<Highlight>,
    pub sustainability: Vec<SustainabilityFeature>,
    pub floor_plans: Vec<FloorPlan>,
    pub documents: Vec<PropertyDocument>,
    pub schools: Vec<School>,
    pub nearby: Vec<NearbyItem>,
    pub tags: Vec<PropertyTag>,
}

// ---------------------------------------------------------------------------
// Create / update DTOs
// ---------------------------------------------------------------------------

/// A floor plan as submitted and as served: `placeholder` is the image URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorPlanEntry {
    pub label: String,
    #[serde(alias = "image_url", alias = "imageUrl")]
    pub placeholder: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentEntry {
    pub label: String,
    #[serde(alias = "document_url", alias = "documentUrl")]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchoolEntry {
    pub name: String,
    pub distance: Option<String>,
}

/// Child collections carried by create and update payloads.
///
/// On update, a supplied collection replaces the stored one wholesale; an
/// absent collection is left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyChildren {
    pub gallery: Option<Vec<String>>,
    pub highlights: Option<Vec<String>>,
    pub sustainability: Option<Vec<String>>,
    pub floor_plans: Option<Vec<FloorPlanEntry>>,
    pub documents: Option<Vec<DocumentEntry>>,
    pub schools: Option<Vec<SchoolEntry>>,
    pub nearby: Option<Vec<String>>,
    pub lifestyle_tags: Option<Vec<String>>,
}

/// Input for publishing a listing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProperty {
    #[serde(alias = "property_id")]
    pub property_id: Option<String>,
    pub title: Option<String>,
    pub address: Option<String>,
    pub price: Option<i64>,
    pub status: Option<String>,
    pub beds: Option<i64>,
    pub baths: Option<f64>,
    pub area: Option<i64>,
    pub lot_size: Option<String>,
    pub year_built: Option<i64>,
    pub monthly_fees: Option<f64>,
    #[serde(rename = "type")]
    pub property_type: Option<String>,
    pub hero_image: Option<String>,
    pub description: Option<String>,
    pub lifestyle_narrative: Option<String>,
    pub neighborhood: Option<String>,
    pub walk_score: Option<i64>,
    pub transit_score: Option<i64>,
    pub open_house: Option<String>,
    pub mls_number: Option<String>,
    pub taxes: Option<f64>,
    pub agent_id: Option<String>,
    #[serde(flatten)]
    pub children: PropertyChildren,
}

impl CreateProperty {
    /// Insert record for the listing row. `status` falls back to the given default.
    pub fn to_record(&self, default_status: &str) -> Record {
        let hero_image = self
            .hero_image
            .clone()
            .or_else(|| self.children.gallery.as_ref().and_then(|g| g.first().cloned()));

        Record::new()
            .set("property_id", self.property_id.as_deref().map(str::trim))
            .set("title", self.title.as_deref())
            .set("address", self.address.as_deref())
            .set("price", self.price)
            .set("status", self.status.as_deref().unwrap_or(default_status))
            .set("beds", self.beds)
            .set("baths", self.baths)
            .set("area", self.area)
            .set("lot_size", self.lot_size.as_deref())
            .set("year_built", self.year_built)
            .set("monthly_fees", self.monthly_fees)
            .set("property_type", self.property_type.as_deref())
            .set("hero_image", hero_image)
            .set("description", self.description.as_deref())
            .set("lifestyle_narrative", self.lifestyle_narrative.as_deref())
            .set("neighborhood", self.neighborhood.as_deref())
            .set("walk_score", self.walk_score)
            .set("transit_score", self.transit_score)
            .set("open_house", self.open_house.as_deref())
            .set("mls_number", self.mls_number.as_deref())
            .set("taxes", self.taxes)
            .set("agent_id", self.agent_id.as_deref())
    }
}

/// Patch for a listing. `propertyId` is not accepted.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProperty {
    pub title: Option<String>,
    pub address: Option<String>,
    pub price: Option<i64>,
    pub status: Option<String>,
    pub beds: Option<i64>,
    pub baths: Option<f64>,
    pub area: Option<i64>,
    pub lot_size: Option<String>,
    pub year_built: Option<i64>,
    pub monthly_fees: Option<f64>,
    #[serde(rename = "type")]
    pub property_type: Option<String>,
    pub hero_image: Option<String>,
    pub description: Option<String>,
    pub lifestyle_narrative: Option<String>,
    pub neighborhood: Option<String>,
    pub walk_score: Option<i64>,
    pub transit_score: Option<i64>,
    pub open_house: Option<String>,
    pub mls_number: Option<String>,
    pub taxes: Option<f64>,
    pub agent_id: Option<String>,
    #[serde(flatten)]
    pub children: PropertyChildren,
}

impl UpdateProperty {
    /// Column patch. `last_updated` is always bumped to `now`.
    pub fn to_patch(&self, now: Timestamp) -> Record {
        Record::new()
            .set_some("title", self.title.as_deref())
            .set_some("address", self.address.as_deref())
            .set_some("price", self.price)
            .set_some("status", self.status.as_deref())
            .set_some("beds", self.beds)
            .set_some("baths", self.baths)
            .set_some("area", self.area)
            .set_some("lot_size", self.lot_size.as_deref())
            .set_some("year_built", self.year_built)
            .set_some("monthly_fees", self.monthly_fees)
            .set_some("property_type", self.property_type.as_deref())
            .set_some("hero_image", self.hero_image.as_deref())
            .set_some("description", self.description.as_deref())
            .set_some("lifestyle_narrative", self.lifestyle_narrative.as_deref())
            .set_some("neighborhood", self.neighborhood.as_deref())
            .set_some("walk_score", self.walk_score)
            .set_some("transit_score", self.transit_score)
            .set_some("open_house", self.open_house.as_deref())
            .set_some("mls_number", self.mls_number.as_deref())
            .set_some("taxes", self.taxes)
            .set_some("agent_id", self.agent_id.as_deref())
            .set("last_updated", now)
    }
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Contact card shown on a listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentContact {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl AgentContact {
    /// Shown when a listing has no agent or the agent record is gone.
    pub fn placeholder() -> Self {
        Self {
            name: "Listing Agent".into(),
            email: "agent@example.com".into(),
            phone: Some("(555) 555-5555".into()),
        }
    }
}

impl From<&Staff> for AgentContact {
    fn from(staff: &Staff) -> Self {
        Self {
            name: staff.full_name(),
            email: staff.email.clone(),
            phone: staff.telephone.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Disclosures {
    pub mls_number: Option<String>,
    /// `$8,420`, or `N/A` when no tax figure is recorded.
    pub taxes: String,
    pub last_updated: Timestamp,
}

/// A listing with its child collections flattened into display shapes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDetail {
    #[serde(flatten)]
    pub property: Property,
    pub gallery: Vec<String>,
    /// Hero gallery image, else the first gallery image, else the row's own `hero_image`.
    pub hero_image: Option<String>,
    pub highlights: Vec<String>,
    pub sustainability: Vec<String>,
    pub floor_plans: Vec<FloorPlanEntry>,
    pub documents: Vec<DocumentEntry>,
    pub schools: Vec<SchoolEntry>,
    pub nearby: Vec<String>,
    pub lifestyle_tags: Vec<String>,
    pub agent: AgentContact,
    pub disclosures: Disclosures,
}

impl PropertyDetail {
    pub fn assemble(property: Property, rows: PropertyChildRows, agent: Option<&Staff>) -> Self {
        let hero_image = rows
            .gallery
            .iter()
            .find(|g| g.is_hero)
            .or_else(|| rows.gallery.first())
            .map(|g| g.image_url.clone())
            .or_else(|| property.hero_image.clone());

        let disclosures = Disclosures {
            mls_number: property.mls_number.clone(),
            taxes: match property.taxes {
                Some(t) if t != 0.0 => format_currency(t),
                _ => "N/A".into(),
            },
            last_updated: property.last_updated,
        };

        Self {
            gallery: rows.gallery.into_iter().map(|g| g.image_url).collect(),
            hero_image,
            highlights: rows.highlights.into_iter().map(|h| h.highlight_text).collect(),
            sustainability: rows.sustainability.into_iter().map(|s| s.feature).collect(),
            floor_plans: rows
                .floor_plans
                .into_iter()
                .map(|f| FloorPlanEntry {
                    label: f.label,
                    placeholder: f.image_url,
                })
                .collect(),
            documents: rows
                .documents
                .into_iter()
                .map(|d| DocumentEntry {
                    label: d.label,
                    url: d.document_url,
                })
                .collect(),
            schools: rows
                .schools
                .into_iter()
                .map(|s| SchoolEntry {
                    name: s.name,
                    distance: s.distance,
                })
                .collect(),
            nearby: rows.nearby.into_iter().map(|n| n.item).collect(),
            lifestyle_tags: rows.tags.into_iter().map(|t| t.tag).collect(),
            agent: agent.map(AgentContact::from).unwrap_or_else(AgentContact::placeholder),
            disclosures,
            property,
        }
    }
}
