//! Showing (viewing) requests filed against a listing.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use dreamhome_core::contact::ContactSnapshot;
use dreamhome_core::types::{DbId, Timestamp};

use crate::accessor::{Record, Table};

/// A row from the `showings` table.
///
/// Exactly one attribution is stored: `user_id` for signed-in requesters,
/// otherwise the `requested_by_*` snapshot.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Showing {
    pub showing_id: DbId,
    pub property_id: String,
    pub user_id: Option<DbId>,
    pub requested_by_name: Option<String>,
    pub requested_by_email: Option<String>,
    pub requested_by_phone: Option<String>,
    pub requested_time: Timestamp,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Table for Showing {
    const NAME: &'static str = "showings";
    const PRIMARY_KEY: &'static str = "showing_id";
    const COLUMNS: &'static str = "showing_id, property_id, user_id, requested_by_name, \
        requested_by_email, requested_by_phone, requested_time, status, notes, \
        created_at, updated_at";
}

/// Body of `POST /showings`. `requestedTime` is an RFC 3339 timestamp.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestShowing {
    #[serde(alias = "property_id")]
    pub property_id: Option<String>,
    #[serde(alias = "requested_time")]
    pub requested_time: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

/// Everything needed to insert a showing once the request is validated.
#[derive(Debug, Clone)]
pub struct NewShowing {
    pub property_id: String,
    pub user_id: Option<DbId>,
    pub contact: ContactSnapshot,
    pub requested_time: Timestamp,
    pub status: &'static str,
    pub notes: Option<String>,
}

impl NewShowing {
    pub fn to_record(&self) -> Record {
        Record::new()
            .set("property_id", self.property_id.as_str())
            .set("user_id", self.user_id)
            .set("requested_by_name", self.contact.name.as_deref())
            .set("requested_by_email", self.contact.email.as_deref())
            .set("requested_by_phone", self.contact.phone.as_deref())
            .set("requested_time", self.requested_time)
            .set("status", self.status)
            .set("notes", self.notes.as_deref())
    }
}

/// Body of `PATCH /showings/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateShowingStatus {
    pub status: Option<String>,
    pub notes: Option<String>,
}
