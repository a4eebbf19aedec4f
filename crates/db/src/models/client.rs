//! Client directory.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use dreamhome_core::types::Timestamp;

use crate::accessor::{Record, Table};

/// A row from the `clients` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Client {
    pub client_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub telephone: Option<String>,
    pub preferred_contact: String,
    pub preferred_type: Option<String>,
    pub max_rent: Option<f64>,
    pub notes: Option<String>,
    pub branch_no: Option<String>,
    pub created_at: Timestamp,
}

impl Table for Client {
    const NAME: &'static str = "clients";
    const PRIMARY_KEY: &'static str = "client_id";
    const COLUMNS: &'static str = "client_id, first_name, last_name, email, telephone, \
        preferred_contact, preferred_type, max_rent, notes, branch_no, created_at";
}

/// Input for registering a client.
#[derive(Debug, Default, Deserialize)]
pub struct CreateClient {
    pub client_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub telephone: Option<String>,
    pub preferred_contact: Option<String>,
    pub preferred_type: Option<String>,
    pub max_rent: Option<f64>,
    pub notes: Option<String>,
    pub branch_no: Option<String>,
}

impl CreateClient {
    pub fn to_record(&self) -> Record {
        Record::new()
            .set("client_id", self.client_id.as_deref())
            .set("first_name", self.first_name.as_deref())
            .set("last_name", self.last_name.as_deref())
            .set("email", self.email.as_deref().map(str::trim))
            .set("telephone", self.telephone.as_deref())
            .set("preferred_contact", self.preferred_contact.as_deref())
            .set("preferred_type", self.preferred_type.as_deref())
            .set("max_rent", self.max_rent)
            .set("notes", self.notes.as_deref())
            .set("branch_no", self.branch_no.as_deref())
    }
}

/// Patch for a client. `client_id` is not accepted.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateClient {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub telephone: Option<String>,
    pub preferred_contact: Option<String>,
    pub preferred_type: Option<String>,
    pub max_rent: Option<f64>,
    pub notes: Option<String>,
    pub branch_no: Option<String>,
}

impl UpdateClient {
    pub fn to_patch(&self) -> Record {
        Record::new()
            .set_some("first_name", self.first_name.as_deref())
            .set_some("last_name", self.last_name.as_deref())
            .set_some("email", self.email.as_deref().map(str::trim))
            .set_some("telephone", self.telephone.as_deref())
            .set_some("preferred_contact", self.preferred_contact.as_deref())
            .set_some("preferred_type", self.preferred_type.as_deref())
            .set_some("max_rent", self.max_rent)
            .set_some("notes", self.notes.as_deref())
            .set_some("branch_no", self.branch_no.as_deref())
    }
}
