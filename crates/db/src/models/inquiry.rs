//! Questions sent about a listing.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use dreamhome_core::contact::ContactSnapshot;
use dreamhome_core::types::{DbId, Timestamp};

use crate::accessor::{Record, Table};

/// A row from the `inquiries` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Inquiry {
    pub inquiry_id: DbId,
    pub property_id: String,
    pub user_id: Option<DbId>,
    pub inquirer_name: Option<String>,
    pub inquirer_email: Option<String>,
    pub inquirer_phone: Option<String>,
    pub question: String,
    pub response: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
    pub responded_at: Option<Timestamp>,
}

impl Table for Inquiry {
    const NAME: &'static str = "inquiries";
    const PRIMARY_KEY: &'static str = "inquiry_id";
    const COLUMNS: &'static str = "inquiry_id, property_id, user_id, inquirer_name, \
        inquirer_email, inquirer_phone, question, response, status, created_at, responded_at";
}

/// Body of `POST /inquiries`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendInquiry {
    #[serde(alias = "property_id")]
    pub property_id: Option<String>,
    pub question: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewInquiry {
    pub property_id: String,
    pub user_id: Option<DbId>,
    pub contact: ContactSnapshot,
    pub question: String,
    pub status: &'static str,
}

impl NewInquiry {
    pub fn to_record(&self) -> Record {
        Record::new()
            .set("property_id", self.property_id.as_str())
            .set("user_id", self.user_id)
            .set("inquirer_name", self.contact.name.as_deref())
            .set("inquirer_email", self.contact.email.as_deref())
            .set("inquirer_phone", self.contact.phone.as_deref())
            .set("question", self.question.as_str())
            .set("status", self.status)
    }
}

/// Body of `PATCH /inquiries/{id}/respond`.
#[derive(Debug, Default, Deserialize)]
pub struct RespondToInquiry {
    pub response: Option<String>,
}
