//! Branch office directory.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use dreamhome_core::types::Timestamp;

use crate::accessor::{Record, Table};

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A row from the `branches` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Branch {
    pub branch_no: String,
    pub street: String,
    pub city: String,
    pub postcode: String,
    pub telephone: Option<String>,
    pub created_at: Timestamp,
}

impl Table for Branch {
    const NAME: &'static str = "branches";
    const PRIMARY_KEY: &'static str = "branch_no";
    const COLUMNS: &'static str = "branch_no, street, city, postcode, telephone, created_at";
}

// ---------------------------------------------------------------------------
// Create DTO
// ---------------------------------------------------------------------------

/// Input for creating a branch. Required fields are checked by the handler.
#[derive(Debug, Default, Deserialize)]
pub struct CreateBranch {
    pub branch_no: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub postcode: Option<String>,
    pub telephone: Option<String>,
}

impl CreateBranch {
    pub fn to_record(&self) -> Record {
        Record::new()
            .set("branch_no", self.branch_no.as_deref())
            .set("street", self.street.as_deref())
            .set("city", self.city.as_deref())
            .set("postcode", self.postcode.as_deref())
            .set("telephone", self.telephone.as_deref())
    }
}

// ---------------------------------------------------------------------------
// Update DTO
// ---------------------------------------------------------------------------

/// Patch for a branch. `branch_no` is not accepted.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateBranch {
    pub street: Option<String>,
    pub city: Option<String>,
    pub postcode: Option<String>,
    pub telephone: Option<String>,
}

impl UpdateBranch {
    pub fn to_patch(&self) -> Record {
        Record::new()
            .set_some("street", self.street.as_deref())
            .set_some("city", self.city.as_deref())
            .set_some("postcode", self.postcode.as_deref())
            .set_some("telephone", self.telephone.as_deref())
    }
}
