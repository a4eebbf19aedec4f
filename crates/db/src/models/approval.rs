//! Audit trail of account approvals.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use dreamhome_core::types::{DbId, Timestamp};

use crate::accessor::{Record, Table};

/// A row from the `user_approvals` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserApproval {
    pub approval_id: DbId,
    pub user_id: DbId,
    pub approved_by: DbId,
    pub notes: Option<String>,
    pub approved_at: Timestamp,
}

impl Table for UserApproval {
    const NAME: &'static str = "user_approvals";
    const PRIMARY_KEY: &'static str = "approval_id";
    const COLUMNS: &'static str = "approval_id, user_id, approved_by, notes, approved_at";
}

/// Optional body of `PATCH /approvals/{user_id}/approve`.
#[derive(Debug, Default, Deserialize)]
pub struct ApproveUser {
    pub notes: Option<String>,
}

impl ApproveUser {
    pub fn to_record(&self, user_id: DbId, approved_by: DbId) -> Record {
        Record::new()
            .set("user_id", user_id)
            .set("approved_by", approved_by)
            .set("notes", self.notes.as_deref())
    }
}
