//! Staff directory.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use dreamhome_core::types::Timestamp;

use crate::accessor::{Record, Table};

/// A row from the `staff` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Staff {
    pub staff_id: String,
    pub first_name: String,
    pub last_name: String,
    pub position: Option<String>,
    pub sex: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub salary: Option<f64>,
    pub branch_no: Option<String>,
    pub telephone: Option<String>,
    pub mobile: Option<String>,
    pub email: String,
    pub created_at: Timestamp,
}

impl Staff {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Table for Staff {
    const NAME: &'static str = "staff";
    const PRIMARY_KEY: &'static str = "staff_id";
    const COLUMNS: &'static str = "staff_id, first_name, last_name, position, sex, \
        date_of_birth, salary, branch_no, telephone, mobile, email, created_at";
}

/// Input for creating a staff member.
#[derive(Debug, Default, Deserialize)]
pub struct CreateStaff {
    pub staff_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub position: Option<String>,
    pub sex: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub salary: Option<f64>,
    pub branch_no: Option<String>,
    pub telephone: Option<String>,
    pub mobile: Option<String>,
    pub email: Option<String>,
}

impl CreateStaff {
    pub fn to_record(&self) -> Record {
        Record::new()
            .set("staff_id", self.staff_id.as_deref())
            .set("first_name", self.first_name.as_deref())
            .set("last_name", self.last_name.as_deref())
            .set("position", self.position.as_deref())
            .set("sex", self.sex.as_deref())
            .set("date_of_birth", self.date_of_birth)
            .set("salary", self.salary)
            .set("branch_no", self.branch_no.as_deref())
            .set("telephone", self.telephone.as_deref())
            .set("mobile", self.mobile.as_deref())
            .set("email", self.email.as_deref())
    }
}

/// Patch for a staff member. `staff_id` is not accepted.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateStaff {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub position: Option<String>,
    pub sex: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub salary: Option<f64>,
    pub branch_no: Option<String>,
    pub telephone: Option<String>,
    pub mobile: Option<String>,
    pub email: Option<String>,
}

impl UpdateStaff {
    pub fn to_patch(&self) -> Record {
        Record::new()
            .set_some("first_name", self.first_name.as_deref())
            .set_some("last_name", self.last_name.as_deref())
            .set_some("position", self.position.as_deref())
            .set_some("sex", self.sex.as_deref())
            .set_some("date_of_birth", self.date_of_birth)
            .set_some("salary", self.salary)
            .set_some("branch_no", self.branch_no.as_deref())
            .set_some("telephone", self.telephone.as_deref())
            .set_some("mobile", self.mobile.as_deref())
            .set_some("email", self.email.as_deref())
    }
}
