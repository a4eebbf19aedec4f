//! Request handlers, one submodule per resource.
//!
//! Handlers validate input, check access through the extractor types in
//! [`crate::middleware`], delegate to `dreamhome_db` table accessors and map
//! errors via [`AppError`](crate::error::AppError).

pub mod approvals;
pub mod auth;
pub mod branches;
pub mod clients;
pub mod inquiries;
pub mod profiles;
pub mod properties;
pub mod showings;
pub mod staff;
pub mod users;
