//! Row models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct bound to its table through [`crate::Table`]
//! - A `Deserialize` create DTO that knows how to build an insert [`crate::Record`]
//! - A `Deserialize` update DTO (all `Option` fields) that builds a patch
//!
//! Natural keys never appear in update DTOs, so a patch cannot rewrite them.

pub mod approval;
pub mod branch;
pub mod client;
pub mod inquiry;
pub mod profile;
pub mod property;
pub mod showing;
pub mod staff;
pub mod user;
