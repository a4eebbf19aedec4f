//! Repository layer for operations the generic accessor does not cover.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod profile_repo;
pub mod property_repo;

pub use profile_repo::ProfileRepo;
pub use property_repo::PropertyRepo;
