//! Database-free domain rules for the Dream Home back office.
//!
//! Everything here is pure logic over plain values so it can be unit tested
//! without a store: listing filters and market statistics, access decisions,
//! contact snapshot rules, status vocabularies and money formatting.

pub mod access;
pub mod contact;
pub mod error;
pub mod listing;
pub mod money;
pub mod roles;
pub mod status;
pub mod types;
pub mod validation;
