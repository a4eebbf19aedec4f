//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and the password policy.
//! - [`jwt`] -- session token generation and validation.
//! - [`cookie`] -- reading and writing the `token` cookie.

pub mod cookie;
pub mod jwt;
pub mod password;
