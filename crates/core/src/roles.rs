//! Well-known role name constants.
//!
//! These must match the `users.role` check constraint in
//! `20260301000003_create_users_tables.sql`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";

/// Whether `role` is one of the known role names.
pub fn is_known_role(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_USER
}
