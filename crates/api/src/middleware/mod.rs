//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- the signed-in user, loaded from the session token.
//! - [`auth::MaybeAuthUser`] -- the signed-in user if any, for public routes.
//! - [`rbac::RequireAdmin`] -- requires the `admin` role.

pub mod auth;
pub mod rbac;
