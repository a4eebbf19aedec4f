pub mod approvals;
pub mod auth;
pub mod branches;
pub mod clients;
pub mod health;
pub mod inquiries;
pub mod profiles;
pub mod properties;
pub mod showings;
pub mod staff;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /health                                  service + database health (public)
///
/// /auth/login                              login (public)
/// /auth/validate                           current session (auth)
/// /auth/logout                             clear session cookie (public)
///
/// /users/create                            register (public; role/staff link admin only)
/// /users                                   list active users, paginated (admin)
/// /users/active                            all active users (admin)
/// /users/count                             active user count (admin)
/// /users/{user_id}                         get, update (self or admin), delete (admin)
///
/// /profiles/me                             get, update own profile
/// /profiles/{user_id}                      get profile (self or admin)
///
/// /clients                                 list (auth), create (admin)
/// /clients/{client_id}                     get (auth), update (admin)
/// /staff                                   list (auth), create (admin)
/// /staff/{staff_id}                        get (auth), update (admin)
/// /branches                                list (auth), create (admin)
/// /branches/{branch_no}                    get (auth), update (admin)
///
/// /approvals/{user_id}/approve             approve account (admin)
/// /approvals/{user_id}/approvals           approvals for one user (admin)
/// /approvals/approved                      every approval record (admin)
///
/// /properties                              list (public), create (admin or staff-linked)
/// /properties/{property_id}                detail (public), update (admin or agent)
///
/// /showings                                request a showing (optional auth)
/// /showings/user                           own showings
/// /showings/property/{property_id}         showings for a listing (admin or agent)
/// /showings/{showing_id}                   update status (admin or agent), delete (owner or admin)
///
/// /inquiries                               send an inquiry (optional auth)
/// /inquiries/user                          own inquiries
/// /inquiries/property/{property_id}        inquiries for a listing (admin or agent)
/// /inquiries/{inquiry_id}/respond          answer (admin or agent)
/// /inquiries/{inquiry_id}                  delete (owner or admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/profiles", profiles::router())
        // Directories: read for any signed-in user, write for admins.
        .nest("/clients", clients::router())
        .nest("/staff", staff::router())
        .nest("/branches", branches::router())
        .nest("/approvals", approvals::router())
        // Listings and the leads filed against them.
        .nest("/properties", properties::router())
        .nest("/showings", showings::router())
        .nest("/inquiries", inquiries::router())
}
