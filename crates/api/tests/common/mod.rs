#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use dreamhome_api::auth::jwt::{generate_token, JwtConfig, DEFAULT_EXPIRY_DAYS};
use dreamhome_api::auth::password::hash_password;
use dreamhome_api::config::ServerConfig;
use dreamhome_api::router::build_app_router;
use dreamhome_api::state::AppState;
use dreamhome_db::models::user::{NewUser, User};
use dreamhome_db::{Record, TableAccessor};

pub const TEST_JWT_SECRET: &str = "integration-test-secret-with-enough-entropy";
pub const TEST_PASSWORD: &str = "open-house-2026";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses an HMAC secret for tokens and drops the `Secure` cookie attribute so
/// cookie assertions stay simple.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        db_max_connections: 5,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        cookie_secure: false,
        jwt: JwtConfig::from_secret(TEST_JWT_SECRET, DEFAULT_EXPIRY_DAYS),
        bootstrap_admin: None,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(COOKIE, format!("token={token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: serde_json::Value, token: &str) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::PATCH, uri, None, Some(body)).await
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: serde_json::Value, token: &str) -> Response {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Insert an account directly and return it. Its password is [`TEST_PASSWORD`].
pub async fn create_user(pool: &PgPool, username: &str, role: &str, staff_id: Option<&str>) -> User {
    let new_user = NewUser {
        username: username.to_string(),
        email: format!("{username}@dreamhome.test"),
        password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
        role: role.to_string(),
        staff_id: staff_id.map(str::to_string),
    };
    TableAccessor::<User>::create(pool, &new_user.to_record())
        .await
        .expect("user insert should succeed")
}

/// Session token for `user`, signed with the test secret.
pub fn token_for(user: &User) -> String {
    generate_token(user.user_id, &test_config().jwt).expect("token generation should succeed")
}

/// Insert an admin and return their session token.
pub async fn admin_token(pool: &PgPool) -> String {
    token_for(&create_user(pool, "admin", "admin", None).await)
}

pub async fn insert_branch(pool: &PgPool, branch_no: &str) {
    let record = Record::new()
        .set("branch_no", branch_no)
        .set("street", "163 Main St")
        .set("city", "Glasgow")
        .set("postcode", "G11 9QX");
    TableAccessor::<dreamhome_db::models::branch::Branch>::create(pool, &record)
        .await
        .expect("branch insert should succeed");
}

pub async fn insert_staff(pool: &PgPool, staff_id: &str, first_name: &str, last_name: &str) {
    let record = Record::new()
        .set("staff_id", staff_id)
        .set("first_name", first_name)
        .set("last_name", last_name)
        .set("email", format!("{}@dreamhome.test", staff_id.to_lowercase()))
        .set("telephone", "0141-848-1825");
    TableAccessor::<dreamhome_db::models::staff::Staff>::create(pool, &record)
        .await
        .expect("staff insert should succeed");
}

/// Insert a bare listing with the given agent.
pub async fn insert_property(
    pool: &PgPool,
    property_id: &str,
    price: i64,
    beds: Option<i64>,
    agent_id: Option<&str>,
) {
    let record = Record::new()
        .set("property_id", property_id)
        .set("title", format!("Listing {property_id}"))
        .set("address", format!("{property_id} Harbour Lane, Kingsport"))
        .set("price", price)
        .set("status", "For Sale")
        .set("beds", beds)
        .set("agent_id", agent_id);
    TableAccessor::<dreamhome_db::models::property::Property>::create(pool, &record)
        .await
        .expect("property insert should succeed");
}
