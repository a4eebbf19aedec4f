//! Integration tests for showing requests and inquiries.

mod common;

use axum::http::StatusCode;
use common::{
    admin_token, body_json, create_user, delete_auth, get_auth, insert_property, insert_staff,
    patch_json_auth, post_json, post_json_auth, token_for,
};
use serde_json::json;
use sqlx::PgPool;

/// A listing `PG4` whose agent is staff `SG37`.
async fn seed_listing(pool: &PgPool) {
    insert_staff(pool, "SG37", "Ann", "Beech").await;
    insert_property(pool, "PG4", 350_000, Some(2), Some("SG37")).await;
}

// ---------------------------------------------------------------------------
// Showings
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_anonymous_showing_keeps_contact_snapshot(pool: PgPool) {
    seed_listing(&pool).await;
    let app = common::build_test_app(pool);

    let body = json!({
        "propertyId": "PG4",
        "requestedTime": "2026-11-02T14:30:00Z",
        "name": "Aline Stewart",
        "email": "aline@mail.test",
        "phone": "0141-848-1825"
    });
    let response = post_json(app, "/api/showings", body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Showing requested successfully");
    let showing = &json["showing"];
    assert!(showing["user_id"].is_null());
    assert_eq!(showing["requested_by_name"], "Aline Stewart");
    assert_eq!(showing["requested_by_email"], "aline@mail.test");
    assert_eq!(showing["requested_by_phone"], "0141-848-1825");
    assert_eq!(showing["status"], "requested");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_anonymous_showing_needs_contact(pool: PgPool) {
    seed_listing(&pool).await;
    let app = common::build_test_app(pool);

    let body = json!({ "propertyId": "PG4", "requestedTime": "2026-11-02T14:30:00Z" });
    let response = post_json(app, "/api/showings", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_showing_with_bad_time_or_property(pool: PgPool) {
    seed_listing(&pool).await;
    let app = common::build_test_app(pool);

    let body = json!({
        "propertyId": "PG4",
        "requestedTime": "next tuesday",
        "name": "Aline",
        "email": "aline@mail.test"
    });
    let response = post_json(app.clone(), "/api/showings", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json!({
        "propertyId": "P404",
        "requestedTime": "2026-11-02T14:30:00Z",
        "name": "Aline",
        "email": "aline@mail.test"
    });
    let response = post_json(app, "/api/showings", body).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_signed_in_showing_records_user_only(pool: PgPool) {
    seed_listing(&pool).await;
    let user = create_user(&pool, "buyer", "user", None).await;
    let token = token_for(&user);
    let app = common::build_test_app(pool);

    let body = json!({
        "propertyId": "PG4",
        "requestedTime": "2026-11-03T10:00:00+01:00",
        "name": "Ignored Name",
        "email": "ignored@mail.test"
    });
    let response = post_json_auth(app.clone(), "/api/showings", body, &token).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["showing"]["user_id"], user.user_id);
    assert!(json["showing"]["requested_by_name"].is_null());
    assert!(json["showing"]["requested_by_email"].is_null());

    let response = get_auth(app, "/api/showings/user", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_agent_confirms_showing(pool: PgPool) {
    seed_listing(&pool).await;
    let buyer = token_for(&create_user(&pool, "buyer", "user", None).await);
    let agent = token_for(&create_user(&pool, "abeech", "user", Some("SG37")).await);
    let app = common::build_test_app(pool);

    let body = json!({ "propertyId": "PG4", "requestedTime": "2026-11-02T14:30:00Z" });
    let json = body_json(post_json_auth(app.clone(), "/api/showings", body, &buyer).await).await;
    let id = json["showing"]["showing_id"].as_i64().unwrap();
    let uri = format!("/api/showings/{id}");

    let response =
        patch_json_auth(app.clone(), &uri, json!({ "status": "confirmed" }), &buyer).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response =
        patch_json_auth(app.clone(), &uri, json!({ "status": "maybe" }), &agent).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let patch = json!({ "status": "confirmed", "notes": "Meet at the gate" });
    let response = patch_json_auth(app.clone(), &uri, patch, &agent).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Showing updated successfully");
    assert_eq!(json["showing"]["status"], "confirmed");
    assert_eq!(json["showing"]["notes"], "Meet at the gate");

    let response = get_auth(app.clone(), "/api/showings/property/PG4", &agent).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);

    let response = get_auth(app, "/api/showings/property/PG4", &buyer).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_only_owner_or_admin_deletes_showing(pool: PgPool) {
    seed_listing(&pool).await;
    let owner = token_for(&create_user(&pool, "owner", "user", None).await);
    let other = token_for(&create_user(&pool, "other", "user", None).await);
    let admin = admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let mut ids = Vec::new();
    for _ in 0..2 {
        let body = json!({ "propertyId": "PG4", "requestedTime": "2026-11-02T14:30:00Z" });
        let json = body_json(post_json_auth(app.clone(), "/api/showings", body, &owner).await).await;
        ids.push(json["showing"]["showing_id"].as_i64().unwrap());
    }

    let first = format!("/api/showings/{}", ids[0]);
    let response = delete_auth(app.clone(), &first, &other).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_auth(app.clone(), &first, &owner).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "Showing deleted successfully");

    let response = delete_auth(app.clone(), &first, &owner).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let second = format!("/api/showings/{}", ids[1]);
    let response = delete_auth(app, &second, &admin).await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Inquiries
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_anonymous_inquiry(pool: PgPool) {
    seed_listing(&pool).await;
    let app = common::build_test_app(pool);

    let body = json!({
        "propertyId": "PG4",
        "question": "Is the garden south-facing?",
        "name": "John Kay",
        "phone": "0207-774-5632"
    });
    let response = post_json(app.clone(), "/api/inquiries", body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Inquiry sent successfully");
    assert_eq!(json["inquiry"]["status"], "open");
    assert_eq!(json["inquiry"]["inquirer_name"], "John Kay");
    assert!(json["inquiry"]["user_id"].is_null());

    let response = post_json(app, "/api/inquiries", json!({ "propertyId": "PG4" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Missing required fields: question");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_agent_reads_and_answers_inquiries(pool: PgPool) {
    seed_listing(&pool).await;
    let buyer = token_for(&create_user(&pool, "buyer", "user", None).await);
    let agent = token_for(&create_user(&pool, "abeech", "user", Some("SG37")).await);
    let app = common::build_test_app(pool);

    let body = json!({ "propertyId": "PG4", "question": "Any parking?" });
    let json = body_json(post_json_auth(app.clone(), "/api/inquiries", body, &buyer).await).await;
    let id = json["inquiry"]["inquiry_id"].as_i64().unwrap();

    let response = get_auth(app.clone(), "/api/inquiries/property/PG4", &buyer).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_auth(app.clone(), "/api/inquiries/property/PG4", &agent).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json[0]["question"], "Any parking?");

    let uri = format!("/api/inquiries/{id}/respond");
    let response = patch_json_auth(app.clone(), &uri, json!({}), &agent).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response =
        patch_json_auth(app.clone(), &uri, json!({ "response": "Two spaces." }), &agent).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Response sent successfully");
    assert_eq!(json["inquiry"]["status"], "answered");
    assert_eq!(json["inquiry"]["response"], "Two spaces.");
    assert!(json["inquiry"]["responded_at"].is_string());

    let response = get_auth(app, "/api/inquiries/user", &buyer).await;
    let json = body_json(response).await;
    assert_eq!(json[0]["status"], "answered");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_anonymous_inquiry_is_admin_delete_only(pool: PgPool) {
    seed_listing(&pool).await;
    let user = token_for(&create_user(&pool, "someone", "user", None).await);
    let admin = admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let body = json!({
        "propertyId": "PG4",
        "question": "Pets allowed?",
        "name": "Mike Ritchie",
        "email": "mike@mail.test"
    });
    let json = body_json(post_json(app.clone(), "/api/inquiries", body).await).await;
    let uri = format!("/api/inquiries/{}", json["inquiry"]["inquiry_id"]);

    let response = delete_auth(app.clone(), &uri, &user).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_auth(app, &uri, &admin).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "Inquiry deleted successfully");
}
