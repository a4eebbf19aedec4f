//! Integration tests for the generic table accessor and the repositories
//! built on it, run against a throwaway database per test.

use chrono::Utc;
use dreamhome_db::models::branch::{Branch, CreateBranch, UpdateBranch};
use dreamhome_db::models::client::{Client, CreateClient};
use dreamhome_db::models::property::{
    CreateProperty, DocumentEntry, FloorPlanEntry, Property, PropertyChildren,
};
use dreamhome_db::models::showing::Showing;
use dreamhome_db::models::user::User;
use dreamhome_db::repositories::{ProfileRepo, PropertyRepo};
use dreamhome_db::{Direction, Filter, Query, Record, TableAccessor};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn branch(no: &str, postcode: &str) -> CreateBranch {
    CreateBranch {
        branch_no: Some(no.into()),
        street: Some("22 Deer Rd".into()),
        city: Some("London".into()),
        postcode: Some(postcode.into()),
        telephone: None,
    }
}

fn property(id: &str, address: &str, price: i64) -> CreateProperty {
    CreateProperty {
        property_id: Some(id.into()),
        title: Some(format!("Listing {id}")),
        address: Some(address.into()),
        price: Some(price),
        ..Default::default()
    }
}

async fn insert_property(pool: &PgPool, id: &str, address: &str, price: i64) -> Property {
    TableAccessor::<Property>::create(pool, &property(id, address, price).to_record("For Sale"))
        .await
        .expect("property insert should succeed")
}

async fn insert_user(pool: &PgPool, username: &str) -> User {
    let record = Record::new()
        .set("username", username)
        .set("email", format!("{username}@dreamhome.test"))
        .set("password_hash", "not-a-real-hash")
        .set("role", "user");
    TableAccessor::<User>::create(pool, &record)
        .await
        .expect("user insert should succeed")
}

// ---------------------------------------------------------------------------
// Accessor CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_then_find_by_key(pool: PgPool) {
    let created = TableAccessor::<Branch>::create(&pool, &branch("B003", "G11 9QX").to_record())
        .await
        .unwrap();
    assert_eq!(created.branch_no, "B003");
    assert!(created.telephone.is_none());

    let found = TableAccessor::<Branch>::find_by_key(&pool, "B003")
        .await
        .unwrap()
        .expect("branch should exist");
    assert_eq!(found.postcode, "G11 9QX");

    let missing = TableAccessor::<Branch>::find_by_key(&pool, "B999").await.unwrap();
    assert!(missing.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_reports_affected_rows(pool: PgPool) {
    TableAccessor::<Branch>::create(&pool, &branch("B005", "SW1 4EH").to_record())
        .await
        .unwrap();

    let by_key = Filter::by_key::<Branch>("B005");
    let patch = UpdateBranch {
        postcode: Some("SW1 9ZZ".into()),
        ..Default::default()
    }
    .to_patch();
    assert_eq!(TableAccessor::<Branch>::update(&pool, &by_key, &patch).await.unwrap(), 1);

    let updated = TableAccessor::<Branch>::find_by_key(&pool, "B005")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.branch_no, "B005");
    assert_eq!(updated.postcode, "SW1 9ZZ");

    let unknown = Filter::by_key::<Branch>("B404");
    assert_eq!(TableAccessor::<Branch>::update(&pool, &unknown, &patch).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_empty_patch_reports_matches(pool: PgPool) {
    TableAccessor::<Branch>::create(&pool, &branch("B007", "AB2 3SU").to_record())
        .await
        .unwrap();

    let empty = Record::new();
    let hit = TableAccessor::<Branch>::update(&pool, &Filter::by_key::<Branch>("B007"), &empty)
        .await
        .unwrap();
    let miss = TableAccessor::<Branch>::update(&pool, &Filter::by_key::<Branch>("B008"), &empty)
        .await
        .unwrap();
    assert_eq!((hit, miss), (1, 0));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_and_count(pool: PgPool) {
    for no in ["B001", "B002", "B003"] {
        TableAccessor::<Branch>::create(&pool, &branch(no, "X1 1XX").to_record())
            .await
            .unwrap();
    }
    assert_eq!(TableAccessor::<Branch>::count(&pool, &Filter::new()).await.unwrap(), 3);

    let deleted = TableAccessor::<Branch>::delete(&pool, &Filter::by_key::<Branch>("B002"))
        .await
        .unwrap();
    assert_eq!(deleted, 1);
    assert_eq!(TableAccessor::<Branch>::count(&pool, &Filter::new()).await.unwrap(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_order_limit_offset(pool: PgPool) {
    insert_property(&pool, "P1", "1 Main St", 300).await;
    insert_property(&pool, "P2", "2 Main St", 100).await;
    insert_property(&pool, "P3", "3 Main St", 200).await;

    let query = Query::new()
        .order_by("price", Direction::Asc)
        .limit(2)
        .offset(1);
    let page = TableAccessor::<Property>::find(&pool, &query).await.unwrap();
    let ids: Vec<&str> = page.iter().map(|p| p.property_id.as_str()).collect();
    assert_eq!(ids, vec!["P3", "P1"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_contains_is_case_insensitive_and_literal(pool: PgPool) {
    insert_property(&pool, "P1", "12 Leaside Ave", 1).await;
    insert_property(&pool, "P2", "9 Riverdale Rd", 1).await;
    insert_property(&pool, "P3", "100% Leaside_Way", 1).await;

    let query = Query::filter(Filter::new().contains("address", "LEASIDE"));
    let hits = TableAccessor::<Property>::find(&pool, &query).await.unwrap();
    assert_eq!(hits.len(), 2);

    let query = Query::filter(Filter::new().contains("address", "%"));
    let hits = TableAccessor::<Property>::find(&pool, &query).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].property_id, "P3");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_null_filter_matches_missing_values(pool: PgPool) {
    insert_property(&pool, "P1", "1 Main St", 1).await;
    let user = insert_user(&pool, "viewer").await;

    let anonymous = Record::new()
        .set("property_id", "P1")
        .set("requested_by_name", "Aline Stewart")
        .set("requested_by_email", "aline@example.com")
        .set("requested_time", Utc::now());
    let attributed = Record::new()
        .set("property_id", "P1")
        .set("user_id", user.user_id)
        .set("requested_time", Utc::now());
    TableAccessor::<Showing>::create(&pool, &anonymous).await.unwrap();
    TableAccessor::<Showing>::create(&pool, &attributed).await.unwrap();

    let filter = Filter::new().eq("user_id", Option::<i64>::None);
    let rows = TableAccessor::<Showing>::find(&pool, &Query::filter(filter)).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].requested_by_name.as_deref(), Some("Aline Stewart"));
    assert_eq!(rows[0].status, "requested");
}

// ---------------------------------------------------------------------------
// Constraints
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_client_email_violates_named_constraint(pool: PgPool) {
    let client = |id: &str| CreateClient {
        client_id: Some(id.into()),
        first_name: Some("John".into()),
        last_name: Some("Kay".into()),
        email: Some("john.kay@gmail.com".into()),
        preferred_contact: Some("email".into()),
        ..Default::default()
    };

    TableAccessor::<Client>::create(&pool, &client("CR56").to_record())
        .await
        .unwrap();
    let err = TableAccessor::<Client>::create(&pool, &client("CR57").to_record())
        .await
        .unwrap_err();

    match err {
        sqlx::Error::Database(db) => {
            assert_eq!(db.code().as_deref(), Some("23505"));
            assert_eq!(db.constraint(), Some("uq_clients_email"));
        }
        other => panic!("expected a database error, got {other:?}"),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_showing_requires_user_or_contact(pool: PgPool) {
    insert_property(&pool, "P1", "1 Main St", 1).await;

    let unattributed = Record::new()
        .set("property_id", "P1")
        .set("requested_time", Utc::now());
    let result = TableAccessor::<Showing>::create(&pool, &unattributed).await;
    assert!(result.is_err(), "a showing with neither user nor contact must be rejected");
}

// ---------------------------------------------------------------------------
// Repositories
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_property_children_round_trip_in_order(pool: PgPool) {
    insert_property(&pool, "PL94", "6 Argyll St", 400_000).await;

    let children = PropertyChildren {
        gallery: Some(vec!["/front.jpg".into(), "/kitchen.jpg".into()]),
        highlights: Some(vec!["South facing".into(), "New roof".into()]),
        floor_plans: Some(vec![FloorPlanEntry {
            label: "Ground".into(),
            placeholder: "/fp0.png".into(),
        }]),
        documents: Some(vec![DocumentEntry {
            label: "EPC".into(),
            url: "/epc.pdf".into(),
        }]),
        lifestyle_tags: Some(vec!["Family".into()]),
        ..Default::default()
    };
    PropertyRepo::insert_children(&pool, "PL94", &children).await.unwrap();

    let rows = PropertyRepo::load_children(&pool, "PL94").await.unwrap();
    assert_eq!(rows.gallery.len(), 2);
    assert!(rows.gallery[0].is_hero);
    assert!(!rows.gallery[1].is_hero);
    assert_eq!(rows.highlights[1].highlight_text, "New roof");
    assert_eq!(rows.floor_plans[0].image_url, "/fp0.png");
    assert_eq!(rows.documents[0].document_url, "/epc.pdf");
    assert_eq!(rows.tags[0].tag, "Family");
    assert!(rows.schools.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_replace_children_only_touches_supplied_collections(pool: PgPool) {
    insert_property(&pool, "PG21", "18 Dale Rd", 500_000).await;
    let initial = PropertyChildren {
        highlights: Some(vec!["Old".into()]),
        nearby: Some(vec!["Park".into()]),
        ..Default::default()
    };
    PropertyRepo::insert_children(&pool, "PG21", &initial).await.unwrap();

    let update = PropertyChildren {
        highlights: Some(vec!["New A".into(), "New B".into()]),
        ..Default::default()
    };
    PropertyRepo::replace_children(&pool, "PG21", &update).await.unwrap();

    let rows = PropertyRepo::load_children(&pool, "PG21").await.unwrap();
    let highlights: Vec<&str> = rows.highlights.iter().map(|h| h.highlight_text.as_str()).collect();
    assert_eq!(highlights, vec!["New A", "New B"]);
    assert_eq!(rows.nearby.len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleting_property_cascades_to_children(pool: PgPool) {
    insert_property(&pool, "PG36", "2 Manor Rd", 1).await;
    let children = PropertyChildren {
        gallery: Some(vec!["/a.jpg".into()]),
        ..Default::default()
    };
    PropertyRepo::insert_children(&pool, "PG36", &children).await.unwrap();

    TableAccessor::<Property>::delete(&pool, &Filter::by_key::<Property>("PG36"))
        .await
        .unwrap();
    let rows = PropertyRepo::load_children(&pool, "PG36").await.unwrap();
    assert!(rows.gallery.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_profile_get_or_create_is_idempotent(pool: PgPool) {
    let user = insert_user(&pool, "profiled").await;

    let first = ProfileRepo::get_or_create(&pool, user.user_id).await.unwrap();
    assert!(first.first_name.is_none());

    let patch = Record::new().set("first_name", "Mary");
    TableAccessor::<dreamhome_db::models::profile::UserProfile>::update(
        &pool,
        &Filter::new().eq("user_id", user.user_id),
        &patch,
    )
    .await
    .unwrap();

    let second = ProfileRepo::get_or_create(&pool, user.user_id).await.unwrap();
    assert_eq!(second.first_name.as_deref(), Some("Mary"));
}
