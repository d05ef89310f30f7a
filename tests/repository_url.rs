//! PostgreSQL store tests. Run with `cargo test -- --ignored` against a
//! database reachable through `DATABASE_URL`.

use chrono::{Duration, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use shortcode::domain::entities::{NewUrlRecord, UrlPatch};
use shortcode::domain::repositories::{StoreError, UrlRepository};
use shortcode::infrastructure::persistence::PgUrlRepository;

fn new_record(code: &str, url: &str) -> NewUrlRecord {
    NewUrlRecord {
        original_url: url.to_string(),
        short_code: code.to_string(),
        custom_alias: None,
        expires_at: None,
    }
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_insert_and_find(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));

    let record = repo
        .insert(new_record("abc123", "https://example.com"))
        .await
        .unwrap();

    assert_eq!(record.short_code, "abc123");
    assert_eq!(record.clicks, 0);
    assert!(record.is_active);

    let by_code = repo.find_by_code("abc123").await.unwrap().unwrap();
    assert_eq!(by_code, record);

    let by_id = repo.find_by_id(record.id).await.unwrap().unwrap();
    assert_eq!(by_id.short_code, "abc123");
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_find_by_code_not_found(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));

    assert!(repo.find_by_code("notfound").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_duplicate_code_is_rejected(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));

    repo.insert(new_record("dup", "https://a.test")).await.unwrap();
    let result = repo.insert(new_record("dup", "https://b.test")).await;

    assert!(matches!(result, Err(StoreError::DuplicateCode { .. })));
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_increment_skips_expired(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));

    let mut expired = new_record("old", "https://a.test");
    expired.expires_at = Some(Utc::now() - Duration::hours(1));
    repo.insert(expired).await.unwrap();
    repo.insert(new_record("live", "https://b.test")).await.unwrap();

    assert!(repo.increment_clicks("old", Utc::now()).await.unwrap().is_none());

    let live = repo.increment_clicks("live", Utc::now()).await.unwrap().unwrap();
    assert_eq!(live.clicks, 1);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_concurrent_increments_are_not_lost(pool: PgPool) {
    let repo = Arc::new(PgUrlRepository::new(Arc::new(pool)));
    repo.insert(new_record("hot", "https://a.test")).await.unwrap();

    let handles: Vec<_> = (0..20)
        .map(|_| {
            let repo = repo.clone();
            tokio::spawn(async move { repo.increment_clicks("hot", Utc::now()).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let record = repo.find_by_code("hot").await.unwrap().unwrap();
    assert_eq!(record.clicks, 20);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_update_keeps_expiry_when_absent(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));
    let mut new = new_record("promo", "https://a.test");
    new.expires_at = Some(Utc::now() + Duration::days(1));
    let inserted = repo.insert(new).await.unwrap();

    let updated = repo
        .update(
            "promo",
            UrlPatch {
                original_url: "https://b.test".to_string(),
                expires_at: None,
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.original_url, "https://b.test");
    assert_eq!(updated.expires_at, inserted.expires_at);
    assert_eq!(updated.clicks, 0);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_mark_inactive_and_delete(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));
    repo.insert(new_record("gone", "https://a.test")).await.unwrap();

    assert!(repo.mark_inactive("gone").await.unwrap());
    assert!(!repo.find_by_code("gone").await.unwrap().unwrap().is_active);

    assert!(repo.delete_by_code("gone").await.unwrap());
    assert!(!repo.delete_by_code("gone").await.unwrap());
    assert!(!repo.mark_inactive("gone").await.unwrap());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_list_in_creation_order(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));
    for code in ["a1", "b2", "c3"] {
        repo.insert(new_record(code, "https://a.test")).await.unwrap();
    }

    let all = repo.list(0, 10).await.unwrap();
    let codes: Vec<_> = all.iter().map(|r| r.short_code.as_str()).collect();
    assert_eq!(codes, ["a1", "b2", "c3"]);

    let page = repo.list(1, 1).await.unwrap();
    assert_eq!(page[0].short_code, "b2");

    assert_eq!(repo.count().await.unwrap(), 3);
}
