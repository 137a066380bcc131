#[path = "../common/mod.rs"]
mod common;

use chrono::{Duration as ChronoDuration, Utc};
use common::TestBucket;
use ferrous_galaxy_application::ports::{CacheEngine, CacheStatsSource};
use ferrous_galaxy_application::use_cases::FetchCacheEntriesUseCase;
use ferrous_galaxy_domain::{DomainError, ObjectAttributes};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

fn assert_expires_in(expires_at: chrono::DateTime<Utc>, secs: i64) {
    let expected = Utc::now() + ChronoDuration::seconds(secs);
    let drift = (expires_at - expected).num_milliseconds().abs();
    assert!(drift < 2_000, "expires_at off by {}ms", drift);
}

// ============================================================================
// Loader against a real bucket
// ============================================================================

#[tokio::test]
async fn test_content_of_meta_file() {
    // Arrange
    let body = vec![b'm'; 128];
    let bucket = TestBucket::new().with_object("blocks/01/meta.json", &body);
    let loader = bucket.loader();

    // Act
    let envelope = loader
        .execute("content:blocks/01/meta.json", &CancellationToken::new())
        .await
        .unwrap();

    // Assert
    assert_eq!(envelope.payload.as_ref(), body.as_slice());
    assert_expires_in(envelope.expires_at, 300);
}

#[tokio::test]
async fn test_exists_of_missing_object() {
    let bucket = TestBucket::new();
    let loader = bucket.loader();

    let envelope = loader
        .execute("exists:missing-object", &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(envelope.payload.as_ref(), b"false");
    assert_expires_in(envelope.expires_at, 30);
}

#[tokio::test]
async fn test_subrange_of_chunk() {
    let body: Vec<u8> = (0..=255u8).collect();
    let bucket = TestBucket::new().with_object("chunk.dat", &body);
    let loader = bucket.loader();

    let envelope = loader
        .execute("subrange:chunk.dat:100:200", &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(envelope.payload.len(), 100);
    assert_eq!(envelope.payload.as_ref(), &body[100..200]);
    assert_expires_in(envelope.expires_at, 86400);
}

#[tokio::test]
async fn test_unconfigured_operation_is_rejected() {
    let bucket = TestBucket::new().with_object("logs/app.log", b"line");
    let loader = bucket.loader();

    let result = loader
        .execute("content:logs/app.log", &CancellationToken::new())
        .await;

    assert!(matches!(result, Err(DomainError::UnconfiguredPath { .. })));
}

#[tokio::test]
async fn test_attributes_and_listing() {
    let bucket = TestBucket::new()
        .with_object("blocks/01/meta.json", b"{}")
        .with_object("blocks/02/meta.json", b"{}")
        .with_object("blocks/index.json", b"[]");
    let loader = bucket.loader();
    let cancel = CancellationToken::new();

    let attrs = loader.execute("attrs:blocks/01/meta.json", &cancel).await.unwrap();
    let attrs: ObjectAttributes = serde_json::from_slice(&attrs.payload).unwrap();
    assert_eq!(attrs.size, 2);

    let listing = loader.execute("iter:blocks/", &cancel).await.unwrap();
    let names: Vec<String> = serde_json::from_slice(&listing.payload).unwrap();
    assert_eq!(names, vec!["blocks/01/", "blocks/02/", "blocks/index.json"]);
}

// ============================================================================
// Through the cache engine
// ============================================================================

#[tokio::test]
async fn test_second_read_served_from_cache() {
    let bucket = TestBucket::new().with_object("blocks/01/meta.json", b"{\"v\":1}");
    let (_loader, galaxy) = bucket.galaxy();

    let first = galaxy.get("content:blocks/01/meta.json").await.unwrap();
    // Changing the object does not show through until the entry expires.
    std::fs::write(bucket.path().join("blocks/01/meta.json"), b"{\"v\":2}").unwrap();
    let second = galaxy.get("content:blocks/01/meta.json").await.unwrap();

    assert_eq!(first, second);
    let stats = galaxy.stats();
    assert_eq!(stats.gets, 2);
    assert_eq!(stats.backend_loads, 1);
    assert_eq!(stats.main_cache_hits, 1);
}

#[tokio::test]
async fn test_fetch_skips_failing_keys() {
    let bucket = TestBucket::new()
        .with_object("blocks/01/meta.json", b"{}")
        .with_object("blocks/02/meta.json", b"");
    let (_loader, galaxy) = bucket.galaxy();
    let fetch = FetchCacheEntriesUseCase::new(Arc::clone(&galaxy) as Arc<dyn CacheEngine>);

    let keys: Vec<String> = [
        "content:blocks/01/meta.json",
        "content:blocks/02/meta.json",
        "content:blocks/03/meta.json",
        "exists:blocks/03/meta.json",
        "not-a-key",
    ]
    .iter()
    .map(|k| k.to_string())
    .collect();

    let found = fetch.execute(&keys).await;

    assert_eq!(found.len(), 2);
    assert_eq!(found["content:blocks/01/meta.json"].as_ref(), b"{}");
    assert_eq!(found["exists:blocks/03/meta.json"].as_ref(), b"false");
    assert_eq!(galaxy.stats().backend_load_errors, 2);
}
