#![allow(clippy::unwrap_used, reason = "test code")]

use std::sync::Arc;

use cinesync_core::{IdentityResolver, MovieSnapshot, Settings};
use cinesync_storage::{MemoryStore, RemoteStore};
use serde_json::json;

use super::SavedItemRegistry;
use crate::tests::{fields, FailingStore, FakeIdentity};
use crate::AuthGate;

const SAVED: &str = "saved_movies";

fn registry(store: Arc<dyn RemoteStore>, identity: Arc<FakeIdentity>) -> SavedItemRegistry {
    let gate = AuthGate::new(identity as Arc<dyn IdentityResolver>);
    SavedItemRegistry::new(store, gate, &Settings::default())
}

fn movie(id: i64) -> MovieSnapshot {
    MovieSnapshot::new(id, format!("Movie {id}"), Some(format!("/poster-{id}.jpg")))
}

#[tokio::test]
async fn test_save_twice_keeps_one_row() {
    let store = MemoryStore::new();
    let reg = registry(Arc::new(store.clone()), Arc::new(FakeIdentity::signed_in("alice", "dev")));

    let first = reg.save(&movie(42)).await.unwrap();
    let second = reg.save(&movie(42)).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(store.len(SAVED).await, 1);
    assert_eq!(first.owner_id, "alice");
    assert_eq!(first.poster_url, "https://image.tmdb.org/t/p/w500/poster-42.jpg");
    assert!(first.created_at > 0);
}

#[tokio::test]
async fn test_save_returns_existing_row_unchanged() {
    let store = MemoryStore::new();
    let reg = registry(Arc::new(store.clone()), Arc::new(FakeIdentity::signed_in("alice", "dev")));

    let original = reg.save(&movie(7)).await.unwrap();
    let retitled = MovieSnapshot::new(7, "Renamed", None);
    let again = reg.save(&retitled).await.unwrap();

    assert_eq!(again.title, original.title);
    assert_eq!(again.created_at, original.created_at);
}

#[tokio::test]
async fn test_anonymous_save_uses_device_id() {
    let store = MemoryStore::new();
    let reg = registry(Arc::new(store.clone()), Arc::new(FakeIdentity::anonymous("dev-7")));

    let item = reg.save(&movie(1)).await.unwrap();
    assert_eq!(item.owner_id, "dev-7");
    assert!(reg.is_saved(1).await.unwrap());
}

#[tokio::test]
async fn test_owners_are_isolated() {
    let store = MemoryStore::new();
    let alice = registry(Arc::new(store.clone()), Arc::new(FakeIdentity::signed_in("alice", "d1")));
    let bob = registry(Arc::new(store.clone()), Arc::new(FakeIdentity::signed_in("bob", "d2")));

    alice.save(&movie(42)).await.unwrap();
    alice.save(&movie(43)).await.unwrap();
    bob.save(&movie(42)).await.unwrap();

    assert_eq!(store.len(SAVED).await, 3);
    assert_eq!(alice.list().await.unwrap().len(), 2);
    assert_eq!(bob.list().await.unwrap().len(), 1);
    assert!(!bob.is_saved(43).await.unwrap());

    assert!(bob.remove(42).await.unwrap());
    assert!(alice.is_saved(42).await.unwrap());
    assert!(!bob.remove(43).await.unwrap());
    assert!(alice.is_saved(43).await.unwrap());
}

#[tokio::test]
async fn test_remove_missing_is_false() {
    let store = MemoryStore::new();
    let reg = registry(Arc::new(store), Arc::new(FakeIdentity::anonymous("dev")));
    assert!(!reg.remove(99).await.unwrap());
}

#[tokio::test]
async fn test_remove_then_not_saved() {
    let store = MemoryStore::new();
    let reg = registry(Arc::new(store.clone()), Arc::new(FakeIdentity::signed_in("alice", "dev")));
    reg.save(&movie(5)).await.unwrap();

    assert!(reg.remove(5).await.unwrap());
    assert!(!reg.is_saved(5).await.unwrap());
    assert!(store.is_empty(SAVED).await);
}

#[tokio::test]
async fn test_list_newest_first() {
    let store = MemoryStore::new();
    for (movie_id, created_at) in [(1, 1_000), (2, 3_000), (3, 2_000)] {
        store
            .create(
                SAVED,
                fields(json!({
                    "owner_id": "alice",
                    "movie_id": movie_id,
                    "title": format!("Movie {movie_id}"),
                    "poster_url": "",
                    "created_at": created_at
                })),
            )
            .await
            .unwrap();
    }
    let reg = registry(Arc::new(store), Arc::new(FakeIdentity::signed_in("alice", "dev")));

    let ids: Vec<i64> = reg.list().await.unwrap().iter().map(|i| i.movie_id).collect();
    assert_eq!(ids, vec![2, 3, 1]);
}

#[tokio::test]
async fn test_list_empty() {
    let reg = registry(Arc::new(MemoryStore::new()), Arc::new(FakeIdentity::anonymous("dev")));
    assert!(reg.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_identity_failure_blocks_every_operation() {
    let store = Arc::new(FailingStore::new(MemoryStore::new()));
    let reg = registry(Arc::clone(&store) as Arc<dyn RemoteStore>, Arc::new(FakeIdentity::broken("dev")));

    assert_eq!(reg.save(&movie(1)).await.unwrap_err().code(), "IDENTITY_UNAVAILABLE");
    assert_eq!(reg.remove(1).await.unwrap_err().code(), "IDENTITY_UNAVAILABLE");
    assert_eq!(reg.is_saved(1).await.unwrap_err().code(), "IDENTITY_UNAVAILABLE");
    assert_eq!(reg.list().await.unwrap_err().code(), "IDENTITY_UNAVAILABLE");
    assert_eq!(store.mutations(), 0);
}

#[tokio::test]
async fn test_is_saved_surfaces_store_failure() {
    let store = FailingStore::new(MemoryStore::new()).fail_queries();
    let reg = registry(Arc::new(store), Arc::new(FakeIdentity::signed_in("alice", "dev")));
    assert_eq!(reg.is_saved(1).await.unwrap_err().code(), "STORE_UNAVAILABLE");
    assert_eq!(reg.list().await.unwrap_err().code(), "STORE_UNAVAILABLE");
}

#[tokio::test]
async fn test_save_surfaces_create_failure() {
    let store = FailingStore::new(MemoryStore::new()).fail_creates();
    let reg = registry(Arc::new(store), Arc::new(FakeIdentity::signed_in("alice", "dev")));
    let err = reg.save(&movie(1)).await.unwrap_err();
    assert_eq!(err.code(), "STORE_UNAVAILABLE");
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_remove_surfaces_delete_failure() {
    let inner = MemoryStore::new();
    let seeding = registry(Arc::new(inner.clone()), Arc::new(FakeIdentity::signed_in("alice", "dev")));
    seeding.save(&movie(8)).await.unwrap();

    let failing = FailingStore::new(inner.clone()).fail_deletes();
    let reg = registry(Arc::new(failing), Arc::new(FakeIdentity::signed_in("alice", "dev")));
    assert_eq!(reg.remove(8).await.unwrap_err().code(), "STORE_UNAVAILABLE");
    assert_eq!(inner.len(SAVED).await, 1);
}

#[tokio::test]
async fn test_malformed_row_fails_loudly() {
    let store = MemoryStore::new();
    store.create(SAVED, fields(json!({ "owner_id": "alice", "movie_id": 3 }))).await.unwrap();
    let reg = registry(Arc::new(store), Arc::new(FakeIdentity::signed_in("alice", "dev")));

    assert_eq!(reg.is_saved(3).await.unwrap_err().code(), "STORE_UNAVAILABLE");
}
