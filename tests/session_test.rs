mod common;

use spotilink::{Error, management::SessionStore, types::Session};
use tempfile::TempDir;

#[tokio::test]
async fn test_missing_file_loads_empty_session() {
    let dir = TempDir::new().unwrap();
    let store = SessionStore::load_from(dir.path().join("session.json"))
        .await
        .unwrap();

    assert_eq!(store.session(), &Session::default());
    assert!(!store.is_authenticated());
    assert_eq!(store.token(), None);
    assert_eq!(store.user(), None);
}

#[test]
fn test_is_authenticated_follows_token() {
    let dir = TempDir::new().unwrap();
    let mut store = SessionStore::new(dir.path().join("session.json"));
    assert!(!store.is_authenticated());

    store.set_token("");
    assert!(!store.is_authenticated());

    // A token alone is enough, the profile may still be on its way
    store.set_token("access-123");
    assert!(store.is_authenticated());
    assert_eq!(store.user(), None);

    store.set_user(common::user());
    assert!(store.is_authenticated());

    store.clear();
    assert!(!store.is_authenticated());
    assert_eq!(store.user(), None);
}

#[test]
fn test_last_token_wins() {
    let dir = TempDir::new().unwrap();
    let mut store = SessionStore::new(dir.path().join("session.json"));

    store.set_token("first");
    store.set_token("second");

    assert_eq!(store.token(), Some("second"));
}

#[tokio::test]
async fn test_persist_and_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("session.json");

    let mut store = SessionStore::new(path.clone());
    store.set_token("access-123");
    store.set_user(common::user());
    store.persist().await.unwrap();

    let reloaded = SessionStore::load_from(path).await.unwrap();
    assert_eq!(reloaded.session(), store.session());
    assert!(reloaded.is_authenticated());
}

#[tokio::test]
async fn test_forget_removes_file_and_tolerates_absence() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");

    let mut store = SessionStore::new(path.clone());
    store.set_token("access-123");
    store.persist().await.unwrap();
    assert!(path.exists());

    store.forget().await.unwrap();
    assert!(!path.exists());

    store.forget().await.unwrap();
}

#[tokio::test]
async fn test_corrupt_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = SessionStore::load_from(path).await.unwrap_err();
    assert!(matches!(err, Error::Serde(_)));
}

#[tokio::test]
async fn test_corrupt_file_can_be_reset() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, r#"{"token":"abc","user":{"display_na"#).unwrap();

    let store = SessionStore::load_or_reset_from(path.clone()).await;

    assert_eq!(store.session(), &Session::default());
    assert_eq!(store.path(), &path);
}

#[tokio::test]
async fn test_persist_replaces_previous_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "{ not json").unwrap();

    let mut store = SessionStore::new(path.clone());
    store.set_token("access-123");
    store.persist().await.unwrap();

    let reloaded = SessionStore::load_from(path).await.unwrap();
    assert_eq!(reloaded.token(), Some("access-123"));
    assert!(!dir.path().join("session.json.tmp").exists());
}
