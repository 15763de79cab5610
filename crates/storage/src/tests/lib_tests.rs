use super::*;

#[tokio::test]
async fn missing_key_reads_as_none() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let value = storage.get("students").await.expect("get");
    assert!(value.is_none());
}

#[tokio::test]
async fn set_then_get_returns_latest_value() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage.set("students", "[]").await.expect("first set");
    storage
        .set("students", r#"[{"id":1}]"#)
        .await
        .expect("second set");
    let value = storage.get("students").await.expect("get");
    assert_eq!(value.as_deref(), Some(r#"[{"id":1}]"#));
}

#[tokio::test]
async fn keys_are_independent() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage.set("students", "a").await.expect("set students");
    storage.set("settings", "b").await.expect("set settings");
    assert_eq!(
        storage.get("students").await.expect("get").as_deref(),
        Some("a")
    );
    assert_eq!(
        storage.get("settings").await.expect("get").as_deref(),
        Some("b")
    );
}

#[tokio::test]
async fn health_check_succeeds_for_live_pool() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage.health_check().await.expect("health check");
}

#[tokio::test]
async fn memory_store_seeded_value_is_visible() {
    let store = MemoryStore::with_value("students", "[]");
    assert_eq!(store.get("students").await.expect("get").as_deref(), Some("[]"));
    assert!(store.get("other").await.expect("get").is_none());
}

#[tokio::test]
async fn arc_wrapped_store_delegates() {
    let store: std::sync::Arc<dyn KeyValueStore> = std::sync::Arc::new(MemoryStore::new());
    store.set("k", "v").await.expect("set");
    assert_eq!(store.get("k").await.expect("get").as_deref(), Some("v"));
}

#[test]
fn sqlite_path_skips_memory_and_strips_query() {
    assert!(sqlite_path("sqlite::memory:").is_none());
    assert!(sqlite_path("postgres://localhost/db").is_none());
    assert_eq!(
        sqlite_path("sqlite://./data/app.db?mode=rwc"),
        Some(PathBuf::from("./data/app.db"))
    );
}
