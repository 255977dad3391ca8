use storage::repository::{StateSlotRepository, Storage};
use storage::sqlite::SqliteRepository;

#[tokio::test]
async fn sqlite_slot_round_trips_and_overwrites() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_slots?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    assert_eq!(repo.get("statev2").await.unwrap(), None);

    repo.put("statev2", r#"{"userList":{"handles":["tourist"]}}"#)
        .await
        .unwrap();
    repo.put("statev2", r#"{"userList":{"handles":["Petr"]}}"#)
        .await
        .unwrap();
    assert_eq!(
        repo.get("statev2").await.unwrap().as_deref(),
        Some(r#"{"userList":{"handles":["Petr"]}}"#)
    );

    repo.remove("statev2").await.unwrap();
    assert_eq!(repo.get("statev2").await.unwrap(), None);
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_migrate_twice?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("first migrate");
    repo.put("k", "v").await.unwrap();
    repo.migrate().await.expect("second migrate");
    assert_eq!(repo.get("k").await.unwrap().as_deref(), Some("v"));
}

#[tokio::test]
async fn storage_sqlite_exposes_slots() {
    let storage = Storage::sqlite("sqlite:file:memdb_storage_slots?mode=memory&cache=shared")
        .await
        .expect("storage");
    storage.slots.put("a", "1").await.unwrap();
    storage.slots.put("b", "2").await.unwrap();
    assert_eq!(storage.slots.get("a").await.unwrap().as_deref(), Some("1"));
    assert_eq!(storage.slots.get("b").await.unwrap().as_deref(), Some("2"));
}
