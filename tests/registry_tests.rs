mod harness;

use serde_json::json;
use snippets::port::Storage;

use harness::temp_store::TempStore;

#[tokio::test]
async fn handles_for_one_path_share_state() {
    let db = TempStore::create("shared");

    let writer = db.storage();
    let reader = db.registry().open(db.dir().join("shared.sqlite")).unwrap();
    assert!(writer.shares_backend_with(&reader));

    writer
        .store_breadcrumb("s", "address", "adder", &json!("erd1adder"))
        .await
        .unwrap();
    assert_eq!(
        reader.load_breadcrumb("s", "adder").await.unwrap(),
        json!("erd1adder")
    );
}

#[tokio::test]
async fn destroy_through_registry_disables_every_handle() {
    let db = TempStore::create("teardown");
    let a = db.storage();
    let b = db.storage();

    assert!(db.registry().destroy(db.path()).await.unwrap());

    assert!(a.is_destroyed());
    assert!(b.is_destroyed());
    assert!(!db.path().exists());
    assert!(db.registry().is_empty());
}

#[tokio::test]
async fn session_destroy_is_seen_by_registry() {
    let db = TempStore::create("session-teardown");
    let session = db.session("s");
    session.save_token("reward", "RWD-0a1b2c").await.unwrap();

    session.destroy().await.unwrap();
    assert!(!db.path().exists());

    // The registry hands out a fresh store instead of the destroyed one.
    let fresh = db.storage();
    assert!(!fresh.is_destroyed());
    assert!(fresh.load_breadcrumb("s", "reward").await.unwrap_err().is_not_found());
}
