//! Controllers and the auth gate running entirely on local files.

use mockdesk_core::list::{ListConfig, ListController};
use mockdesk_core::{Authenticator, Credentials, Record, RecordId, Resource};
use mockdesk_file::{FileCollection, FileCredentialSource, FileStore};
use serde_json::json;
use tempfile::TempDir;

fn seed_users(api: &TempDir) {
    let users = FileCollection::new(api.path(), Resource::users());
    let records: Vec<Record> = ["Leanne Graham", "Ervin Howell", "Clementine Bauch"]
        .iter()
        .enumerate()
        .map(|(i, name)| {
            Record::new(json!({
                "id": i + 1,
                "name": name,
                "username": format!("user{}", i + 1),
                "email": format!("user{}@example.com", i + 1),
                "company": {"name": "Acme Corp"}
            }))
            .unwrap()
        })
        .collect();
    users.seed(&records).unwrap();
}

#[tokio::test]
async fn snapshot_survives_between_controllers() {
    let api = TempDir::new().unwrap();
    let data = TempDir::new().unwrap();
    seed_users(&api);

    let mut first = ListController::new(
        FileCollection::new(api.path(), Resource::users()),
        FileStore::new(data.path()),
        ListConfig::users(),
    );
    first.load().await;
    first.delete(RecordId::new(2).unwrap()).await.unwrap();

    // A fresh controller, as in the next CLI invocation, sees the cached
    // snapshot rather than refetching.
    let mut second = ListController::new(
        FileCollection::new(api.path(), Resource::users()),
        FileStore::new(data.path()),
        ListConfig::users(),
    );
    second.load().await;
    let ids: Vec<u64> = second
        .snapshot()
        .iter()
        .map(|r| r.id().unwrap().get())
        .collect();
    assert_eq!(ids, vec![1, 3]);
}

#[tokio::test]
async fn auth_flag_persists_in_file_store() {
    let api = TempDir::new().unwrap();
    let data = TempDir::new().unwrap();
    let source = FileCredentialSource::new(api.path());
    std::fs::write(
        source.path(),
        r#"[{"username": "emilys", "password": "emilyspass"}]"#,
    )
    .unwrap();

    let mut auth = Authenticator::new(source.clone(), FileStore::new(data.path()));
    auth.login(&Credentials::new("emilys", "emilyspass"))
        .await
        .unwrap();

    let mut restored = Authenticator::new(source, FileStore::new(data.path()));
    assert!(restored.restore().unwrap());
    restored.logout().unwrap();

    let store = FileStore::new(data.path());
    assert!(store.entries().unwrap().iter().all(|e| e.key != "auth"));
}
