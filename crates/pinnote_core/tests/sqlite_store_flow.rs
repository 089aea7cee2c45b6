use pinnote_core::db::open_db;
use pinnote_core::{
    AppService, AuthPhase, MemoryBackupChannel, SecretStore, SqliteSlotStore, PIN_SLOT_KEY,
};

fn sqlite_app(
    store: &SqliteSlotStore,
) -> AppService<SqliteSlotStore, SqliteSlotStore, MemoryBackupChannel> {
    AppService::new(store.clone(), store.clone(), MemoryBackupChannel::new())
}

#[tokio::test]
async fn slots_survive_closing_and_reopening_the_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("slots.db");

    {
        let store = SqliteSlotStore::new(open_db(&path).unwrap());
        SecretStore::set(&store, PIN_SLOT_KEY, "4242").await.unwrap();
    }

    let store = SqliteSlotStore::new(open_db(&path).unwrap());
    assert_eq!(
        SecretStore::get(&store, PIN_SLOT_KEY)
            .await
            .unwrap()
            .as_deref(),
        Some("4242")
    );
}

#[tokio::test]
async fn full_pin_and_note_flow_survives_a_restart_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pinnote.db");

    {
        let store = SqliteSlotStore::new(open_db(&path).unwrap());
        let app = sqlite_app(&store);
        assert_eq!(app.resume().await.unwrap(), AuthPhase::AwaitingSetup);
        app.submit_pin("2468").await.unwrap();
        app.submit_pin("2468").await.unwrap();
        app.add_note("durable note").await.unwrap();
    }

    // Restart: fresh connection, fresh services, same file.
    let store = SqliteSlotStore::new(open_db(&path).unwrap());
    let app = sqlite_app(&store);
    assert_eq!(app.resume().await.unwrap(), AuthPhase::AwaitingEntry);
    assert_eq!(
        app.submit_pin("2468").await.unwrap(),
        AuthPhase::Authenticated
    );

    let notes = app.list_notes().await.unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].text, "durable note");
}
