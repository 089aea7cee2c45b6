use pinnote_core::{
    BackupChannel, FsBackupChannel, MemoryBackupChannel, MemorySlotStore, NoteError, NoteService,
    BACKUP_FILE_NAME,
};

#[tokio::test]
async fn export_then_read_round_trips_the_snapshot() {
    let backup = MemoryBackupChannel::new();
    let service = NoteService::new(MemorySlotStore::new(), backup);
    service.add("first").await.unwrap();
    service.add("second").await.unwrap();

    let live = service.list().await;
    service.export_backup().await.unwrap();
    let snapshot = service.read_backup().await.unwrap();

    // Same ids, texts and order.
    assert_eq!(snapshot, live);
    // Export never mutates the live collection.
    assert_eq!(service.list().await, live);
}

#[tokio::test]
async fn reading_before_any_export_reports_not_found() {
    let service = NoteService::new(MemorySlotStore::new(), MemoryBackupChannel::new());
    let err = service.read_backup().await.unwrap_err();
    assert!(matches!(err, NoteError::BackupNotFound));
}

#[tokio::test]
async fn undecodable_backup_reports_corrupt() {
    let backup = MemoryBackupChannel::new();
    backup.write(BACKUP_FILE_NAME, "{oops").await.unwrap();

    let service = NoteService::new(MemorySlotStore::new(), backup);
    let err = service.read_backup().await.unwrap_err();
    assert!(matches!(err, NoteError::BackupCorrupt(_)));
}

#[tokio::test]
async fn re_export_overwrites_the_previous_backup() {
    let service = NoteService::new(MemorySlotStore::new(), MemoryBackupChannel::new());
    service.add("old state").await.unwrap();
    service.export_backup().await.unwrap();

    service.add("new state").await.unwrap();
    service.export_backup().await.unwrap();

    let snapshot = service.read_backup().await.unwrap();
    assert_eq!(snapshot, service.list().await);
    assert_eq!(snapshot.len(), 2);
}

#[tokio::test]
async fn fs_backup_round_trips_through_a_real_file() {
    let dir = tempfile::tempdir().unwrap();
    let service = NoteService::new(
        MemorySlotStore::new(),
        FsBackupChannel::new(dir.path()),
    );
    service.add("on disk").await.unwrap();
    service.export_backup().await.unwrap();

    let path = dir.path().join(BACKUP_FILE_NAME);
    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.starts_with('['), "expected a JSON array, got: {raw}");
    assert!(raw.contains("on disk"));

    let snapshot = service.read_backup().await.unwrap();
    assert_eq!(snapshot, service.list().await);
}

#[tokio::test]
async fn fs_backup_missing_file_reports_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let service = NoteService::new(
        MemorySlotStore::new(),
        FsBackupChannel::new(dir.path()),
    );
    let err = service.read_backup().await.unwrap_err();
    assert!(matches!(err, NoteError::BackupNotFound));
}
