//! Core domain logic for PinNote, a PIN-gated local note keeper.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::auth::{AuthPhase, AuthSession};
pub use model::note::{Note, NoteId};
pub use service::app_service::{AppError, AppService};
pub use service::note_service::{NoteError, NoteService};
pub use service::pin_service::{PinError, PinService};
pub use store::fs::FsBackupChannel;
pub use store::memory::{MemoryBackupChannel, MemorySlotStore};
pub use store::sqlite::SqliteSlotStore;
pub use store::{
    BackupChannel, NoteStore, SecretStore, StoreError, StoreResult, BACKUP_FILE_NAME,
    NOTES_SLOT_KEY, PIN_SLOT_KEY,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
