//! Storage adapter contracts for the PIN slot, the notes slot, and the
//! backup channel.
//!
//! # Responsibility
//! - Define the async key/value seams the services depend on.
//! - Pin the well-known slot keys and the backup file name.
//!
//! # Invariants
//! - Adapters are opaque transports: they never interpret slot contents.
//! - `get`/`read` report absence as `None`, never as an error, so the
//!   service layer can distinguish "missing" from "broken".

use async_trait::async_trait;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod fs;
pub mod memory;
pub mod sqlite;

/// Slot key holding the PIN record.
pub const PIN_SLOT_KEY: &str = "user_pin";
/// Slot key holding the serialized note collection.
pub const NOTES_SLOT_KEY: &str = "notes";
/// Well-known backup file name, overwritten on every export.
pub const BACKUP_FILE_NAME: &str = "notes-backup.json";

pub type StoreResult<T> = Result<T, StoreError>;

/// Transport-level adapter failure.
///
/// Deliberately backend-agnostic: services translate this into their own
/// error taxonomy and callers retry, so the payload is diagnostic only.
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Backend(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "store i/o failure: {err}"),
            Self::Backend(message) => write!(f, "store backend failure: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Backend(_) => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Secure single-secret slot (conceptually a keychain entry).
///
/// Holds the PIN record under [`PIN_SLOT_KEY`]. Implementations decide how
/// the value is protected at rest; the core only requires exact round-trip
/// of the stored string.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Reads the secret, `None` when no record exists.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Writes the secret, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> StoreResult<()>;
}

/// Durable slot for the serialized note collection.
///
/// Holds JSON text under [`NOTES_SLOT_KEY`]. The whole collection is always
/// written in a single `set`, so readers never observe a partial write.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Reads the serialized collection, `None` when nothing was stored yet.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Replaces the serialized collection.
    async fn set(&self, key: &str, value: &str) -> StoreResult<()>;
}

/// Named-file channel for backup payloads.
#[async_trait]
pub trait BackupChannel: Send + Sync {
    /// Writes `content` under `name`, overwriting any previous backup.
    async fn write(&self, name: &str, content: &str) -> StoreResult<()>;

    /// Reads the backup under `name`, `None` when it does not exist.
    async fn read(&self, name: &str) -> StoreResult<Option<String>>;
}
