//! Note collection use-case service.
//!
//! # Responsibility
//! - Own the in-memory note collection and keep it reconciled with the
//!   durable notes slot after every mutation.
//! - Export and read the named JSON backup snapshot.
//!
//! # Invariants
//! - The collection is newest-first by insertion.
//! - Mutations persist the whole collection in one write before the
//!   in-memory state is committed; on a store fault memory keeps the
//!   pre-call state.
//! - Backups never mutate the live collection.

use crate::model::note::Note;
use crate::store::{BackupChannel, NoteStore, StoreError, BACKUP_FILE_NAME, NOTES_SLOT_KEY};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use tokio::sync::Mutex;

/// Note persistence and backup failure taxonomy.
#[derive(Debug)]
pub enum NoteError {
    /// Stored collection exists but is not decodable; memory was reset to
    /// an empty collection.
    CorruptState(serde_json::Error),
    /// Notes slot read/write failed; the in-memory collection is unchanged.
    Persistence(StoreError),
    /// Backup export failed; the live collection is unchanged.
    BackupWrite(StoreError),
    /// No backup exists under the well-known name.
    BackupNotFound,
    /// A backup exists but its payload is not decodable.
    BackupCorrupt(serde_json::Error),
}

impl Display for NoteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CorruptState(err) => write!(f, "stored note collection is corrupt: {err}"),
            Self::Persistence(err) => write!(f, "{err}"),
            Self::BackupWrite(err) => write!(f, "backup write failed: {err}"),
            Self::BackupNotFound => write!(f, "no backup named `{BACKUP_FILE_NAME}` exists"),
            Self::BackupCorrupt(err) => write!(f, "backup payload is corrupt: {err}"),
        }
    }
}

impl Error for NoteError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CorruptState(err) | Self::BackupCorrupt(err) => Some(err),
            Self::Persistence(err) | Self::BackupWrite(err) => Some(err),
            Self::BackupNotFound => None,
        }
    }
}

impl From<StoreError> for NoteError {
    fn from(value: StoreError) -> Self {
        Self::Persistence(value)
    }
}

/// Note collection service over a notes slot and a backup channel.
pub struct NoteService<N: NoteStore, B: BackupChannel> {
    store: N,
    backup: B,
    notes: Mutex<Vec<Note>>,
}

impl<N: NoteStore, B: BackupChannel> NoteService<N, B> {
    /// Creates a service with an empty in-memory collection.
    ///
    /// Call [`NoteService::load`] to hydrate from the durable slot.
    pub fn new(store: N, backup: B) -> Self {
        Self {
            store,
            backup,
            notes: Mutex::new(Vec::new()),
        }
    }

    /// Hydrates the collection from the notes slot.
    ///
    /// A missing slot yields an empty collection. A malformed slot resets
    /// memory to empty and reports `CorruptState`, so the caller can keep
    /// running on a fresh collection instead of crashing.
    ///
    /// # Errors
    /// - `NoteError::CorruptState` when stored JSON is undecodable.
    /// - `NoteError::Persistence` on a slot read fault; memory is untouched.
    pub async fn load(&self) -> Result<usize, NoteError> {
        let mut notes = self.notes.lock().await;
        let raw = self.store.get(NOTES_SLOT_KEY).await.map_err(|err| {
            warn!("event=notes_load module=notes status=error error={err}");
            NoteError::Persistence(err)
        })?;

        let Some(raw) = raw else {
            notes.clear();
            info!("event=notes_load module=notes status=ok count=0 source=empty");
            return Ok(0);
        };

        match serde_json::from_str::<Vec<Note>>(&raw) {
            Ok(loaded) => {
                let count = loaded.len();
                *notes = loaded;
                info!("event=notes_load module=notes status=ok count={count}");
                Ok(count)
            }
            Err(err) => {
                notes.clear();
                warn!("event=notes_load module=notes status=corrupt error={err}");
                Err(NoteError::CorruptState(err))
            }
        }
    }

    /// Adds a note built from `text`, newest first.
    ///
    /// Blank input (empty after trimming) is a no-op returning `Ok(None)`.
    /// The whole collection is persisted before the mutation is committed;
    /// on a store fault the in-memory collection keeps its pre-call state.
    ///
    /// # Errors
    /// - `NoteError::Persistence` when the slot write fails.
    pub async fn add(&self, text: &str) -> Result<Option<Note>, NoteError> {
        let Some(note) = Note::from_input(text) else {
            return Ok(None);
        };

        let mut notes = self.notes.lock().await;
        let mut candidate = Vec::with_capacity(notes.len() + 1);
        candidate.push(note.clone());
        candidate.extend(notes.iter().cloned());

        self.persist(&candidate).await?;
        *notes = candidate;
        info!(
            "event=note_add module=notes status=ok count={}",
            notes.len()
        );
        Ok(Some(note))
    }

    /// Clears the collection. Destructive; the caller must confirm first.
    ///
    /// Returns `Ok(false)` without touching anything when `confirmed` is
    /// false.
    ///
    /// # Errors
    /// - `NoteError::Persistence` when the slot write fails; the collection
    ///   is unchanged.
    pub async fn clear(&self, confirmed: bool) -> Result<bool, NoteError> {
        if !confirmed {
            return Ok(false);
        }

        let mut notes = self.notes.lock().await;
        self.persist(&[]).await?;
        notes.clear();
        info!("event=notes_clear module=notes status=ok");
        Ok(true)
    }

    /// Snapshot of the in-memory collection, newest first.
    pub async fn list(&self) -> Vec<Note> {
        self.notes.lock().await.clone()
    }

    /// Writes the current collection as a JSON backup under the well-known
    /// name, overwriting any previous backup. Never mutates the collection.
    ///
    /// # Errors
    /// - `NoteError::BackupWrite` on a channel fault.
    pub async fn export_backup(&self) -> Result<(), NoteError> {
        let notes = self.notes.lock().await;
        let payload = encode(&notes)?;
        self.backup
            .write(BACKUP_FILE_NAME, &payload)
            .await
            .map_err(|err| {
                warn!("event=backup_export module=notes status=error error={err}");
                NoteError::BackupWrite(err)
            })?;
        info!(
            "event=backup_export module=notes status=ok count={}",
            notes.len()
        );
        Ok(())
    }

    /// Reads and decodes the backup under the well-known name.
    ///
    /// Returns the decoded snapshot for inspection; importing it into the
    /// live collection is left to the caller.
    ///
    /// # Errors
    /// - `NoteError::BackupNotFound` when no backup exists.
    /// - `NoteError::BackupCorrupt` when the payload is undecodable.
    /// - `NoteError::Persistence` on a channel read fault.
    pub async fn read_backup(&self) -> Result<Vec<Note>, NoteError> {
        let raw = self
            .backup
            .read(BACKUP_FILE_NAME)
            .await
            .map_err(NoteError::Persistence)?
            .ok_or(NoteError::BackupNotFound)?;
        let snapshot = serde_json::from_str::<Vec<Note>>(&raw).map_err(|err| {
            warn!("event=backup_read module=notes status=corrupt error={err}");
            NoteError::BackupCorrupt(err)
        })?;
        info!(
            "event=backup_read module=notes status=ok count={}",
            snapshot.len()
        );
        Ok(snapshot)
    }

    async fn persist(&self, notes: &[Note]) -> Result<(), NoteError> {
        let payload = encode(notes)?;
        self.store
            .set(NOTES_SLOT_KEY, &payload)
            .await
            .map_err(|err| {
                warn!("event=notes_persist module=notes status=error error={err}");
                NoteError::Persistence(err)
            })
    }
}

fn encode(notes: &[Note]) -> Result<String, NoteError> {
    serde_json::to_string(notes)
        .map_err(|err| NoteError::Persistence(StoreError::Backend(err.to_string())))
}
