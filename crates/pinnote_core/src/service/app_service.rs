//! Application facade composing the PIN gate and the note collection.
//!
//! # Responsibility
//! - Route PIN submissions and expose the current phase.
//! - Forward note operations only while the session is unlocked.
//!
//! # Invariants
//! - No note operation reaches the note service before the session is
//!   `Authenticated`.
//! - The collection is hydrated from storage on the submission that unlocks
//!   the session; a corrupt slot degrades to an empty collection instead of
//!   blocking the unlock.

use crate::model::auth::AuthPhase;
use crate::model::note::Note;
use crate::service::note_service::{NoteError, NoteService};
use crate::service::pin_service::{PinError, PinService};
use crate::store::{BackupChannel, NoteStore, SecretStore};
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Facade-level failure taxonomy.
#[derive(Debug)]
pub enum AppError {
    /// A note operation was attempted before the session unlocked.
    Locked,
    /// PIN state machine failure.
    Pin(PinError),
    /// Note persistence or backup failure.
    Note(NoteError),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Locked => write!(f, "session is locked; unlock with the pin first"),
            Self::Pin(err) => write!(f, "{err}"),
            Self::Note(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Locked => None,
            Self::Pin(err) => Some(err),
            Self::Note(err) => Some(err),
        }
    }
}

impl From<PinError> for AppError {
    fn from(value: PinError) -> Self {
        Self::Pin(value)
    }
}

impl From<NoteError> for AppError {
    fn from(value: NoteError) -> Self {
        Self::Note(value)
    }
}

/// Composition root for one device user session.
pub struct AppService<S, N, B>
where
    S: SecretStore,
    N: NoteStore,
    B: BackupChannel,
{
    pin: PinService<S>,
    notes: NoteService<N, B>,
}

impl<S, N, B> AppService<S, N, B>
where
    S: SecretStore,
    N: NoteStore,
    B: BackupChannel,
{
    /// Wires the PIN gate and the note collection over their adapters.
    pub fn new(secret_store: S, note_store: N, backup: B) -> Self {
        Self {
            pin: PinService::new(secret_store),
            notes: NoteService::new(note_store, backup),
        }
    }

    /// Derives the starting phase from stored state.
    ///
    /// # Errors
    /// - `AppError::Pin` when the secret store probe fails.
    pub async fn resume(&self) -> Result<AuthPhase, AppError> {
        Ok(self.pin.resume().await?)
    }

    /// Submits a PIN code; hydrates the note collection when this submission
    /// unlocks the session.
    ///
    /// # Errors
    /// - `AppError::Pin` for state machine and secret store failures.
    pub async fn submit_pin(&self, code: &str) -> Result<AuthPhase, AppError> {
        let was_unlocked = self.pin.is_unlocked().await;
        let phase = self.pin.submit(code).await?;
        if phase == AuthPhase::Authenticated && !was_unlocked {
            // A corrupt or unreadable slot must not re-lock the session; the
            // user continues on an empty collection and the fault is logged.
            if let Err(err) = self.notes.load().await {
                warn!("event=app_unlock module=app status=degraded error={err}");
            }
        }
        Ok(phase)
    }

    /// Current authentication phase.
    pub async fn phase(&self) -> AuthPhase {
        self.pin.phase().await
    }

    /// Adds a note. Requires an unlocked session.
    ///
    /// # Errors
    /// - `AppError::Locked` before authentication.
    /// - `AppError::Note` on persistence failure.
    pub async fn add_note(&self, text: &str) -> Result<Option<Note>, AppError> {
        self.guard().await?;
        Ok(self.notes.add(text).await?)
    }

    /// Lists notes, newest first. Requires an unlocked session.
    pub async fn list_notes(&self) -> Result<Vec<Note>, AppError> {
        self.guard().await?;
        Ok(self.notes.list().await)
    }

    /// Clears all notes after caller-side confirmation. Requires an unlocked
    /// session.
    pub async fn clear_notes(&self, confirmed: bool) -> Result<bool, AppError> {
        self.guard().await?;
        Ok(self.notes.clear(confirmed).await?)
    }

    /// Exports the backup snapshot. Requires an unlocked session.
    pub async fn export_backup(&self) -> Result<(), AppError> {
        self.guard().await?;
        Ok(self.notes.export_backup().await?)
    }

    /// Reads the backup snapshot. Requires an unlocked session.
    pub async fn read_backup(&self) -> Result<Vec<Note>, AppError> {
        self.guard().await?;
        Ok(self.notes.read_backup().await?)
    }

    async fn guard(&self) -> Result<(), AppError> {
        if self.pin.is_unlocked().await {
            Ok(())
        } else {
            warn!("event=note_op module=app status=rejected reason=locked");
            Err(AppError::Locked)
        }
    }
}
