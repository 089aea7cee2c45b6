//! PIN authentication use-case service.
//!
//! # Responsibility
//! - Drive the setup/confirmation/entry state machine over a secret store.
//! - Translate adapter faults into the PIN error taxonomy.
//!
//! # Invariants
//! - Format validation always runs before any store access.
//! - The stored PIN is fetched per verification and never cached.
//! - A confirmation mismatch restarts setup; it never re-confirms against a
//!   stale pending value.

use crate::model::auth::{AuthPhase, AuthSession};
use crate::store::{SecretStore, StoreError, PIN_SLOT_KEY};
use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use tokio::sync::Mutex;

static PIN_FORMAT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4,10}$").expect("valid pin format regex"));

/// PIN state machine failure taxonomy.
///
/// All variants are recoverable; the caller re-prompts and retries.
#[derive(Debug)]
pub enum PinError {
    /// Submitted code is not 4..=10 digits.
    InvalidFormat,
    /// Confirmation did not match the staged setup choice.
    Mismatch,
    /// Entered code does not match the stored PIN record.
    Incorrect,
    /// Secret store read/write failed; phase is unchanged, retry is safe.
    Persistence(StoreError),
}

impl Display for PinError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFormat => write!(f, "pin must be 4 to 10 digits"),
            Self::Mismatch => write!(f, "pin confirmation does not match"),
            Self::Incorrect => write!(f, "pin is incorrect"),
            Self::Persistence(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PinError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Persistence(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for PinError {
    fn from(value: StoreError) -> Self {
        Self::Persistence(value)
    }
}

/// PIN gate service over a secret store implementation.
pub struct PinService<S: SecretStore> {
    store: S,
    session: Mutex<AuthSession>,
}

impl<S: SecretStore> PinService<S> {
    /// Creates a service in the `Uninitialized` phase.
    pub fn new(store: S) -> Self {
        Self {
            store,
            session: Mutex::new(AuthSession::new()),
        }
    }

    /// Derives the starting phase from whether a PIN record exists.
    ///
    /// Idempotent once the session left `Uninitialized`. On a store fault the
    /// phase stays `Uninitialized` so a later call can retry.
    ///
    /// # Errors
    /// - `PinError::Persistence` when the secret store probe fails.
    pub async fn resume(&self) -> Result<AuthPhase, PinError> {
        let mut session = self.session.lock().await;
        if session.phase() != AuthPhase::Uninitialized {
            return Ok(session.phase());
        }
        Self::probe_record(&self.store, &mut session).await
    }

    /// Handles one PIN submission in the current phase.
    ///
    /// The input is trimmed, then format-checked before any store access; an
    /// ill-formed code fails with `InvalidFormat` in every phase and leaves
    /// the phase unchanged. Returns the phase reached by a successful
    /// submission.
    ///
    /// # Errors
    /// - `PinError::InvalidFormat` for codes that are not 4..=10 digits.
    /// - `PinError::Mismatch` when confirmation restarts setup.
    /// - `PinError::Incorrect` on a failed entry attempt.
    /// - `PinError::Persistence` on store faults; the submission may be
    ///   retried in the same phase.
    pub async fn submit(&self, code: &str) -> Result<AuthPhase, PinError> {
        let code = code.trim();
        if !PIN_FORMAT_RE.is_match(code) {
            warn!("event=pin_submit module=auth status=rejected reason=invalid_format");
            return Err(PinError::InvalidFormat);
        }

        let mut session = self.session.lock().await;
        if session.phase() == AuthPhase::Uninitialized {
            Self::probe_record(&self.store, &mut session).await?;
        }

        match session.phase() {
            AuthPhase::AwaitingSetup => {
                session.stage_for_confirmation(code.to_string());
                info!("event=pin_setup module=auth status=staged");
                Ok(AuthPhase::AwaitingConfirmation)
            }
            AuthPhase::AwaitingConfirmation => {
                if !session.pending_matches(code) {
                    session.restart_setup();
                    warn!("event=pin_confirm module=auth status=mismatch");
                    return Err(PinError::Mismatch);
                }
                // Pending stays staged on a store fault so the caller can
                // retry the confirmation without restarting setup.
                self.store.set(PIN_SLOT_KEY, code).await.map_err(|err| {
                    warn!("event=pin_confirm module=auth status=error error={err}");
                    PinError::Persistence(err)
                })?;
                session.authenticate();
                info!("event=pin_confirm module=auth status=ok");
                Ok(AuthPhase::Authenticated)
            }
            AuthPhase::AwaitingEntry => {
                let stored = self.store.get(PIN_SLOT_KEY).await.map_err(|err| {
                    warn!("event=pin_entry module=auth status=error error={err}");
                    PinError::Persistence(err)
                })?;
                match stored {
                    Some(record) if record == code => {
                        session.authenticate();
                        info!("event=pin_entry module=auth status=ok");
                        Ok(AuthPhase::Authenticated)
                    }
                    _ => {
                        warn!("event=pin_entry module=auth status=incorrect");
                        Err(PinError::Incorrect)
                    }
                }
            }
            AuthPhase::Authenticated => Ok(AuthPhase::Authenticated),
            // probe_record above never leaves the session Uninitialized on Ok.
            AuthPhase::Uninitialized => unreachable!("session probed before dispatch"),
        }
    }

    /// Current phase.
    pub async fn phase(&self) -> AuthPhase {
        self.session.lock().await.phase()
    }

    /// Whether the session reached `Authenticated`.
    pub async fn is_unlocked(&self) -> bool {
        self.phase().await == AuthPhase::Authenticated
    }

    async fn probe_record(
        store: &S,
        session: &mut AuthSession,
    ) -> Result<AuthPhase, PinError> {
        let record = store.get(PIN_SLOT_KEY).await.map_err(|err| {
            warn!("event=pin_resume module=auth status=error error={err}");
            PinError::Persistence(err)
        })?;
        session.resolve_probe(record.is_some());
        info!(
            "event=pin_resume module=auth status=ok has_record={}",
            record.is_some()
        );
        Ok(session.phase())
    }
}

#[cfg(test)]
mod tests {
    use super::PIN_FORMAT_RE;

    #[test]
    fn format_accepts_four_to_ten_digits() {
        assert!(PIN_FORMAT_RE.is_match("1234"));
        assert!(PIN_FORMAT_RE.is_match("0123456789"));
    }

    #[test]
    fn format_rejects_short_long_and_non_digit_codes() {
        assert!(!PIN_FORMAT_RE.is_match("123"));
        assert!(!PIN_FORMAT_RE.is_match("01234567890"));
        assert!(!PIN_FORMAT_RE.is_match("12a4"));
        assert!(!PIN_FORMAT_RE.is_match(""));
        assert!(!PIN_FORMAT_RE.is_match("12 34"));
    }
}
