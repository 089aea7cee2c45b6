//! Authentication session model.
//!
//! # Responsibility
//! - Define the PIN state machine phases and the transient session record.
//! - Provide lifecycle helpers so services never poke phase/pending fields
//!   independently.
//!
//! # Invariants
//! - `pending_pin` is only populated while the phase is
//!   `AwaitingConfirmation`.
//! - The session never holds the stored PIN; it is fetched per verification.

/// Current step of the PIN authentication state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPhase {
    /// Session exists but has not probed the secret store yet.
    Uninitialized,
    /// No PIN record exists; waiting for the first PIN choice.
    AwaitingSetup,
    /// First PIN choice staged; waiting for the confirming re-entry.
    AwaitingConfirmation,
    /// A PIN record exists; waiting for the unlocking entry.
    AwaitingEntry,
    /// Unlocked. Terminal for this session.
    Authenticated,
}

/// Transient in-memory authentication state.
///
/// Reset on process restart; the phase is re-derived from whether a PIN
/// record exists in the secret store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    phase: AuthPhase,
    pending_pin: Option<String>,
}

impl AuthSession {
    /// Creates a session that has not probed storage yet.
    pub fn new() -> Self {
        Self {
            phase: AuthPhase::Uninitialized,
            pending_pin: None,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> AuthPhase {
        self.phase
    }

    /// Resolves the initial probe: a stored PIN means entry, none means setup.
    pub fn resolve_probe(&mut self, has_pin_record: bool) {
        self.phase = if has_pin_record {
            AuthPhase::AwaitingEntry
        } else {
            AuthPhase::AwaitingSetup
        };
        self.pending_pin = None;
    }

    /// Stages a first PIN choice and moves to confirmation.
    pub fn stage_for_confirmation(&mut self, code: String) {
        self.pending_pin = Some(code);
        self.phase = AuthPhase::AwaitingConfirmation;
    }

    /// Returns whether `code` matches the staged PIN choice.
    pub fn pending_matches(&self, code: &str) -> bool {
        self.pending_pin.as_deref() == Some(code)
    }

    /// Drops the staged choice and restarts setup from scratch.
    ///
    /// Used on confirmation mismatch, so a later confirmation can never run
    /// against a stale pending value.
    pub fn restart_setup(&mut self) {
        self.pending_pin = None;
        self.phase = AuthPhase::AwaitingSetup;
    }

    /// Marks the session unlocked and clears any staged secret.
    pub fn authenticate(&mut self) {
        self.pending_pin = None;
        self.phase = AuthPhase::Authenticated;
    }
}

impl Default for AuthSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{AuthPhase, AuthSession};

    #[test]
    fn probe_resolution_depends_on_record_presence() {
        let mut with_record = AuthSession::new();
        with_record.resolve_probe(true);
        assert_eq!(with_record.phase(), AuthPhase::AwaitingEntry);

        let mut without_record = AuthSession::new();
        without_record.resolve_probe(false);
        assert_eq!(without_record.phase(), AuthPhase::AwaitingSetup);
    }

    #[test]
    fn restart_setup_discards_staged_pin() {
        let mut session = AuthSession::new();
        session.resolve_probe(false);
        session.stage_for_confirmation("1234".to_string());
        assert!(session.pending_matches("1234"));

        session.restart_setup();
        assert_eq!(session.phase(), AuthPhase::AwaitingSetup);
        assert!(!session.pending_matches("1234"));
    }

    #[test]
    fn authenticate_clears_staged_pin() {
        let mut session = AuthSession::new();
        session.resolve_probe(false);
        session.stage_for_confirmation("4242".to_string());
        session.authenticate();
        assert_eq!(session.phase(), AuthPhase::Authenticated);
        assert!(!session.pending_matches("4242"));
    }
}
