//! Domain model for the PIN-gated note core.
//!
//! # Responsibility
//! - Define the canonical note record and the authentication session state.
//! - Keep model shapes independent from storage and service orchestration.
//!
//! # Invariants
//! - Every note is identified by a stable, creation-ordered `NoteId`.
//! - The authentication session holds no secret beyond an in-flight setup
//!   confirmation.

pub mod auth;
pub mod note;
