//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store adapters into use-case level APIs.
//! - Keep UI layers decoupled from storage and serialization details.
//!
//! # Invariants
//! - Each service serializes its own operations; store I/O never interleaves
//!   with another mutation on the same service.

pub mod app_service;
pub mod note_service;
pub mod pin_service;
