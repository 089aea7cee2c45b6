//! In-memory adapter implementations.
//!
//! # Responsibility
//! - Provide process-local slot and backup implementations for tests and
//!   ephemeral sessions.
//!
//! # Invariants
//! - Clones share the same underlying map, so one store instance can back
//!   several services.

use crate::store::{BackupChannel, NoteStore, SecretStore, StoreResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// HashMap-backed slot store implementing both slot traits.
#[derive(Debug, Clone, Default)]
pub struct MemorySlotStore {
    slots: Arc<Mutex<HashMap<String, String>>>,
}

impl MemorySlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read_slot(&self, key: &str) -> Option<String> {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn write_slot(&self, key: &str, value: &str) {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
    }
}

#[async_trait]
impl SecretStore for MemorySlotStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.read_slot(key))
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.write_slot(key, value);
        Ok(())
    }
}

#[async_trait]
impl NoteStore for MemorySlotStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.read_slot(key))
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.write_slot(key, value);
        Ok(())
    }
}

/// HashMap-backed backup channel.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackupChannel {
    files: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryBackupChannel {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BackupChannel for MemoryBackupChannel {
    async fn write(&self, name: &str, content: &str) -> StoreResult<()> {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string(), content.to_string());
        Ok(())
    }

    async fn read(&self, name: &str) -> StoreResult<Option<String>> {
        Ok(self
            .files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned())
    }
}
