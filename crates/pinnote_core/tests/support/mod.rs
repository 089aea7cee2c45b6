//! Shared test doubles for adapter fault injection.

use async_trait::async_trait;
use pinnote_core::{MemorySlotStore, NoteStore, SecretStore, StoreError, StoreResult};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Slot store whose reads/writes can be switched to fail on demand.
#[derive(Clone, Default)]
pub struct FlakySlotStore {
    inner: MemorySlotStore,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
}

impl FlakySlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_reads(&self, on: bool) {
        self.fail_reads.store(on, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, on: bool) {
        self.fail_writes.store(on, Ordering::SeqCst);
    }

    fn check_read(&self) -> StoreResult<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            Err(StoreError::Backend("injected read failure".to_string()))
        } else {
            Ok(())
        }
    }

    fn check_write(&self) -> StoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(StoreError::Backend("injected write failure".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl SecretStore for FlakySlotStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.check_read()?;
        SecretStore::get(&self.inner, key).await
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.check_write()?;
        SecretStore::set(&self.inner, key, value).await
    }
}

#[async_trait]
impl NoteStore for FlakySlotStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.check_read()?;
        NoteStore::get(&self.inner, key).await
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.check_write()?;
        NoteStore::set(&self.inner, key, value).await
    }
}
