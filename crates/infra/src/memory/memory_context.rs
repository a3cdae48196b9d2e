use std::{
    collections::HashMap,
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use anyhow::{Result, anyhow};
use domain::entities::{
    shares::ShareEntity, subscriptions::SubscriptionEntity, users::UserEntity,
};
use uuid::Uuid;

/// Process-wide demo store. Every repository shares one context; all checks
/// that must not race (duplicate shares, capacity, the max_members floor)
/// run while holding the write guard, which serializes writes across all
/// subscriptions.
pub struct MemoryContext {
    inner: RwLock<MemoryInner>,
}

#[derive(Default)]
pub(crate) struct MemoryInner {
    pub(crate) users: Vec<UserEntity>,
    pub(crate) subscriptions: Vec<SubscriptionEntity>,
    pub(crate) shares: Vec<ShareEntity>,
    /// Ciphertext only; see `crypto::credential_cipher`.
    pub(crate) credentials: HashMap<Uuid, Vec<u8>>,
}

impl MemoryContext {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MemoryInner::default()),
        }
    }

    pub(crate) fn read(&self) -> Result<RwLockReadGuard<'_, MemoryInner>> {
        self.inner
            .read()
            .map_err(|_| anyhow!("memory store lock poisoned"))
    }

    pub(crate) fn write(&self) -> Result<RwLockWriteGuard<'_, MemoryInner>> {
        self.inner
            .write()
            .map_err(|_| anyhow!("memory store lock poisoned"))
    }
}

impl Default for MemoryContext {
    fn default() -> Self {
        Self::new()
    }
}
