use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::{crypto::credential_cipher::CredentialCipher, memory::memory_context::MemoryContext};
use domain::{
    repositories::credentials::CredentialRepository,
    value_objects::credentials::CredentialPayload,
};

/// Encrypt-on-write, decrypt-on-read. The store never sees plaintext.
pub struct CredentialMemory {
    store: Arc<MemoryContext>,
    cipher: CredentialCipher,
}

impl CredentialMemory {
    pub fn new(store: Arc<MemoryContext>, cipher: CredentialCipher) -> Self {
        Self { store, cipher }
    }
}

#[async_trait]
impl CredentialRepository for CredentialMemory {
    async fn store(&self, subscription_id: Uuid, payload: CredentialPayload) -> Result<()> {
        let plaintext = serde_json::to_vec(&payload)?;
        let ciphertext = self.cipher.encrypt(&plaintext)?;

        let mut inner = self.store.write()?;
        inner.credentials.insert(subscription_id, ciphertext);
        Ok(())
    }

    async fn retrieve(&self, subscription_id: Uuid) -> Result<Option<CredentialPayload>> {
        let ciphertext = {
            let inner = self.store.read()?;
            inner.credentials.get(&subscription_id).cloned()
        };

        let Some(ciphertext) = ciphertext else {
            return Ok(None);
        };

        let plaintext = self.cipher.decrypt(&ciphertext)?;
        let payload = serde_json::from_slice(&plaintext)?;
        Ok(Some(payload))
    }
}
