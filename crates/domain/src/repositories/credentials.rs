use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::value_objects::credentials::CredentialPayload;

/// Implementations must encrypt on write and decrypt on read; callers only
/// ever see plaintext payloads, the store only ever holds ciphertext.
#[async_trait]
#[automock]
pub trait CredentialRepository {
    async fn store(&self, subscription_id: Uuid, payload: CredentialPayload) -> Result<()>;
    async fn retrieve(&self, subscription_id: Uuid) -> Result<Option<CredentialPayload>>;
}
