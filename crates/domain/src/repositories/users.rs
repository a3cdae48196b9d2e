use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::entities::users::{InsertUserEntity, UserEntity};

#[async_trait]
#[automock]
pub trait UserRepository {
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<UserEntity>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>>;
    async fn insert(&self, insert_user_entity: InsertUserEntity) -> Result<UserEntity>;
}
