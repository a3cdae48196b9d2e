use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::memory::memory_context::MemoryContext;
use domain::{
    entities::users::{InsertUserEntity, UserEntity},
    repositories::users::UserRepository,
};

pub struct UserMemory {
    store: Arc<MemoryContext>,
}

impl UserMemory {
    pub fn new(store: Arc<MemoryContext>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for UserMemory {
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<UserEntity>> {
        let inner = self.store.read()?;
        Ok(inner.users.iter().find(|u| u.id == user_id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>> {
        let inner = self.store.read()?;
        Ok(inner.users.iter().find(|u| u.email == email).cloned())
    }

    async fn insert(&self, insert_user_entity: InsertUserEntity) -> Result<UserEntity> {
        let mut inner = self.store.write()?;
        let now = Utc::now();
        let user = UserEntity {
            id: Uuid::new_v4(),
            email: insert_user_entity.email,
            first_name: insert_user_entity.first_name,
            last_name: insert_user_entity.last_name,
            phone: insert_user_entity.phone,
            profile_image_url: insert_user_entity.profile_image_url,
            is_verified: insert_user_entity.is_verified,
            created_at: now,
            updated_at: now,
        };
        inner.users.push(user.clone());
        Ok(user)
    }
}
