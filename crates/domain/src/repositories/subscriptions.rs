use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::{
    entities::subscriptions::{
        InsertSubscriptionEntity, SubscriptionEntity, UpdateSubscriptionEntity,
    },
    value_objects::subscriptions::SubscriptionUpdate,
};

#[async_trait]
#[automock]
pub trait SubscriptionRepository {
    async fn insert(
        &self,
        insert_subscription_entity: InsertSubscriptionEntity,
    ) -> Result<SubscriptionEntity>;

    async fn find_by_id(&self, subscription_id: Uuid) -> Result<Option<SubscriptionEntity>>;

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<SubscriptionEntity>>;

    async fn list_by_ids(&self, subscription_ids: Vec<Uuid>) -> Result<Vec<SubscriptionEntity>>;

    /// Merges the patch under the store lock. A `max_members` value below the
    /// current active member count (owner included) must be refused by the
    /// store, not pre-checked by the caller.
    async fn update(
        &self,
        subscription_id: Uuid,
        patch: UpdateSubscriptionEntity,
    ) -> Result<SubscriptionUpdate>;
}
