use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::memory::memory_context::MemoryContext;
use domain::{
    entities::subscriptions::{
        InsertSubscriptionEntity, SubscriptionEntity, UpdateSubscriptionEntity,
    },
    repositories::subscriptions::SubscriptionRepository,
    value_objects::{
        enums::share_statuses::ShareStatus, subscriptions::SubscriptionUpdate,
    },
};

pub struct SubscriptionMemory {
    store: Arc<MemoryContext>,
}

impl SubscriptionMemory {
    pub fn new(store: Arc<MemoryContext>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SubscriptionRepository for SubscriptionMemory {
    async fn insert(
        &self,
        insert_subscription_entity: InsertSubscriptionEntity,
    ) -> Result<SubscriptionEntity> {
        let mut inner = self.store.write()?;
        let now = Utc::now();
        let subscription = SubscriptionEntity {
            id: Uuid::new_v4(),
            owner_id: insert_subscription_entity.owner_id,
            name: insert_subscription_entity.name,
            description: insert_subscription_entity.description,
            service_url: insert_subscription_entity.service_url,
            category: insert_subscription_entity.category,
            monthly_cost: insert_subscription_entity.monthly_cost,
            billing_cycle: insert_subscription_entity.billing_cycle,
            max_members: insert_subscription_entity.max_members,
            next_billing_date: insert_subscription_entity.next_billing_date,
            is_active: true,
            auto_renewal: insert_subscription_entity.auto_renewal,
            created_at: now,
            updated_at: now,
        };
        inner.subscriptions.push(subscription.clone());
        Ok(subscription)
    }

    async fn find_by_id(&self, subscription_id: Uuid) -> Result<Option<SubscriptionEntity>> {
        let inner = self.store.read()?;
        Ok(inner
            .subscriptions
            .iter()
            .find(|s| s.id == subscription_id)
            .cloned())
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<SubscriptionEntity>> {
        let inner = self.store.read()?;
        Ok(inner
            .subscriptions
            .iter()
            .filter(|s| s.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn list_by_ids(&self, subscription_ids: Vec<Uuid>) -> Result<Vec<SubscriptionEntity>> {
        let inner = self.store.read()?;
        Ok(inner
            .subscriptions
            .iter()
            .filter(|s| subscription_ids.contains(&s.id))
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        subscription_id: Uuid,
        patch: UpdateSubscriptionEntity,
    ) -> Result<SubscriptionUpdate> {
        let mut inner = self.store.write()?;

        let Some(index) = inner
            .subscriptions
            .iter()
            .position(|s| s.id == subscription_id)
        else {
            return Ok(SubscriptionUpdate::NotFound);
        };

        // Floor check in the same critical section as the merge: a shrink
        // below the seated member count must never commit.
        if let Some(max_members) = patch.max_members {
            let active_members = inner
                .shares
                .iter()
                .filter(|s| {
                    s.subscription_id == subscription_id
                        && ShareStatus::from_str(&s.status) == ShareStatus::Active
                })
                .count() as u32
                + 1;
            if max_members < active_members {
                return Ok(SubscriptionUpdate::MaxMembersBelowActive { active_members });
            }
        }

        let subscription = &mut inner.subscriptions[index];
        if let Some(name) = patch.name {
            subscription.name = name;
        }
        if let Some(description) = patch.description {
            subscription.description = Some(description);
        }
        if let Some(service_url) = patch.service_url {
            subscription.service_url = Some(service_url);
        }
        if let Some(category) = patch.category {
            subscription.category = Some(category);
        }
        if let Some(monthly_cost) = patch.monthly_cost {
            subscription.monthly_cost = monthly_cost;
        }
        if let Some(billing_cycle) = patch.billing_cycle {
            subscription.billing_cycle = billing_cycle;
        }
        if let Some(max_members) = patch.max_members {
            subscription.max_members = max_members;
        }
        if let Some(next_billing_date) = patch.next_billing_date {
            subscription.next_billing_date = next_billing_date;
        }
        if let Some(is_active) = patch.is_active {
            subscription.is_active = is_active;
        }
        if let Some(auto_renewal) = patch.auto_renewal {
            subscription.auto_renewal = auto_renewal;
        }
        subscription.updated_at = Utc::now();

        Ok(SubscriptionUpdate::Updated(subscription.clone()))
    }
}
