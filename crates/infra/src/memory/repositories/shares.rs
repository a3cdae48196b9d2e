use std::sync::Arc;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::memory::memory_context::MemoryContext;
use domain::{
    entities::shares::{InsertShareEntity, ShareEntity},
    repositories::shares::ShareRepository,
    value_objects::{
        enums::share_statuses::ShareStatus,
        shares::{ShareCommit, ShareTransition},
    },
};

pub struct ShareMemory {
    store: Arc<MemoryContext>,
}

impl ShareMemory {
    pub fn new(store: Arc<MemoryContext>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ShareRepository for ShareMemory {
    async fn find_by_id(&self, share_id: Uuid) -> Result<Option<ShareEntity>> {
        let inner = self.store.read()?;
        Ok(inner.shares.iter().find(|s| s.id == share_id).cloned())
    }

    async fn list_by_subscription(&self, subscription_id: Uuid) -> Result<Vec<ShareEntity>> {
        let inner = self.store.read()?;
        Ok(inner
            .shares
            .iter()
            .filter(|s| s.subscription_id == subscription_id)
            .cloned()
            .collect())
    }

    async fn list_active_by_member(&self, member_id: Uuid) -> Result<Vec<ShareEntity>> {
        let inner = self.store.read()?;
        Ok(inner
            .shares
            .iter()
            .filter(|s| {
                s.member_id == member_id
                    && ShareStatus::from_str(&s.status) == ShareStatus::Active
            })
            .cloned()
            .collect())
    }

    async fn insert_pending(
        &self,
        insert_share_entity: InsertShareEntity,
        strict_allocation: bool,
    ) -> Result<ShareCommit> {
        let mut inner = self.store.write()?;

        let duplicate = inner.shares.iter().any(|s| {
            s.subscription_id == insert_share_entity.subscription_id
                && s.member_id == insert_share_entity.member_id
                && !ShareStatus::from_str(&s.status).is_terminal()
        });
        if duplicate {
            return Ok(ShareCommit::DuplicateShare);
        }

        if strict_allocation {
            let subscription = inner
                .subscriptions
                .iter()
                .find(|s| s.id == insert_share_entity.subscription_id)
                .ok_or_else(|| anyhow!("share references unknown subscription"))?;

            let mut non_terminal = 0u32;
            let mut percentage_sum = insert_share_entity.share_percentage;
            let mut fixed_sum = insert_share_entity.fixed_amount;
            for share in inner.shares.iter().filter(|s| {
                s.subscription_id == insert_share_entity.subscription_id
                    && !ShareStatus::from_str(&s.status).is_terminal()
            }) {
                non_terminal += 1;
                percentage_sum += share.share_percentage;
                fixed_sum += share.fixed_amount;
            }

            // owner seat + existing non-terminal shares + this invite
            if non_terminal + 2 > subscription.max_members {
                return Ok(ShareCommit::CapacityExhausted);
            }
            if percentage_sum > 100.0 {
                return Ok(ShareCommit::PercentageOverAllocated);
            }
            if fixed_sum > subscription.monthly_cost {
                return Ok(ShareCommit::FixedAmountOverAllocated);
            }
        }

        let now = Utc::now();
        let share = ShareEntity {
            id: Uuid::new_v4(),
            subscription_id: insert_share_entity.subscription_id,
            member_id: insert_share_entity.member_id,
            role: insert_share_entity.role,
            share_percentage: insert_share_entity.share_percentage,
            fixed_amount: insert_share_entity.fixed_amount,
            status: ShareStatus::Pending.to_string(),
            invited_by: insert_share_entity.invited_by,
            invited_at: now,
            accepted_at: None,
            created_at: now,
            updated_at: now,
        };
        inner.shares.push(share.clone());
        Ok(ShareCommit::Created(share))
    }

    async fn transition(
        &self,
        share_id: Uuid,
        allowed_from: Vec<ShareStatus>,
        to: ShareStatus,
        enforce_capacity: bool,
    ) -> Result<ShareTransition> {
        let mut inner = self.store.write()?;

        let Some(index) = inner.shares.iter().position(|s| s.id == share_id) else {
            return Ok(ShareTransition::NotFound);
        };

        let current = ShareStatus::from_str(&inner.shares[index].status);
        if !allowed_from.contains(&current) {
            return Ok(ShareTransition::InvalidState(current));
        }

        if enforce_capacity && to == ShareStatus::Active {
            let subscription_id = inner.shares[index].subscription_id;
            let subscription = inner
                .subscriptions
                .iter()
                .find(|s| s.id == subscription_id)
                .ok_or_else(|| anyhow!("share references unknown subscription"))?;
            let active = inner
                .shares
                .iter()
                .filter(|s| {
                    s.subscription_id == subscription_id
                        && ShareStatus::from_str(&s.status) == ShareStatus::Active
                })
                .count() as u32;
            // owner seat + already-active shares + this one
            if active + 2 > subscription.max_members {
                return Ok(ShareTransition::CapacityExhausted);
            }
        }

        let now = Utc::now();
        let share = &mut inner.shares[index];
        share.status = to.to_string();
        share.updated_at = now;
        if to == ShareStatus::Active {
            share.accepted_at = Some(now);
        }

        Ok(ShareTransition::Updated(share.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::repositories::subscriptions::SubscriptionMemory;
    use domain::{
        entities::subscriptions::InsertSubscriptionEntity,
        repositories::subscriptions::SubscriptionRepository,
        value_objects::enums::share_roles::ShareRole,
    };

    async fn seeded_subscription(store: &Arc<MemoryContext>, max_members: u32) -> Uuid {
        let repository = SubscriptionMemory::new(Arc::clone(store));
        let subscription = repository
            .insert(InsertSubscriptionEntity {
                owner_id: Uuid::new_v4(),
                name: "Netflix Premium".to_string(),
                description: None,
                service_url: None,
                category: Some("streaming".to_string()),
                monthly_cost: 15.49,
                billing_cycle: "monthly".to_string(),
                max_members,
                next_billing_date: Utc::now(),
                auto_renewal: true,
            })
            .await
            .unwrap();
        subscription.id
    }

    fn insert_with_terms(
        subscription_id: Uuid,
        member_id: Uuid,
        share_percentage: f64,
        fixed_amount: f64,
    ) -> InsertShareEntity {
        InsertShareEntity {
            subscription_id,
            member_id,
            role: ShareRole::Member.to_string(),
            share_percentage,
            fixed_amount,
            invited_by: Uuid::new_v4(),
        }
    }

    fn insert_for(subscription_id: Uuid, member_id: Uuid) -> InsertShareEntity {
        insert_with_terms(subscription_id, member_id, 25.0, 0.0)
    }

    #[tokio::test]
    async fn rejects_duplicate_non_terminal_share() {
        let store = Arc::new(MemoryContext::new());
        let subscription_id = seeded_subscription(&store, 4).await;
        let repository = ShareMemory::new(Arc::clone(&store));
        let member_id = Uuid::new_v4();

        let first = repository
            .insert_pending(insert_for(subscription_id, member_id), true)
            .await
            .unwrap();
        assert!(matches!(first, ShareCommit::Created(_)));

        let second = repository
            .insert_pending(insert_for(subscription_id, member_id), true)
            .await
            .unwrap();
        assert_eq!(second, ShareCommit::DuplicateShare);
    }

    #[tokio::test]
    async fn allows_reinvite_after_terminal_state() {
        let store = Arc::new(MemoryContext::new());
        let subscription_id = seeded_subscription(&store, 4).await;
        let repository = ShareMemory::new(Arc::clone(&store));
        let member_id = Uuid::new_v4();

        let ShareCommit::Created(share) = repository
            .insert_pending(insert_for(subscription_id, member_id), true)
            .await
            .unwrap()
        else {
            panic!("expected created share");
        };

        repository
            .transition(
                share.id,
                vec![ShareStatus::Pending],
                ShareStatus::Declined,
                false,
            )
            .await
            .unwrap();

        let reinvite = repository
            .insert_pending(insert_for(subscription_id, member_id), true)
            .await
            .unwrap();
        let ShareCommit::Created(new_share) = reinvite else {
            panic!("expected re-invite to create a fresh share");
        };
        assert_ne!(new_share.id, share.id);
    }

    #[tokio::test]
    async fn reserves_capacity_against_non_terminal_shares() {
        let store = Arc::new(MemoryContext::new());
        let subscription_id = seeded_subscription(&store, 3).await;
        let repository = ShareMemory::new(Arc::clone(&store));

        for _ in 0..2 {
            let commit = repository
                .insert_pending(insert_for(subscription_id, Uuid::new_v4()), true)
                .await
                .unwrap();
            assert!(matches!(commit, ShareCommit::Created(_)));
        }

        let overflow = repository
            .insert_pending(insert_for(subscription_id, Uuid::new_v4()), true)
            .await
            .unwrap();
        assert_eq!(overflow, ShareCommit::CapacityExhausted);
    }

    #[tokio::test]
    async fn caps_percentage_sum_across_non_terminal_shares() {
        let store = Arc::new(MemoryContext::new());
        let subscription_id = seeded_subscription(&store, 8).await;
        let repository = ShareMemory::new(Arc::clone(&store));

        let first = repository
            .insert_pending(
                insert_with_terms(subscription_id, Uuid::new_v4(), 60.0, 0.0),
                true,
            )
            .await
            .unwrap();
        assert!(matches!(first, ShareCommit::Created(_)));

        let overflow = repository
            .insert_pending(
                insert_with_terms(subscription_id, Uuid::new_v4(), 50.0, 0.0),
                true,
            )
            .await
            .unwrap();
        assert_eq!(overflow, ShareCommit::PercentageOverAllocated);
    }

    #[tokio::test]
    async fn caps_fixed_amount_sum_at_the_monthly_cost() {
        let store = Arc::new(MemoryContext::new());
        let subscription_id = seeded_subscription(&store, 8).await;
        let repository = ShareMemory::new(Arc::clone(&store));

        let first = repository
            .insert_pending(
                insert_with_terms(subscription_id, Uuid::new_v4(), 0.0, 10.0),
                true,
            )
            .await
            .unwrap();
        assert!(matches!(first, ShareCommit::Created(_)));

        // 10 + 6 exceeds the 15.49 monthly cost.
        let overflow = repository
            .insert_pending(
                insert_with_terms(subscription_id, Uuid::new_v4(), 0.0, 6.0),
                true,
            )
            .await
            .unwrap();
        assert_eq!(overflow, ShareCommit::FixedAmountOverAllocated);
    }

    #[tokio::test]
    async fn skips_allocation_checks_when_disabled() {
        let store = Arc::new(MemoryContext::new());
        let subscription_id = seeded_subscription(&store, 2).await;
        let repository = ShareMemory::new(Arc::clone(&store));

        // Over capacity and over 100% combined, all accepted as pending.
        for _ in 0..3 {
            let commit = repository
                .insert_pending(
                    insert_with_terms(subscription_id, Uuid::new_v4(), 60.0, 0.0),
                    false,
                )
                .await
                .unwrap();
            assert!(matches!(commit, ShareCommit::Created(_)));
        }
    }

    #[tokio::test]
    async fn transition_refuses_wrong_source_state() {
        let store = Arc::new(MemoryContext::new());
        let subscription_id = seeded_subscription(&store, 4).await;
        let repository = ShareMemory::new(Arc::clone(&store));

        let ShareCommit::Created(share) = repository
            .insert_pending(insert_for(subscription_id, Uuid::new_v4()), true)
            .await
            .unwrap()
        else {
            panic!("expected created share");
        };

        let accepted = repository
            .transition(
                share.id,
                vec![ShareStatus::Pending],
                ShareStatus::Active,
                true,
            )
            .await
            .unwrap();
        let ShareTransition::Updated(active) = accepted else {
            panic!("expected transition to active");
        };
        assert!(active.accepted_at.is_some());

        let again = repository
            .transition(
                share.id,
                vec![ShareStatus::Pending],
                ShareStatus::Active,
                true,
            )
            .await
            .unwrap();
        assert_eq!(again, ShareTransition::InvalidState(ShareStatus::Active));
    }

    #[tokio::test]
    async fn accept_respects_capacity_even_without_reservation() {
        let store = Arc::new(MemoryContext::new());
        let subscription_id = seeded_subscription(&store, 2).await;
        let repository = ShareMemory::new(Arc::clone(&store));

        // Two pending invites slipped in under the permissive policy.
        let mut pending = Vec::new();
        for _ in 0..2 {
            let ShareCommit::Created(share) = repository
                .insert_pending(insert_for(subscription_id, Uuid::new_v4()), false)
                .await
                .unwrap()
            else {
                panic!("expected created share");
            };
            pending.push(share);
        }

        let first = repository
            .transition(
                pending[0].id,
                vec![ShareStatus::Pending],
                ShareStatus::Active,
                true,
            )
            .await
            .unwrap();
        assert!(matches!(first, ShareTransition::Updated(_)));

        let second = repository
            .transition(
                pending[1].id,
                vec![ShareStatus::Pending],
                ShareStatus::Active,
                true,
            )
            .await
            .unwrap();
        assert_eq!(second, ShareTransition::CapacityExhausted);
    }

    #[tokio::test]
    async fn transition_reports_missing_share() {
        let store = Arc::new(MemoryContext::new());
        seeded_subscription(&store, 4).await;
        let repository = ShareMemory::new(store);

        let result = repository
            .transition(
                Uuid::new_v4(),
                vec![ShareStatus::Pending],
                ShareStatus::Active,
                true,
            )
            .await
            .unwrap();
        assert_eq!(result, ShareTransition::NotFound);
    }
}
