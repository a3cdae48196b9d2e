use std::sync::Arc;

use anyhow::Result as AnyResult;
use domain::{
    entities::subscriptions::SubscriptionEntity,
    repositories::{shares::ShareRepository, users::UserRepository},
    value_objects::{
        enums::share_statuses::ShareStatus, shares::ShareModel,
        subscriptions::SubscriptionModel, users::UserProfileModel,
    },
};
use tracing::debug;

/// Joins a subscription entity with its shares and member profiles and
/// recomputes the derived cost view. Nothing here is persisted; every read
/// reflects the share states at that moment.
pub struct SubscriptionViewResolver<Sh, U>
where
    Sh: ShareRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    share_repo: Arc<Sh>,
    user_repo: Arc<U>,
}

impl<Sh, U> SubscriptionViewResolver<Sh, U>
where
    Sh: ShareRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    pub fn new(share_repo: Arc<Sh>, user_repo: Arc<U>) -> Self {
        Self {
            share_repo,
            user_repo,
        }
    }

    pub async fn resolve(&self, entity: SubscriptionEntity) -> AnyResult<SubscriptionModel> {
        let shares = self.share_repo.list_by_subscription(entity.id).await?;

        let mut share_models = Vec::with_capacity(shares.len());
        let mut active_members = 0u32;
        for share in shares {
            if ShareStatus::from_str(&share.status) == ShareStatus::Active {
                active_members += 1;
            }
            let user = self
                .user_repo
                .find_by_id(share.member_id)
                .await?
                .map(UserProfileModel::from);
            share_models.push(ShareModel::from_entity(share, user));
        }

        let owner = self
            .user_repo
            .find_by_id(entity.owner_id)
            .await?
            .map(UserProfileModel::from);

        debug!(
            subscription_id = %entity.id,
            active_members,
            "view: resolved subscription"
        );

        Ok(SubscriptionModel::from_entity(
            entity,
            owner,
            share_models,
            active_members,
        ))
    }

    pub async fn resolve_all(
        &self,
        entities: Vec<SubscriptionEntity>,
    ) -> AnyResult<Vec<SubscriptionModel>> {
        let mut models = Vec::with_capacity(entities.len());
        for entity in entities {
            models.push(self.resolve(entity).await?);
        }
        Ok(models)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domain::{
        entities::{shares::ShareEntity, users::UserEntity},
        repositories::{shares::MockShareRepository, users::MockUserRepository},
    };
    use uuid::Uuid;

    fn subscription(owner_id: Uuid, monthly_cost: f64, max_members: u32) -> SubscriptionEntity {
        let now = Utc::now();
        SubscriptionEntity {
            id: Uuid::new_v4(),
            owner_id,
            name: "Netflix Premium".to_string(),
            description: None,
            service_url: None,
            category: Some("streaming".to_string()),
            monthly_cost,
            billing_cycle: "monthly".to_string(),
            max_members,
            next_billing_date: now,
            is_active: true,
            auto_renewal: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn share(subscription_id: Uuid, owner_id: Uuid, status: &str) -> ShareEntity {
        let now = Utc::now();
        ShareEntity {
            id: Uuid::new_v4(),
            subscription_id,
            member_id: Uuid::new_v4(),
            role: "member".to_string(),
            share_percentage: 25.0,
            fixed_amount: 0.0,
            status: status.to_string(),
            invited_by: owner_id,
            invited_at: now,
            accepted_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn user(id: Uuid) -> UserEntity {
        let now = Utc::now();
        UserEntity {
            id,
            email: format!("{id}@example.com"),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            phone: None,
            profile_image_url: None,
            is_verified: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn splits_cost_across_active_members_and_owner() {
        let owner_id = Uuid::new_v4();
        let entity = subscription(owner_id, 15.49, 4);
        let subscription_id = entity.id;

        let mut share_repo = MockShareRepository::new();
        share_repo.expect_list_by_subscription().returning(move |_| {
            let shares = vec![
                share(subscription_id, owner_id, "active"),
                share(subscription_id, owner_id, "active"),
                share(subscription_id, owner_id, "active"),
            ];
            Box::pin(async move { Ok(shares) })
        });

        let mut user_repo = MockUserRepository::new();
        user_repo
            .expect_find_by_id()
            .returning(|id| Box::pin(async move { Ok(Some(user(id))) }));

        let resolver = SubscriptionViewResolver::new(Arc::new(share_repo), Arc::new(user_repo));
        let model = resolver.resolve(entity).await.unwrap();

        assert_eq!(model.current_members, 4);
        assert_eq!(model.total_cost, 15.49);
        assert_eq!(model.cost_per_member, 15.49 / 4.0);
        assert_eq!(model.shares.len(), 3);
        assert!(model.owner.is_some());
    }

    #[tokio::test]
    async fn non_active_shares_do_not_count_toward_the_split() {
        let owner_id = Uuid::new_v4();
        let entity = subscription(owner_id, 12.0, 6);
        let subscription_id = entity.id;

        let mut share_repo = MockShareRepository::new();
        share_repo.expect_list_by_subscription().returning(move |_| {
            let shares = vec![
                share(subscription_id, owner_id, "active"),
                share(subscription_id, owner_id, "pending"),
                share(subscription_id, owner_id, "declined"),
                share(subscription_id, owner_id, "removed"),
            ];
            Box::pin(async move { Ok(shares) })
        });

        let mut user_repo = MockUserRepository::new();
        user_repo
            .expect_find_by_id()
            .returning(|_| Box::pin(async move { Ok(None) }));

        let resolver = SubscriptionViewResolver::new(Arc::new(share_repo), Arc::new(user_repo));
        let model = resolver.resolve(entity).await.unwrap();

        // Owner plus the single active member.
        assert_eq!(model.current_members, 2);
        assert_eq!(model.cost_per_member, 6.0);
        // All shares stay visible regardless of status.
        assert_eq!(model.shares.len(), 4);
    }
}
