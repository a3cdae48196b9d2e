use std::sync::Arc;

use domain::{
    entities::subscriptions::{InsertSubscriptionEntity, UpdateSubscriptionEntity},
    repositories::{
        shares::ShareRepository, subscriptions::SubscriptionRepository, users::UserRepository,
    },
    value_objects::subscriptions::{
        InsertSubscriptionModel, SubscriptionModel, SubscriptionUpdate, UpdateSubscriptionModel,
    },
};
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::usecases::subscription_view::SubscriptionViewResolver;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("{0}")]
    Validation(String),
    #[error("subscription not found")]
    SubscriptionNotFound,
    #[error("only the owner can modify this subscription")]
    Forbidden,
    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

impl LedgerError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            LedgerError::Validation(_) => StatusCode::BAD_REQUEST,
            LedgerError::SubscriptionNotFound => StatusCode::NOT_FOUND,
            LedgerError::Forbidden => StatusCode::FORBIDDEN,
            LedgerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type LedgerResult<T> = std::result::Result<T, LedgerError>;

pub struct SubscriptionLedgerUseCase<S, Sh, U>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    Sh: ShareRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    subscription_repo: Arc<S>,
    share_repo: Arc<Sh>,
    view_resolver: Arc<SubscriptionViewResolver<Sh, U>>,
}

impl<S, Sh, U> SubscriptionLedgerUseCase<S, Sh, U>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    Sh: ShareRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    pub fn new(
        subscription_repo: Arc<S>,
        share_repo: Arc<Sh>,
        view_resolver: Arc<SubscriptionViewResolver<Sh, U>>,
    ) -> Self {
        Self {
            subscription_repo,
            share_repo,
            view_resolver,
        }
    }

    pub async fn create_subscription(
        &self,
        owner_id: Uuid,
        insert_subscription_model: InsertSubscriptionModel,
    ) -> LedgerResult<SubscriptionModel> {
        info!(%owner_id, "ledger: create subscription requested");

        let name = insert_subscription_model.name.trim().to_string();
        if name.is_empty() {
            let err = LedgerError::Validation("name must not be empty".to_string());
            warn!(
                %owner_id,
                status = err.status_code().as_u16(),
                "ledger: empty subscription name"
            );
            return Err(err);
        }
        Self::validate_monthly_cost(insert_subscription_model.monthly_cost)?;
        if insert_subscription_model.max_members < 1 {
            let err = LedgerError::Validation("maxMembers must be at least 1".to_string());
            warn!(
                %owner_id,
                status = err.status_code().as_u16(),
                "ledger: maxMembers below 1"
            );
            return Err(err);
        }

        let entity = self
            .subscription_repo
            .insert(InsertSubscriptionEntity {
                owner_id,
                name,
                description: insert_subscription_model.description,
                service_url: insert_subscription_model.service_url,
                category: insert_subscription_model.category,
                monthly_cost: insert_subscription_model.monthly_cost,
                billing_cycle: insert_subscription_model.billing_cycle.to_string(),
                max_members: insert_subscription_model.max_members,
                next_billing_date: insert_subscription_model.next_billing_date,
                auto_renewal: insert_subscription_model.auto_renewal,
            })
            .await
            .map_err(|err| {
                error!(%owner_id, db_error = ?err, "ledger: failed to insert subscription");
                LedgerError::Internal(err)
            })?;

        info!(%owner_id, subscription_id = %entity.id, "ledger: subscription created");
        Ok(self.view_resolver.resolve(entity).await?)
    }

    pub async fn get_subscription(&self, subscription_id: Uuid) -> LedgerResult<SubscriptionModel> {
        let entity = self
            .subscription_repo
            .find_by_id(subscription_id)
            .await
            .map_err(|err| {
                error!(
                    %subscription_id,
                    db_error = ?err,
                    "ledger: failed to load subscription"
                );
                LedgerError::Internal(err)
            })?
            .ok_or_else(|| {
                let err = LedgerError::SubscriptionNotFound;
                warn!(
                    %subscription_id,
                    status = err.status_code().as_u16(),
                    "ledger: subscription not found"
                );
                err
            })?;

        Ok(self.view_resolver.resolve(entity).await?)
    }

    pub async fn list_owned(&self, owner_id: Uuid) -> LedgerResult<Vec<SubscriptionModel>> {
        info!(%owner_id, "ledger: listing owned subscriptions");
        let entities = self
            .subscription_repo
            .list_by_owner(owner_id)
            .await
            .map_err(|err| {
                error!(
                    %owner_id,
                    db_error = ?err,
                    "ledger: failed to list owned subscriptions"
                );
                LedgerError::Internal(err)
            })?;

        Ok(self.view_resolver.resolve_all(entities).await?)
    }

    /// Subscriptions where the caller holds an *active* share. Pending
    /// invites do not show up here; they surface through the share listing.
    pub async fn list_shared_with(&self, user_id: Uuid) -> LedgerResult<Vec<SubscriptionModel>> {
        info!(%user_id, "ledger: listing shared subscriptions");
        let shares = self
            .share_repo
            .list_active_by_member(user_id)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "ledger: failed to list member shares");
                LedgerError::Internal(err)
            })?;

        let subscription_ids = shares.into_iter().map(|s| s.subscription_id).collect();
        let entities = self
            .subscription_repo
            .list_by_ids(subscription_ids)
            .await
            .map_err(|err| {
                error!(
                    %user_id,
                    db_error = ?err,
                    "ledger: failed to load shared subscriptions"
                );
                LedgerError::Internal(err)
            })?;

        Ok(self.view_resolver.resolve_all(entities).await?)
    }

    pub async fn update_subscription(
        &self,
        subscription_id: Uuid,
        caller_id: Uuid,
        update_subscription_model: UpdateSubscriptionModel,
    ) -> LedgerResult<SubscriptionModel> {
        info!(%subscription_id, %caller_id, "ledger: update subscription requested");

        if let Some(name) = update_subscription_model.name.as_deref() {
            if name.trim().is_empty() {
                let err = LedgerError::Validation("name must not be empty".to_string());
                warn!(
                    %subscription_id,
                    status = err.status_code().as_u16(),
                    "ledger: empty subscription name in patch"
                );
                return Err(err);
            }
        }
        if let Some(monthly_cost) = update_subscription_model.monthly_cost {
            Self::validate_monthly_cost(monthly_cost)?;
        }
        if let Some(max_members) = update_subscription_model.max_members {
            if max_members < 1 {
                let err = LedgerError::Validation("maxMembers must be at least 1".to_string());
                warn!(
                    %subscription_id,
                    status = err.status_code().as_u16(),
                    "ledger: maxMembers below 1 in patch"
                );
                return Err(err);
            }
        }

        let entity = self
            .subscription_repo
            .find_by_id(subscription_id)
            .await
            .map_err(|err| {
                error!(
                    %subscription_id,
                    db_error = ?err,
                    "ledger: failed to load subscription for update"
                );
                LedgerError::Internal(err)
            })?
            .ok_or_else(|| {
                let err = LedgerError::SubscriptionNotFound;
                warn!(
                    %subscription_id,
                    status = err.status_code().as_u16(),
                    "ledger: subscription not found for update"
                );
                err
            })?;

        if entity.owner_id != caller_id {
            let err = LedgerError::Forbidden;
            warn!(
                %subscription_id,
                %caller_id,
                status = err.status_code().as_u16(),
                "ledger: non-owner attempted update"
            );
            return Err(err);
        }

        let patch = UpdateSubscriptionEntity {
            name: update_subscription_model.name.map(|n| n.trim().to_string()),
            description: update_subscription_model.description,
            service_url: update_subscription_model.service_url,
            category: update_subscription_model.category,
            monthly_cost: update_subscription_model.monthly_cost,
            billing_cycle: update_subscription_model.billing_cycle.map(|c| c.to_string()),
            max_members: update_subscription_model.max_members,
            next_billing_date: update_subscription_model.next_billing_date,
            is_active: update_subscription_model.is_active,
            auto_renewal: update_subscription_model.auto_renewal,
        };

        let updated = self
            .subscription_repo
            .update(subscription_id, patch)
            .await
            .map_err(|err| {
                error!(
                    %subscription_id,
                    db_error = ?err,
                    "ledger: failed to update subscription"
                );
                LedgerError::Internal(err)
            })?;

        match updated {
            SubscriptionUpdate::Updated(entity) => {
                info!(%subscription_id, "ledger: subscription updated");
                Ok(self.view_resolver.resolve(entity).await?)
            }
            SubscriptionUpdate::NotFound => {
                let err = LedgerError::SubscriptionNotFound;
                warn!(
                    %subscription_id,
                    status = err.status_code().as_u16(),
                    "ledger: subscription vanished during update"
                );
                Err(err)
            }
            SubscriptionUpdate::MaxMembersBelowActive { active_members } => {
                let err = LedgerError::Validation(format!(
                    "maxMembers cannot drop below the current member count ({})",
                    active_members + 1
                ));
                warn!(
                    %subscription_id,
                    active_members,
                    status = err.status_code().as_u16(),
                    "ledger: maxMembers below active member count"
                );
                Err(err)
            }
        }
    }

    fn validate_monthly_cost(monthly_cost: f64) -> LedgerResult<()> {
        if !monthly_cost.is_finite() || monthly_cost < 0.0 {
            let err =
                LedgerError::Validation("monthlyCost must be a non-negative number".to_string());
            warn!(
                status = err.status_code().as_u16(),
                monthly_cost, "ledger: invalid monthlyCost"
            );
            return Err(err);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domain::{
        entities::subscriptions::SubscriptionEntity,
        repositories::{
            shares::MockShareRepository, subscriptions::MockSubscriptionRepository,
            users::MockUserRepository,
        },
    };

    fn resolver_with_empty_shares() -> Arc<
        SubscriptionViewResolver<MockShareRepository, MockUserRepository>,
    > {
        let mut share_repo = MockShareRepository::new();
        share_repo
            .expect_list_by_subscription()
            .returning(|_| Box::pin(async { Ok(vec![]) }));
        let mut user_repo = MockUserRepository::new();
        user_repo
            .expect_find_by_id()
            .returning(|_| Box::pin(async { Ok(None) }));
        Arc::new(SubscriptionViewResolver::new(
            Arc::new(share_repo),
            Arc::new(user_repo),
        ))
    }

    fn entity(owner_id: Uuid) -> SubscriptionEntity {
        let now = Utc::now();
        SubscriptionEntity {
            id: Uuid::new_v4(),
            owner_id,
            name: "Spotify Family".to_string(),
            description: None,
            service_url: None,
            category: None,
            monthly_cost: 16.99,
            billing_cycle: "monthly".to_string(),
            max_members: 6,
            next_billing_date: now,
            is_active: true,
            auto_renewal: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn create_rejects_negative_cost() {
        let subscription_repo = MockSubscriptionRepository::new();
        let share_repo = Arc::new(MockShareRepository::new());
        let usecase = SubscriptionLedgerUseCase::new(
            Arc::new(subscription_repo),
            share_repo,
            resolver_with_empty_shares(),
        );

        let result = usecase
            .create_subscription(
                Uuid::new_v4(),
                InsertSubscriptionModel {
                    name: "Netflix".to_string(),
                    description: None,
                    service_url: None,
                    category: None,
                    monthly_cost: -1.0,
                    billing_cycle: Default::default(),
                    max_members: 4,
                    next_billing_date: Utc::now(),
                    auto_renewal: true,
                },
            )
            .await;

        assert!(matches!(result, Err(LedgerError::Validation(_))));
    }

    #[tokio::test]
    async fn create_rejects_zero_max_members() {
        let subscription_repo = MockSubscriptionRepository::new();
        let share_repo = Arc::new(MockShareRepository::new());
        let usecase = SubscriptionLedgerUseCase::new(
            Arc::new(subscription_repo),
            share_repo,
            resolver_with_empty_shares(),
        );

        let result = usecase
            .create_subscription(
                Uuid::new_v4(),
                InsertSubscriptionModel {
                    name: "Netflix".to_string(),
                    description: None,
                    service_url: None,
                    category: None,
                    monthly_cost: 15.49,
                    billing_cycle: Default::default(),
                    max_members: 0,
                    next_billing_date: Utc::now(),
                    auto_renewal: true,
                },
            )
            .await;

        assert!(matches!(result, Err(LedgerError::Validation(_))));
    }

    #[tokio::test]
    async fn update_requires_ownership() {
        let owner_id = Uuid::new_v4();
        let stored = entity(owner_id);
        let subscription_id = stored.id;

        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo.expect_find_by_id().returning(move |_| {
            let stored = stored.clone();
            Box::pin(async move { Ok(Some(stored)) })
        });

        let usecase = SubscriptionLedgerUseCase::new(
            Arc::new(subscription_repo),
            Arc::new(MockShareRepository::new()),
            resolver_with_empty_shares(),
        );

        let result = usecase
            .update_subscription(
                subscription_id,
                Uuid::new_v4(),
                UpdateSubscriptionModel::default(),
            )
            .await;

        assert!(matches!(result, Err(LedgerError::Forbidden)));
    }

    #[tokio::test]
    async fn update_surfaces_max_members_floor() {
        let owner_id = Uuid::new_v4();
        let stored = entity(owner_id);
        let subscription_id = stored.id;

        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo.expect_find_by_id().returning(move |_| {
            let stored = stored.clone();
            Box::pin(async move { Ok(Some(stored)) })
        });
        subscription_repo.expect_update().returning(|_, _| {
            Box::pin(async {
                Ok(SubscriptionUpdate::MaxMembersBelowActive { active_members: 3 })
            })
        });

        let usecase = SubscriptionLedgerUseCase::new(
            Arc::new(subscription_repo),
            Arc::new(MockShareRepository::new()),
            resolver_with_empty_shares(),
        );

        let result = usecase
            .update_subscription(
                subscription_id,
                owner_id,
                UpdateSubscriptionModel {
                    max_members: Some(2),
                    ..Default::default()
                },
            )
            .await;

        match result {
            Err(LedgerError::Validation(message)) => {
                assert!(message.contains("maxMembers"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_subscription_maps_to_not_found() {
        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo
            .expect_find_by_id()
            .returning(|_| Box::pin(async { Ok(None) }));

        let usecase = SubscriptionLedgerUseCase::new(
            Arc::new(subscription_repo),
            Arc::new(MockShareRepository::new()),
            resolver_with_empty_shares(),
        );

        let result = usecase.get_subscription(Uuid::new_v4()).await;
        assert!(matches!(result, Err(LedgerError::SubscriptionNotFound)));
    }
}
