use std::sync::Arc;

use domain::{
    repositories::{
        credentials::CredentialRepository, shares::ShareRepository,
        subscriptions::SubscriptionRepository,
    },
    value_objects::{credentials::CredentialPayload, enums::share_statuses::ShareStatus},
};
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("subscription not found")]
    SubscriptionNotFound,
    #[error("no credentials stored for this subscription")]
    CredentialsNotFound,
    #[error("not authorized to access these credentials")]
    Forbidden,
    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

impl CredentialError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            CredentialError::SubscriptionNotFound | CredentialError::CredentialsNotFound => {
                StatusCode::NOT_FOUND
            }
            CredentialError::Forbidden => StatusCode::FORBIDDEN,
            CredentialError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type CredentialResult<T> = std::result::Result<T, CredentialError>;

/// Access control for the credential vault. Encryption itself lives behind
/// the repository; plaintext only exists on this side of that boundary.
pub struct CredentialVaultUseCase<S, Sh, C>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    Sh: ShareRepository + Send + Sync + 'static,
    C: CredentialRepository + Send + Sync + 'static,
{
    subscription_repo: Arc<S>,
    share_repo: Arc<Sh>,
    credential_repo: Arc<C>,
}

impl<S, Sh, C> CredentialVaultUseCase<S, Sh, C>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    Sh: ShareRepository + Send + Sync + 'static,
    C: CredentialRepository + Send + Sync + 'static,
{
    pub fn new(subscription_repo: Arc<S>, share_repo: Arc<Sh>, credential_repo: Arc<C>) -> Self {
        Self {
            subscription_repo,
            share_repo,
            credential_repo,
        }
    }

    pub async fn store(
        &self,
        subscription_id: Uuid,
        caller_id: Uuid,
        payload: CredentialPayload,
    ) -> CredentialResult<()> {
        info!(%subscription_id, %caller_id, "credentials: store requested");

        let subscription = self.load_subscription(subscription_id).await?;
        if subscription.owner_id != caller_id {
            let err = CredentialError::Forbidden;
            warn!(
                %subscription_id,
                %caller_id,
                status = err.status_code().as_u16(),
                "credentials: non-owner attempted to store credentials"
            );
            return Err(err);
        }

        self.credential_repo
            .store(subscription_id, payload)
            .await
            .map_err(|err| {
                error!(
                    %subscription_id,
                    db_error = ?err,
                    "credentials: failed to store credentials"
                );
                CredentialError::Internal(err)
            })?;

        info!(%subscription_id, "credentials: stored");
        Ok(())
    }

    pub async fn retrieve(
        &self,
        subscription_id: Uuid,
        caller_id: Uuid,
    ) -> CredentialResult<CredentialPayload> {
        info!(%subscription_id, %caller_id, "credentials: retrieve requested");

        let subscription = self.load_subscription(subscription_id).await?;
        if subscription.owner_id != caller_id {
            let shares = self
                .share_repo
                .list_by_subscription(subscription_id)
                .await
                .map_err(|err| {
                    error!(
                        %subscription_id,
                        db_error = ?err,
                        "credentials: failed to check membership"
                    );
                    CredentialError::Internal(err)
                })?;

            let is_active_member = shares.iter().any(|share| {
                share.member_id == caller_id
                    && ShareStatus::from_str(&share.status) == ShareStatus::Active
            });
            if !is_active_member {
                let err = CredentialError::Forbidden;
                warn!(
                    %subscription_id,
                    %caller_id,
                    status = err.status_code().as_u16(),
                    "credentials: caller is neither owner nor active member"
                );
                return Err(err);
            }
        }

        self.credential_repo
            .retrieve(subscription_id)
            .await
            .map_err(|err| {
                error!(
                    %subscription_id,
                    db_error = ?err,
                    "credentials: failed to retrieve credentials"
                );
                CredentialError::Internal(err)
            })?
            .ok_or_else(|| {
                let err = CredentialError::CredentialsNotFound;
                warn!(
                    %subscription_id,
                    status = err.status_code().as_u16(),
                    "credentials: nothing stored"
                );
                err
            })
    }

    async fn load_subscription(
        &self,
        subscription_id: Uuid,
    ) -> CredentialResult<domain::entities::subscriptions::SubscriptionEntity> {
        self.subscription_repo
            .find_by_id(subscription_id)
            .await
            .map_err(|err| {
                error!(
                    %subscription_id,
                    db_error = ?err,
                    "credentials: failed to load subscription"
                );
                CredentialError::Internal(err)
            })?
            .ok_or_else(|| {
                let err = CredentialError::SubscriptionNotFound;
                warn!(
                    %subscription_id,
                    status = err.status_code().as_u16(),
                    "credentials: subscription not found"
                );
                err
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domain::{
        entities::{shares::ShareEntity, subscriptions::SubscriptionEntity},
        repositories::{
            credentials::MockCredentialRepository, shares::MockShareRepository,
            subscriptions::MockSubscriptionRepository,
        },
    };

    fn subscription(owner_id: Uuid) -> SubscriptionEntity {
        let now = Utc::now();
        SubscriptionEntity {
            id: Uuid::new_v4(),
            owner_id,
            name: "Netflix Premium".to_string(),
            description: None,
            service_url: None,
            category: None,
            monthly_cost: 15.49,
            billing_cycle: "monthly".to_string(),
            max_members: 4,
            next_billing_date: now,
            is_active: true,
            auto_renewal: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn share(subscription_id: Uuid, member_id: Uuid, status: &str) -> ShareEntity {
        let now = Utc::now();
        ShareEntity {
            id: Uuid::new_v4(),
            subscription_id,
            member_id,
            role: "member".to_string(),
            share_percentage: 25.0,
            fixed_amount: 0.0,
            status: status.to_string(),
            invited_by: Uuid::new_v4(),
            invited_at: now,
            accepted_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn payload() -> CredentialPayload {
        CredentialPayload {
            username: "family@example.com".to_string(),
            password: "hunter2".to_string(),
            notes: Some("profile 3".to_string()),
        }
    }

    #[tokio::test]
    async fn store_is_owner_only() {
        let owner_id = Uuid::new_v4();
        let stored = subscription(owner_id);
        let subscription_id = stored.id;

        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo.expect_find_by_id().returning(move |_| {
            let stored = stored.clone();
            Box::pin(async move { Ok(Some(stored)) })
        });

        let usecase = CredentialVaultUseCase::new(
            Arc::new(subscription_repo),
            Arc::new(MockShareRepository::new()),
            Arc::new(MockCredentialRepository::new()),
        );

        let result = usecase
            .store(subscription_id, Uuid::new_v4(), payload())
            .await;
        assert!(matches!(result, Err(CredentialError::Forbidden)));
    }

    #[tokio::test]
    async fn active_member_may_retrieve() {
        let owner_id = Uuid::new_v4();
        let member_id = Uuid::new_v4();
        let stored = subscription(owner_id);
        let subscription_id = stored.id;

        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo.expect_find_by_id().returning(move |_| {
            let stored = stored.clone();
            Box::pin(async move { Ok(Some(stored)) })
        });

        let mut share_repo = MockShareRepository::new();
        share_repo.expect_list_by_subscription().returning(move |_| {
            let shares = vec![share(subscription_id, member_id, "active")];
            Box::pin(async move { Ok(shares) })
        });

        let mut credential_repo = MockCredentialRepository::new();
        credential_repo
            .expect_retrieve()
            .returning(|_| Box::pin(async { Ok(Some(payload())) }));

        let usecase = CredentialVaultUseCase::new(
            Arc::new(subscription_repo),
            Arc::new(share_repo),
            Arc::new(credential_repo),
        );

        let result = usecase.retrieve(subscription_id, member_id).await.unwrap();
        assert_eq!(result.username, "family@example.com");
    }

    #[tokio::test]
    async fn pending_member_may_not_retrieve() {
        let owner_id = Uuid::new_v4();
        let member_id = Uuid::new_v4();
        let stored = subscription(owner_id);
        let subscription_id = stored.id;

        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo.expect_find_by_id().returning(move |_| {
            let stored = stored.clone();
            Box::pin(async move { Ok(Some(stored)) })
        });

        let mut share_repo = MockShareRepository::new();
        share_repo.expect_list_by_subscription().returning(move |_| {
            let shares = vec![share(subscription_id, member_id, "pending")];
            Box::pin(async move { Ok(shares) })
        });

        let usecase = CredentialVaultUseCase::new(
            Arc::new(subscription_repo),
            Arc::new(share_repo),
            Arc::new(MockCredentialRepository::new()),
        );

        let result = usecase.retrieve(subscription_id, member_id).await;
        assert!(matches!(result, Err(CredentialError::Forbidden)));
    }

    #[tokio::test]
    async fn owner_sees_not_found_when_vault_is_empty() {
        let owner_id = Uuid::new_v4();
        let stored = subscription(owner_id);
        let subscription_id = stored.id;

        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo.expect_find_by_id().returning(move |_| {
            let stored = stored.clone();
            Box::pin(async move { Ok(Some(stored)) })
        });

        let mut credential_repo = MockCredentialRepository::new();
        credential_repo
            .expect_retrieve()
            .returning(|_| Box::pin(async { Ok(None) }));

        let usecase = CredentialVaultUseCase::new(
            Arc::new(subscription_repo),
            Arc::new(MockShareRepository::new()),
            Arc::new(credential_repo),
        );

        let result = usecase.retrieve(subscription_id, owner_id).await;
        assert!(matches!(result, Err(CredentialError::CredentialsNotFound)));
    }
}
