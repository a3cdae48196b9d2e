use std::sync::Arc;

use anyhow::anyhow;
use domain::{
    entities::{shares::InsertShareEntity, subscriptions::SubscriptionEntity},
    repositories::{
        shares::ShareRepository, subscriptions::SubscriptionRepository, users::UserRepository,
    },
    value_objects::{
        enums::{
            share_policies::SharePolicy, share_roles::ShareRole, share_statuses::ShareStatus,
        },
        shares::{InviteShareModel, ShareCommit, ShareModel, ShareTransition},
        users::UserProfileModel,
    },
};
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ShareError {
    #[error("no user found with this email")]
    UserNotFound,
    #[error("subscription not found")]
    SubscriptionNotFound,
    #[error("share not found")]
    ShareNotFound,
    #[error("not authorized to manage this share")]
    Forbidden,
    #[error("this user already has a pending or active share on this subscription")]
    DuplicateShare,
    #[error("this subscription has no member slots left")]
    CapacityExhausted,
    #[error("share is already {0}")]
    InvalidState(ShareStatus),
    #[error("{0}")]
    Validation(String),
    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ShareError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            ShareError::UserNotFound
            | ShareError::SubscriptionNotFound
            | ShareError::ShareNotFound => StatusCode::NOT_FOUND,
            ShareError::Forbidden => StatusCode::FORBIDDEN,
            ShareError::DuplicateShare | ShareError::CapacityExhausted => StatusCode::CONFLICT,
            ShareError::InvalidState(_) | ShareError::Validation(_) => StatusCode::BAD_REQUEST,
            ShareError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type ShareResult<T> = std::result::Result<T, ShareError>;

/// Drives the pending/active/declined/removed state machine. All transitions
/// go through the repository's compare-and-commit operations; this usecase
/// only decides who may request which transition and under which terms.
pub struct ShareLifecycleUseCase<S, Sh, U>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    Sh: ShareRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    subscription_repo: Arc<S>,
    share_repo: Arc<Sh>,
    user_repo: Arc<U>,
    policy: SharePolicy,
}

impl<S, Sh, U> ShareLifecycleUseCase<S, Sh, U>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    Sh: ShareRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    pub fn new(
        subscription_repo: Arc<S>,
        share_repo: Arc<Sh>,
        user_repo: Arc<U>,
        policy: SharePolicy,
    ) -> Self {
        Self {
            subscription_repo,
            share_repo,
            user_repo,
            policy,
        }
    }

    pub async fn invite(
        &self,
        subscription_id: Uuid,
        inviter_id: Uuid,
        invite_share_model: InviteShareModel,
    ) -> ShareResult<ShareModel> {
        info!(
            %subscription_id,
            %inviter_id,
            policy = %self.policy,
            "shares: invite requested"
        );

        let subscription = self.load_subscription(subscription_id).await?;

        if subscription.owner_id != inviter_id {
            let err = ShareError::Forbidden;
            warn!(
                %subscription_id,
                %inviter_id,
                status = err.status_code().as_u16(),
                "shares: non-owner attempted invite"
            );
            return Err(err);
        }

        Self::validate_terms(
            invite_share_model.share_percentage,
            invite_share_model.fixed_amount,
        )?;

        let invitee = self
            .user_repo
            .find_by_email(&invite_share_model.email)
            .await
            .map_err(|err| {
                error!(
                    %subscription_id,
                    db_error = ?err,
                    "shares: failed to look up invitee"
                );
                ShareError::Internal(err)
            })?
            .ok_or_else(|| {
                let err = ShareError::UserNotFound;
                warn!(
                    %subscription_id,
                    status = err.status_code().as_u16(),
                    "shares: invitee email not registered"
                );
                err
            })?;

        if invitee.id == inviter_id {
            let err =
                ShareError::Validation("the owner already holds a seat on this subscription".to_string());
            warn!(
                %subscription_id,
                %inviter_id,
                status = err.status_code().as_u16(),
                "shares: owner attempted to invite themselves"
            );
            return Err(err);
        }

        let commit = self
            .share_repo
            .insert_pending(
                InsertShareEntity {
                    subscription_id,
                    member_id: invitee.id,
                    role: ShareRole::Member.to_string(),
                    share_percentage: invite_share_model.share_percentage,
                    fixed_amount: invite_share_model.fixed_amount,
                    invited_by: inviter_id,
                },
                self.policy == SharePolicy::Strict,
            )
            .await
            .map_err(|err| {
                error!(
                    %subscription_id,
                    db_error = ?err,
                    "shares: failed to insert pending share"
                );
                ShareError::Internal(err)
            })?;

        match commit {
            ShareCommit::Created(entity) => {
                info!(
                    %subscription_id,
                    share_id = %entity.id,
                    member_id = %entity.member_id,
                    "shares: invitation created"
                );
                Ok(ShareModel::from_entity(
                    entity,
                    Some(UserProfileModel::from(invitee)),
                ))
            }
            ShareCommit::DuplicateShare => {
                let err = ShareError::DuplicateShare;
                warn!(
                    %subscription_id,
                    member_id = %invitee.id,
                    status = err.status_code().as_u16(),
                    "shares: duplicate non-terminal share"
                );
                Err(err)
            }
            ShareCommit::CapacityExhausted => {
                let err = ShareError::CapacityExhausted;
                warn!(
                    %subscription_id,
                    status = err.status_code().as_u16(),
                    "shares: no slots left for invite"
                );
                Err(err)
            }
            ShareCommit::PercentageOverAllocated => {
                let err = ShareError::Validation(
                    "sharePercentage across members cannot exceed 100".to_string(),
                );
                warn!(
                    %subscription_id,
                    status = err.status_code().as_u16(),
                    "shares: percentage allocation exceeds 100"
                );
                Err(err)
            }
            ShareCommit::FixedAmountOverAllocated => {
                let err = ShareError::Validation(
                    "fixedAmount across members cannot exceed the monthly cost".to_string(),
                );
                warn!(
                    %subscription_id,
                    status = err.status_code().as_u16(),
                    "shares: fixed allocation exceeds the monthly cost"
                );
                Err(err)
            }
        }
    }

    pub async fn accept(
        &self,
        subscription_id: Uuid,
        share_id: Uuid,
        caller_id: Uuid,
    ) -> ShareResult<ShareModel> {
        info!(%subscription_id, %share_id, %caller_id, "shares: accept requested");

        let share = self.load_share(subscription_id, share_id).await?;
        if share.member_id != caller_id {
            let err = ShareError::Forbidden;
            warn!(
                %share_id,
                %caller_id,
                status = err.status_code().as_u16(),
                "shares: accept attempted by someone other than the invitee"
            );
            return Err(err);
        }

        let transition = self
            .share_repo
            .transition(share_id, vec![ShareStatus::Pending], ShareStatus::Active, true)
            .await
            .map_err(|err| {
                error!(%share_id, db_error = ?err, "shares: accept transition failed");
                ShareError::Internal(err)
            })?;

        match transition {
            ShareTransition::Updated(entity) => {
                info!(%subscription_id, %share_id, "shares: invitation accepted");
                let user = self
                    .user_repo
                    .find_by_id(entity.member_id)
                    .await
                    .map_err(ShareError::Internal)?
                    .map(UserProfileModel::from);
                Ok(ShareModel::from_entity(entity, user))
            }
            ShareTransition::NotFound => Err(ShareError::ShareNotFound),
            ShareTransition::InvalidState(status) => {
                let err = ShareError::InvalidState(status);
                warn!(
                    %share_id,
                    current_status = %status,
                    status = err.status_code().as_u16(),
                    "shares: accept on non-pending share"
                );
                Err(err)
            }
            ShareTransition::CapacityExhausted => {
                let err = ShareError::CapacityExhausted;
                warn!(
                    %subscription_id,
                    %share_id,
                    status = err.status_code().as_u16(),
                    "shares: accept would exceed max members"
                );
                Err(err)
            }
        }
    }

    pub async fn decline(
        &self,
        subscription_id: Uuid,
        share_id: Uuid,
        caller_id: Uuid,
    ) -> ShareResult<ShareModel> {
        info!(%subscription_id, %share_id, %caller_id, "shares: decline requested");

        let share = self.load_share(subscription_id, share_id).await?;
        if share.member_id != caller_id {
            let err = ShareError::Forbidden;
            warn!(
                %share_id,
                %caller_id,
                status = err.status_code().as_u16(),
                "shares: decline attempted by someone other than the invitee"
            );
            return Err(err);
        }

        let transition = self
            .share_repo
            .transition(
                share_id,
                vec![ShareStatus::Pending],
                ShareStatus::Declined,
                false,
            )
            .await
            .map_err(|err| {
                error!(%share_id, db_error = ?err, "shares: decline transition failed");
                ShareError::Internal(err)
            })?;

        match transition {
            ShareTransition::Updated(entity) => {
                info!(%subscription_id, %share_id, "shares: invitation declined");
                Ok(ShareModel::from_entity(entity, None))
            }
            ShareTransition::NotFound => Err(ShareError::ShareNotFound),
            ShareTransition::InvalidState(status) => {
                let err = ShareError::InvalidState(status);
                warn!(
                    %share_id,
                    current_status = %status,
                    status = err.status_code().as_u16(),
                    "shares: decline on non-pending share"
                );
                Err(err)
            }
            ShareTransition::CapacityExhausted => Err(ShareError::Internal(anyhow!(
                "capacity check reported on a decline transition"
            ))),
        }
    }

    pub async fn remove(
        &self,
        subscription_id: Uuid,
        share_id: Uuid,
        caller_id: Uuid,
    ) -> ShareResult<()> {
        info!(%subscription_id, %share_id, %caller_id, "shares: remove requested");

        let subscription = self.load_subscription(subscription_id).await?;
        let share = self.load_share(subscription_id, share_id).await?;

        if caller_id != subscription.owner_id && caller_id != share.member_id {
            let err = ShareError::Forbidden;
            warn!(
                %share_id,
                %caller_id,
                status = err.status_code().as_u16(),
                "shares: remove attempted by neither owner nor member"
            );
            return Err(err);
        }

        let transition = self
            .share_repo
            .transition(
                share_id,
                vec![ShareStatus::Pending, ShareStatus::Active],
                ShareStatus::Removed,
                false,
            )
            .await
            .map_err(|err| {
                error!(%share_id, db_error = ?err, "shares: remove transition failed");
                ShareError::Internal(err)
            })?;

        match transition {
            ShareTransition::Updated(_) => {
                info!(%subscription_id, %share_id, "shares: member removed");
                Ok(())
            }
            ShareTransition::NotFound => Err(ShareError::ShareNotFound),
            ShareTransition::InvalidState(status) => {
                let err = ShareError::InvalidState(status);
                warn!(
                    %share_id,
                    current_status = %status,
                    status = err.status_code().as_u16(),
                    "shares: remove on terminal share"
                );
                Err(err)
            }
            ShareTransition::CapacityExhausted => Err(ShareError::Internal(anyhow!(
                "capacity check reported on a remove transition"
            ))),
        }
    }

    pub async fn list_by_subscription(
        &self,
        subscription_id: Uuid,
        caller_id: Uuid,
    ) -> ShareResult<Vec<ShareModel>> {
        let subscription = self.load_subscription(subscription_id).await?;
        let shares = self
            .share_repo
            .list_by_subscription(subscription_id)
            .await
            .map_err(|err| {
                error!(%subscription_id, db_error = ?err, "shares: failed to list shares");
                ShareError::Internal(err)
            })?;

        let caller_holds_share = shares.iter().any(|share| {
            share.member_id == caller_id && !ShareStatus::from_str(&share.status).is_terminal()
        });
        if caller_id != subscription.owner_id && !caller_holds_share {
            let err = ShareError::Forbidden;
            warn!(
                %subscription_id,
                %caller_id,
                status = err.status_code().as_u16(),
                "shares: listing denied"
            );
            return Err(err);
        }

        let mut models = Vec::with_capacity(shares.len());
        for share in shares {
            let user = self
                .user_repo
                .find_by_id(share.member_id)
                .await
                .map_err(ShareError::Internal)?
                .map(UserProfileModel::from);
            models.push(ShareModel::from_entity(share, user));
        }
        Ok(models)
    }

    async fn load_subscription(
        &self,
        subscription_id: Uuid,
    ) -> ShareResult<SubscriptionEntity> {
        self.subscription_repo
            .find_by_id(subscription_id)
            .await
            .map_err(|err| {
                error!(
                    %subscription_id,
                    db_error = ?err,
                    "shares: failed to load subscription"
                );
                ShareError::Internal(err)
            })?
            .ok_or_else(|| {
                let err = ShareError::SubscriptionNotFound;
                warn!(
                    %subscription_id,
                    status = err.status_code().as_u16(),
                    "shares: subscription not found"
                );
                err
            })
    }

    /// A share id from another subscription's URL is treated as missing, not
    /// forbidden, to avoid confirming the id exists.
    async fn load_share(
        &self,
        subscription_id: Uuid,
        share_id: Uuid,
    ) -> ShareResult<domain::entities::shares::ShareEntity> {
        let share = self
            .share_repo
            .find_by_id(share_id)
            .await
            .map_err(|err| {
                error!(%share_id, db_error = ?err, "shares: failed to load share");
                ShareError::Internal(err)
            })?
            .ok_or_else(|| {
                let err = ShareError::ShareNotFound;
                warn!(
                    %share_id,
                    status = err.status_code().as_u16(),
                    "shares: share not found"
                );
                err
            })?;

        if share.subscription_id != subscription_id {
            let err = ShareError::ShareNotFound;
            warn!(
                %share_id,
                %subscription_id,
                status = err.status_code().as_u16(),
                "shares: share belongs to another subscription"
            );
            return Err(err);
        }
        Ok(share)
    }

    fn validate_terms(share_percentage: f64, fixed_amount: f64) -> ShareResult<()> {
        if !share_percentage.is_finite() || !(0.0..=100.0).contains(&share_percentage) {
            let err = ShareError::Validation(
                "sharePercentage must be between 0 and 100".to_string(),
            );
            warn!(
                share_percentage,
                status = err.status_code().as_u16(),
                "shares: sharePercentage out of range"
            );
            return Err(err);
        }
        if !fixed_amount.is_finite() || fixed_amount < 0.0 {
            let err =
                ShareError::Validation("fixedAmount must be a non-negative number".to_string());
            warn!(
                fixed_amount,
                status = err.status_code().as_u16(),
                "shares: fixedAmount out of range"
            );
            return Err(err);
        }
        Ok(())
    }

}
