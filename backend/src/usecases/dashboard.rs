use std::sync::Arc;

use chrono::{Duration, Utc};
use domain::{
    repositories::{
        shares::ShareRepository, subscriptions::SubscriptionRepository, users::UserRepository,
    },
    value_objects::{dashboard::DashboardStatsModel, subscriptions::SubscriptionModel},
};
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

use crate::usecases::subscription_view::SubscriptionViewResolver;

const RENEWAL_ALERT_DAYS: i64 = 7;
const RENEWAL_LIST_DAYS: i64 = 30;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

impl DashboardError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        axum::http::StatusCode::INTERNAL_SERVER_ERROR
    }
}

pub type DashboardResult<T> = std::result::Result<T, DashboardError>;

pub struct DashboardUseCase<S, Sh, U>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    Sh: ShareRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    subscription_repo: Arc<S>,
    share_repo: Arc<Sh>,
    view_resolver: Arc<SubscriptionViewResolver<Sh, U>>,
}

impl<S, Sh, U> DashboardUseCase<S, Sh, U>
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

    /// Savings are what the caller avoids paying on subscriptions shared
    /// with them: their percentage of each subscription's monthly cost.
    pub async fn stats(&self, user_id: Uuid) -> DashboardResult<DashboardStatsModel> {
        info!(%user_id, "dashboard: stats requested");

        let owned = self
            .subscription_repo
            .list_by_owner(user_id)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "dashboard: failed to list owned subscriptions");
                DashboardError::Internal(err)
            })?;

        let active_shares = self
            .share_repo
            .list_active_by_member(user_id)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "dashboard: failed to list member shares");
                DashboardError::Internal(err)
            })?;

        let shared_subscriptions = self
            .subscription_repo
            .list_by_ids(active_shares.iter().map(|s| s.subscription_id).collect())
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "dashboard: failed to load shared subscriptions");
                DashboardError::Internal(err)
            })?;

        let monthly_spend: f64 = owned
            .iter()
            .filter(|s| s.is_active)
            .map(|s| s.monthly_cost)
            .sum();

        let monthly_savings: f64 = active_shares
            .iter()
            .filter_map(|share| {
                shared_subscriptions
                    .iter()
                    .find(|s| s.id == share.subscription_id)
                    .map(|s| s.monthly_cost * share.share_percentage / 100.0)
            })
            .sum();

        let now = Utc::now();
        let alert_horizon = now + Duration::days(RENEWAL_ALERT_DAYS);
        let upcoming_renewals = owned
            .iter()
            .filter(|s| {
                s.is_active && s.next_billing_date >= now && s.next_billing_date <= alert_horizon
            })
            .count() as u32;

        Ok(DashboardStatsModel {
            total_subscriptions: owned.len() as u32,
            total_shared_subscriptions: active_shares.len() as u32,
            monthly_spend,
            monthly_savings,
            upcoming_renewals,
        })
    }

    pub async fn upcoming_renewals(
        &self,
        user_id: Uuid,
    ) -> DashboardResult<Vec<SubscriptionModel>> {
        info!(%user_id, "dashboard: renewals requested");

        let owned = self
            .subscription_repo
            .list_by_owner(user_id)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "dashboard: failed to list owned subscriptions");
                DashboardError::Internal(err)
            })?;

        let now = Utc::now();
        let horizon = now + Duration::days(RENEWAL_LIST_DAYS);
        let mut due: Vec<_> = owned
            .into_iter()
            .filter(|s| s.is_active && s.next_billing_date >= now && s.next_billing_date <= horizon)
            .collect();
        due.sort_by_key(|s| s.next_billing_date);

        Ok(self.view_resolver.resolve_all(due).await?)
    }
}
