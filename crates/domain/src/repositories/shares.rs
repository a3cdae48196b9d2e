use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::{
    entities::shares::{InsertShareEntity, ShareEntity},
    value_objects::{
        enums::share_statuses::ShareStatus,
        shares::{ShareCommit, ShareTransition},
    },
};

#[async_trait]
#[automock]
pub trait ShareRepository {
    async fn find_by_id(&self, share_id: Uuid) -> Result<Option<ShareEntity>>;

    async fn list_by_subscription(&self, subscription_id: Uuid) -> Result<Vec<ShareEntity>>;

    async fn list_active_by_member(&self, member_id: Uuid) -> Result<Vec<ShareEntity>>;

    /// Creates a pending share. The duplicate (non-terminal share for the
    /// same member) check always runs in the store's critical section; with
    /// `strict_allocation` the non-terminal share count is also held under
    /// the subscription's `max_members` and the percentage/fixed-amount sums
    /// across non-terminal shares are kept within 100 / `monthly_cost`, all
    /// under the same write guard.
    async fn insert_pending(
        &self,
        insert_share_entity: InsertShareEntity,
        strict_allocation: bool,
    ) -> Result<ShareCommit>;

    /// Compare-and-commit status transition: applies `to` only when the
    /// current status is in `allowed_from`. With `enforce_capacity` the
    /// active member count (owner included) must stay within the
    /// subscription's `max_members` after the transition. Stamps
    /// `accepted_at` when activating.
    async fn transition(
        &self,
        share_id: Uuid,
        allowed_from: Vec<ShareStatus>,
        to: ShareStatus,
        enforce_capacity: bool,
    ) -> Result<ShareTransition>;
}
