use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    entities::shares::ShareEntity,
    value_objects::{
        enums::{share_roles::ShareRole, share_statuses::ShareStatus},
        users::UserProfileModel,
    },
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShareModel {
    pub id: Uuid,
    pub subscription_id: Uuid,
    pub user_id: Uuid,
    pub role: ShareRole,
    pub share_percentage: f64,
    pub fixed_amount: f64,
    pub status: ShareStatus,
    pub invited_by: Uuid,
    pub invited_at: DateTime<Utc>,
    pub accepted_at: Option<DateTime<Utc>>,
    pub user: Option<UserProfileModel>,
}

impl ShareModel {
    pub fn from_entity(entity: ShareEntity, user: Option<UserProfileModel>) -> Self {
        Self {
            id: entity.id,
            subscription_id: entity.subscription_id,
            user_id: entity.member_id,
            role: ShareRole::from_str(&entity.role),
            share_percentage: entity.share_percentage,
            fixed_amount: entity.fixed_amount,
            status: ShareStatus::from_str(&entity.status),
            invited_by: entity.invited_by,
            invited_at: entity.invited_at,
            accepted_at: entity.accepted_at,
            user,
        }
    }
}

/// Invite request body: invitee is resolved by email, terms are caller-supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteShareModel {
    pub email: String,
    #[serde(default)]
    pub share_percentage: f64,
    #[serde(default)]
    pub fixed_amount: f64,
}

/// Outcome of the store-side pending-share insert. Duplicate, capacity and
/// allocation-sum checks run inside the store's critical section, never
/// read-then-write in the usecase.
#[derive(Debug, Clone, PartialEq)]
pub enum ShareCommit {
    Created(ShareEntity),
    DuplicateShare,
    CapacityExhausted,
    PercentageOverAllocated,
    FixedAmountOverAllocated,
}

/// Outcome of a compare-and-commit status transition.
#[derive(Debug, Clone, PartialEq)]
pub enum ShareTransition {
    Updated(ShareEntity),
    NotFound,
    InvalidState(ShareStatus),
    CapacityExhausted,
}
