use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    entities::subscriptions::SubscriptionEntity,
    value_objects::{
        enums::billing_cycles::BillingCycle, shares::ShareModel, users::UserProfileModel,
    },
};

/// API view of a subscription. `current_members`, `total_cost` and
/// `cost_per_member` are derived from the active shares at read time and are
/// never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionModel {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub service_url: Option<String>,
    pub category: Option<String>,
    pub monthly_cost: f64,
    pub billing_cycle: BillingCycle,
    pub max_members: u32,
    pub next_billing_date: DateTime<Utc>,
    pub is_active: bool,
    pub auto_renewal: bool,
    pub created_at: DateTime<Utc>,
    pub owner: Option<UserProfileModel>,
    pub shares: Vec<ShareModel>,
    pub current_members: u32,
    pub total_cost: f64,
    pub cost_per_member: f64,
}

impl SubscriptionModel {
    /// Joins the entity with its shares; `active_members` counts active
    /// shares only, the owner is the implicit `+1`.
    pub fn from_entity(
        entity: SubscriptionEntity,
        owner: Option<UserProfileModel>,
        shares: Vec<ShareModel>,
        active_members: u32,
    ) -> Self {
        let current_members = active_members + 1;
        Self {
            id: entity.id,
            owner_id: entity.owner_id,
            name: entity.name,
            description: entity.description,
            service_url: entity.service_url,
            category: entity.category,
            monthly_cost: entity.monthly_cost,
            billing_cycle: BillingCycle::from_str(&entity.billing_cycle),
            max_members: entity.max_members,
            next_billing_date: entity.next_billing_date,
            is_active: entity.is_active,
            auto_renewal: entity.auto_renewal,
            created_at: entity.created_at,
            owner,
            shares,
            current_members,
            total_cost: entity.monthly_cost,
            cost_per_member: entity.monthly_cost / f64::from(current_members),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertSubscriptionModel {
    pub name: String,
    pub description: Option<String>,
    pub service_url: Option<String>,
    pub category: Option<String>,
    pub monthly_cost: f64,
    #[serde(default)]
    pub billing_cycle: BillingCycle,
    pub max_members: u32,
    pub next_billing_date: DateTime<Utc>,
    #[serde(default = "default_auto_renewal")]
    pub auto_renewal: bool,
}

fn default_auto_renewal() -> bool {
    true
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubscriptionModel {
    pub name: Option<String>,
    pub description: Option<String>,
    pub service_url: Option<String>,
    pub category: Option<String>,
    pub monthly_cost: Option<f64>,
    pub billing_cycle: Option<BillingCycle>,
    pub max_members: Option<u32>,
    pub next_billing_date: Option<DateTime<Utc>>,
    pub is_active: Option<bool>,
    pub auto_renewal: Option<bool>,
}

/// Outcome of the guarded subscription update; the `max_members` floor check
/// happens in the same critical section as the merge.
#[derive(Debug, Clone, PartialEq)]
pub enum SubscriptionUpdate {
    Updated(SubscriptionEntity),
    NotFound,
    MaxMembersBelowActive { active_members: u32 },
}
