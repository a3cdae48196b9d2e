use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptionEntity {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub service_url: Option<String>,
    pub category: Option<String>,
    pub monthly_cost: f64,
    pub billing_cycle: String,
    pub max_members: u32,
    pub next_billing_date: DateTime<Utc>,
    pub is_active: bool,
    pub auto_renewal: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct InsertSubscriptionEntity {
    pub owner_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub service_url: Option<String>,
    pub category: Option<String>,
    pub monthly_cost: f64,
    pub billing_cycle: String,
    pub max_members: u32,
    pub next_billing_date: DateTime<Utc>,
    pub auto_renewal: bool,
}

/// Field-wise patch; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateSubscriptionEntity {
    pub name: Option<String>,
    pub description: Option<String>,
    pub service_url: Option<String>,
    pub category: Option<String>,
    pub monthly_cost: Option<f64>,
    pub billing_cycle: Option<String>,
    pub max_members: Option<u32>,
    pub next_billing_date: Option<DateTime<Utc>>,
    pub is_active: Option<bool>,
    pub auto_renewal: Option<bool>,
}
