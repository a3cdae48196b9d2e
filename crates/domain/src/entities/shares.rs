use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct ShareEntity {
    pub id: Uuid,
    pub subscription_id: Uuid,
    pub member_id: Uuid,
    pub role: String,
    pub share_percentage: f64,
    pub fixed_amount: f64,
    pub status: String,
    pub invited_by: Uuid,
    pub invited_at: DateTime<Utc>,
    pub accepted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct InsertShareEntity {
    pub subscription_id: Uuid,
    pub member_id: Uuid,
    pub role: String,
    pub share_percentage: f64,
    pub fixed_amount: f64,
    pub invited_by: Uuid,
}
