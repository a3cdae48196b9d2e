use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatsModel {
    pub total_subscriptions: u32,
    pub total_shared_subscriptions: u32,
    pub monthly_spend: f64,
    pub monthly_savings: f64,
    pub upcoming_renewals: u32,
}
