use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BillingCycle {
    #[default]
    Monthly,
    Yearly,
    Weekly,
    Daily,
}

impl Display for BillingCycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cycle = match self {
            BillingCycle::Monthly => "monthly",
            BillingCycle::Yearly => "yearly",
            BillingCycle::Weekly => "weekly",
            BillingCycle::Daily => "daily",
        };
        write!(f, "{}", cycle)
    }
}

impl BillingCycle {
    pub fn from_str(value: &str) -> Self {
        match value {
            "yearly" => BillingCycle::Yearly,
            "weekly" => BillingCycle::Weekly,
            "daily" => BillingCycle::Daily,
            _ => BillingCycle::Monthly,
        }
    }
}
