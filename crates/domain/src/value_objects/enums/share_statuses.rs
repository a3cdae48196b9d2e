use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ShareStatus {
    #[default]
    Pending,
    Active,
    Declined,
    Removed,
}

impl Display for ShareStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            ShareStatus::Pending => "pending",
            ShareStatus::Active => "active",
            ShareStatus::Declined => "declined",
            ShareStatus::Removed => "removed",
        };
        write!(f, "{}", status)
    }
}

impl ShareStatus {
    pub fn from_str(value: &str) -> Self {
        match value {
            "pending" => ShareStatus::Pending,
            "active" => ShareStatus::Active,
            "declined" => ShareStatus::Declined,
            _ => ShareStatus::Removed,
        }
    }

    /// `declined` and `removed` permit no further transition.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ShareStatus::Declined | ShareStatus::Removed)
    }
}
