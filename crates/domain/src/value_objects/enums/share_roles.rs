use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ShareRole {
    Owner,
    #[default]
    Member,
}

impl Display for ShareRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let role = match self {
            ShareRole::Owner => "owner",
            ShareRole::Member => "member",
        };
        write!(f, "{}", role)
    }
}

impl ShareRole {
    pub fn from_str(value: &str) -> Self {
        match value {
            "owner" => ShareRole::Owner,
            _ => ShareRole::Member,
        }
    }
}
