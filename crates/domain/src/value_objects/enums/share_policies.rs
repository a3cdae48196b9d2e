use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Governs how far invite-time validation goes. Strict reserves capacity for
/// pending invites and reconciles cost allocations; permissive leaves the
/// owner to self-police beyond structural range checks.
#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SharePolicy {
    #[default]
    Strict,
    Permissive,
}

impl Display for SharePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let policy = match self {
            SharePolicy::Strict => "strict",
            SharePolicy::Permissive => "permissive",
        };
        write!(f, "{}", policy)
    }
}

impl SharePolicy {
    pub fn from_str(value: &str) -> Self {
        match value {
            "permissive" => SharePolicy::Permissive,
            _ => SharePolicy::Strict,
        }
    }
}
