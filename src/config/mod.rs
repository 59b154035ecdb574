#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::model::Karma;
use crate::utils::error::{RatingError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What happens when a user casts the opposite of a vote they already cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteChangePolicy {
    /// Treat the attempt as a vote already cast. Nothing is written.
    #[default]
    Reject,
    /// Overwrite the stored direction.
    Replace,
}

impl FromStr for VoteChangePolicy {
    type Err = RatingError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "reject" => Ok(VoteChangePolicy::Reject),
            "replace" => Ok(VoteChangePolicy::Replace),
            other => Err(RatingError::InvalidConfigValueError {
                field: "vote_change_policy".to_string(),
                value: other.to_string(),
                reason: "Valid policies: reject, replace".to_string(),
            }),
        }
    }
}

impl fmt::Display for VoteChangePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoteChangePolicy::Reject => f.write_str("reject"),
            VoteChangePolicy::Replace => f.write_str("replace"),
        }
    }
}

/// Settings consumed by the post-rating service.
/// `min_karma` has no default value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingConfig {
    pub min_karma: Karma,
    #[serde(default)]
    pub vote_change_policy: VoteChangePolicy,
}

impl RatingConfig {
    pub fn new(min_karma: Karma) -> Self {
        Self {
            min_karma,
            vote_change_policy: VoteChangePolicy::default(),
        }
    }

    pub fn with_vote_change_policy(mut self, policy: VoteChangePolicy) -> Self {
        self.vote_change_policy = policy;
        self
    }
}
