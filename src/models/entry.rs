use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::RewardTier;

/// One recorded check: a handle and the presents it drew.
///
/// Immutable once created; the leaderboard never rewrites an entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardResult {
    pub handle: String,
    pub reward: u64,
    pub timestamp: DateTime<Utc>,
}

impl RewardResult {
    pub fn new(handle: impl Into<String>, reward: u64, timestamp: DateTime<Utc>) -> Self {
        Self {
            handle: handle.into(),
            reward,
            timestamp,
        }
    }

    pub fn tier(&self) -> RewardTier {
        RewardTier::from_reward(self.reward)
    }
}

/// Outcome of one successful check flow.
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub result: RewardResult,
    pub tier: RewardTier,
    pub leaderboard: Vec<RewardResult>,
}
