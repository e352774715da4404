//! Experience points earned from platform activity.

use crate::constants::EXPERIENCE_PER_TRANSACTION;
use serde::{Deserialize, Serialize};

/// How activity converts into experience points
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperiencePolicy {
    /// Points awarded per confirmed transaction
    #[serde(default = "default_points_per_transaction")]
    pub points_per_transaction: u64,
}

fn default_points_per_transaction() -> u64 {
    EXPERIENCE_PER_TRANSACTION
}

impl Default for ExperiencePolicy {
    fn default() -> Self {
        Self {
            points_per_transaction: default_points_per_transaction(),
        }
    }
}

impl ExperiencePolicy {
    /// Experience for `transaction_count` confirmed transactions
    pub fn experience_for(&self, transaction_count: u64) -> u64 {
        experience_for_transactions(transaction_count, self.points_per_transaction)
    }

    /// New total after recording `new_transactions` on top of `current`
    pub fn award(&self, current: u64, new_transactions: u64) -> u64 {
        current.saturating_add(self.experience_for(new_transactions))
    }
}

/// Experience for a transaction count, saturating at `u64::MAX`
pub fn experience_for_transactions(transaction_count: u64, points_per_transaction: u64) -> u64 {
    transaction_count.saturating_mul(points_per_transaction)
}
