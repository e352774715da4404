//! # Felimarket Rewards - Membership, Staking & Cashback
//!
//! Reward economics for the Felimarket platform, kept free of persistence,
//! HTTP and on-chain I/O. Callers hand in plain numbers (token balance,
//! experience points, staked principal) and get plain values back.
//!
//! ## Membership Tiers
//!
//! | Tier | Min Balance | Min XP | APY | Cashback |
//! |------|-------------|--------|-----|----------|
//! | Platinum | 10,000 | 2,000 | 7.5% | 15% |
//! | Gold | 5,000 | 1,000 | 5.4% | 10% |
//! | Silver | - | - | 3.0% | 5% |
//!
//! Both the balance and the experience threshold must be met for a tier.
//! The table above is only the default [`TierSchedule`]; operators can load
//! their own through [`RewardsConfig`].
//!
//! ## Staking Projection
//!
//! ```text
//! daily_rate = apy / 365 / 100
//! daily      = principal * daily_rate
//! monthly    = daily * 30
//! yearly     = principal * apy / 100
//! custom     = daily * horizon_days
//! ```

pub mod cashback;
pub mod config;
pub mod error;
pub mod experience;
pub mod membership;
pub mod staking;

// Re-exports
pub use cashback::{compute_cashback, CashbackQuote};
pub use crate::config::{RewardsConfig, StakingSettings};
pub use error::{Result, RewardError};
pub use experience::{experience_for_transactions, ExperiencePolicy};
pub use membership::{
    determine_membership_tier, MembershipLevel, MembershipTier, TierDefinition, TierProgress,
    TierSchedule, TierThresholds,
};
pub use staking::{project_staking_reward, project_tier_staking_reward, StakeProjection};

/// Reward economics constants
pub mod constants {
    /// Days used to convert an APY into a daily rate
    pub const DAYS_PER_YEAR: u32 = 365;

    /// Days in the fixed "monthly" projection
    pub const DAYS_PER_MONTH: u32 = 30;

    /// Horizon used when a caller does not pick one
    pub const DEFAULT_HORIZON_DAYS: u32 = 30;

    /// Experience awarded per confirmed transaction
    pub const EXPERIENCE_PER_TRANSACTION: u64 = 100;

    /// Decimal places used when rendering reward amounts
    pub const DISPLAY_DECIMALS: usize = 6;

    /// Gold tier minimum token balance
    pub const GOLD_MIN_BALANCE: f64 = 5_000.0;

    /// Gold tier minimum experience points
    pub const GOLD_MIN_EXPERIENCE: u64 = 1_000;

    /// Platinum tier minimum token balance
    pub const PLATINUM_MIN_BALANCE: f64 = 10_000.0;

    /// Platinum tier minimum experience points
    pub const PLATINUM_MIN_EXPERIENCE: u64 = 2_000;
}

pub use constants::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Result, RewardError};
    pub use crate::membership::{MembershipLevel, MembershipTier, TierSchedule};
    pub use crate::staking::StakeProjection;
    pub use crate::{compute_cashback, determine_membership_tier, project_staking_reward};
}
