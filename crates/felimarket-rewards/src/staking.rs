//! # Staking Projection
//!
//! Projects simple-interest staking rewards at a fixed APY.
//!
//! | Horizon | Formula |
//! |---------|---------|
//! | Daily | principal * apy / 365 / 100 |
//! | Monthly | daily * 30 |
//! | Yearly | principal * apy / 100 |
//! | Custom | daily * horizon_days |
//!
//! Values carry full `f64` precision. Rounding for display is left to callers.

use crate::constants::*;
use crate::error::{ensure_non_negative, Result, RewardError};
use crate::membership::MembershipTier;
use serde::{Deserialize, Serialize};

/// Projected rewards for a stake over common horizons
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StakeProjection {
    /// Staked amount
    pub principal: f64,

    /// APY the projection was computed at
    pub annual_percentage_yield: f64,

    /// Length of the custom period in days
    pub horizon_days: u32,

    /// Reward for one day
    pub daily_reward: f64,

    /// Reward for 30 days
    pub monthly_reward: f64,

    /// Reward for a full year
    pub yearly_reward: f64,

    /// Reward for `horizon_days`
    pub custom_period_reward: f64,
}

impl StakeProjection {
    /// Principal plus the custom period reward
    pub fn balance_after_period(&self) -> f64 {
        self.principal + self.custom_period_reward
    }
}

/// Daily rate for an APY expressed in percent
pub fn daily_rate(annual_percentage_yield: f64) -> f64 {
    annual_percentage_yield / DAYS_PER_YEAR as f64 / 100.0
}

/// Project staking rewards for `principal` at `annual_percentage_yield`
pub fn project_staking_reward(
    principal: f64,
    annual_percentage_yield: f64,
    horizon_days: u32,
) -> Result<StakeProjection> {
    ensure_non_negative("principal", principal)?;
    ensure_non_negative("annual_percentage_yield", annual_percentage_yield)?;
    if horizon_days == 0 {
        return Err(RewardError::invalid_input("horizon_days must be positive"));
    }

    let daily_reward = principal * daily_rate(annual_percentage_yield);

    Ok(StakeProjection {
        principal,
        annual_percentage_yield,
        horizon_days,
        daily_reward,
        monthly_reward: daily_reward * DAYS_PER_MONTH as f64,
        yearly_reward: principal * (annual_percentage_yield / 100.0),
        custom_period_reward: daily_reward * horizon_days as f64,
    })
}

/// Project staking rewards at the APY of a membership tier
pub fn project_tier_staking_reward(
    principal: f64,
    tier: &MembershipTier,
    horizon_days: u32,
) -> Result<StakeProjection> {
    project_staking_reward(principal, tier.annual_percentage_yield, horizon_days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::membership::determine_membership_tier;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_gold_projection() {
        let p = project_staking_reward(1_000.0, 5.4, 30).unwrap();

        assert!(approx(p.daily_reward, 0.147945));
        assert!(approx(p.monthly_reward, 4.438356));
        assert!(approx(p.yearly_reward, 54.0));
        assert!(approx(p.custom_period_reward, 4.438356));
    }

    #[test]
    fn test_zero_principal() {
        let p = project_staking_reward(0.0, 5.4, 30).unwrap();

        assert_eq!(p.daily_reward, 0.0);
        assert_eq!(p.monthly_reward, 0.0);
        assert_eq!(p.yearly_reward, 0.0);
        assert_eq!(p.custom_period_reward, 0.0);
    }

    #[test]
    fn test_horizon_identities() {
        let one = project_staking_reward(2_500.0, 7.5, 1).unwrap();
        assert_eq!(one.custom_period_reward, one.daily_reward);

        let year = project_staking_reward(2_500.0, 7.5, 365).unwrap();
        assert!(approx(year.custom_period_reward, year.yearly_reward));
    }

    #[test]
    fn test_zero_horizon_rejected() {
        let result = project_staking_reward(1_000.0, 5.4, 0);
        assert!(matches!(result, Err(RewardError::InvalidInput(_))));
    }

    #[test]
    fn test_negative_inputs_rejected() {
        assert!(project_staking_reward(-1.0, 5.4, 30).is_err());
        assert!(project_staking_reward(1_000.0, -5.4, 30).is_err());
        assert!(project_staking_reward(f64::NAN, 5.4, 30).is_err());
        assert!(project_staking_reward(1_000.0, f64::INFINITY, 30).is_err());
    }

    #[test]
    fn test_tier_projection() {
        let tier = determine_membership_tier(10_000.0, 2_000).unwrap();
        let p = project_tier_staking_reward(10_000.0, &tier, 365).unwrap();

        assert_eq!(p.annual_percentage_yield, 7.5);
        assert!(approx(p.yearly_reward, 750.0));
        assert!(approx(p.balance_after_period(), 10_750.0));
    }
}
