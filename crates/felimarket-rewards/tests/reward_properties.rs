//! Property tests for tier derivation and staking projection

use felimarket_rewards::prelude::*;
use proptest::prelude::*;

fn balance() -> impl Strategy<Value = f64> {
    0.0f64..1_000_000.0
}

fn experience() -> impl Strategy<Value = u64> {
    0u64..100_000
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

proptest! {
    #[test]
    fn prop_tier_is_deterministic(b in balance(), xp in experience()) {
        let first = determine_membership_tier(b, xp).unwrap();
        let second = determine_membership_tier(b, xp).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_more_balance_never_lowers_tier(b in balance(), extra in 0.0f64..100_000.0, xp in experience()) {
        let lower = determine_membership_tier(b, xp).unwrap().level;
        let higher = determine_membership_tier(b + extra, xp).unwrap().level;
        prop_assert!(higher >= lower);
    }

    #[test]
    fn prop_more_experience_never_lowers_tier(b in balance(), xp in experience(), extra in 0u64..10_000) {
        let lower = determine_membership_tier(b, xp).unwrap().level;
        let higher = determine_membership_tier(b, xp + extra).unwrap().level;
        prop_assert!(higher >= lower);
    }

    #[test]
    fn prop_zero_experience_is_always_silver(b in balance()) {
        let tier = determine_membership_tier(b, 0).unwrap();
        prop_assert_eq!(tier.level, MembershipLevel::Silver);
    }

    #[test]
    fn prop_negative_balance_rejected(b in -1_000_000.0f64..-0.001, xp in experience()) {
        let result = determine_membership_tier(b, xp);
        prop_assert!(matches!(result, Err(RewardError::InvalidInput(_))));
    }

    #[test]
    fn prop_yearly_reward_identity(p in 0.0f64..1e9, apy in 0.0f64..100.0) {
        let projection = project_staking_reward(p, apy, 30).unwrap();
        prop_assert_eq!(projection.yearly_reward, p * (apy / 100.0));
    }

    #[test]
    fn prop_horizon_identities(p in 0.0f64..1e9, apy in 0.0f64..100.0) {
        let one_day = project_staking_reward(p, apy, 1).unwrap();
        prop_assert_eq!(one_day.custom_period_reward, one_day.daily_reward);

        let one_year = project_staking_reward(p, apy, 365).unwrap();
        prop_assert!(close(one_year.custom_period_reward, one_year.yearly_reward));
    }

    #[test]
    fn prop_projection_scales_linearly(p in 0.0f64..1e9, apy in 0.0f64..100.0, days in 1u32..3_650) {
        let single = project_staking_reward(p, apy, days).unwrap();
        let double = project_staking_reward(2.0 * p, apy, days).unwrap();

        prop_assert_eq!(double.daily_reward, 2.0 * single.daily_reward);
        prop_assert_eq!(double.monthly_reward, 2.0 * single.monthly_reward);
        prop_assert_eq!(double.yearly_reward, 2.0 * single.yearly_reward);
        prop_assert_eq!(double.custom_period_reward, 2.0 * single.custom_period_reward);
    }

    #[test]
    fn prop_rewards_are_non_negative(p in 0.0f64..1e9, apy in 0.0f64..100.0, days in 1u32..3_650) {
        let projection = project_staking_reward(p, apy, days).unwrap();
        prop_assert!(projection.daily_reward >= 0.0);
        prop_assert!(projection.monthly_reward >= 0.0);
        prop_assert!(projection.yearly_reward >= 0.0);
        prop_assert!(projection.custom_period_reward >= 0.0);
    }

    #[test]
    fn prop_cashback_never_exceeds_purchase(amount in 0.0f64..1e9, rate in 0.0f64..=100.0) {
        let quote = compute_cashback(amount, rate).unwrap();
        prop_assert!(quote.cashback_amount <= amount);
        prop_assert!(quote.net_cost >= 0.0);
    }
}
