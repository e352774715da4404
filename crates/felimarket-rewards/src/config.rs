//! Rewards configuration
//!
//! Loaded from a TOML file with `FELIMARKET__*` environment overrides, e.g.
//! `FELIMARKET__STAKING__DEFAULT_HORIZON_DAYS=90`.
//!
//! ```toml
//! [staking]
//! default_horizon_days = 30
//!
//! [experience]
//! points_per_transaction = 100
//!
//! [[tiers]]
//! level = "silver"
//! annual_percentage_yield = 3.0
//! cashback_rate = 5.0
//! benefits = ["APY 3.0%", "5% Cashback", "Basic access"]
//! ```

use crate::constants::DEFAULT_HORIZON_DAYS;
use crate::error::{Result, RewardError};
use crate::experience::ExperiencePolicy;
use crate::membership::{TierDefinition, TierSchedule};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "FELIMARKET";

/// Complete rewards configuration
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RewardsConfig {
    /// Staking projection settings
    #[serde(default)]
    pub staking: StakingSettings,

    /// Experience accrual
    #[serde(default)]
    pub experience: ExperiencePolicy,

    /// Tier schedule, lowest rank first
    #[serde(default)]
    pub tiers: TierSchedule,
}

/// Staking projection settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StakingSettings {
    /// Horizon used when the caller gives none
    #[serde(default = "default_horizon_days")]
    pub default_horizon_days: u32,
}

fn default_horizon_days() -> u32 {
    DEFAULT_HORIZON_DAYS
}

impl Default for StakingSettings {
    fn default() -> Self {
        Self {
            default_horizon_days: default_horizon_days(),
        }
    }
}

/// On-disk shape; the tier list is validated after parsing
#[derive(Deserialize)]
struct RewardsFile {
    #[serde(default)]
    staking: StakingSettings,

    #[serde(default)]
    experience: ExperiencePolicy,

    #[serde(default)]
    tiers: Option<Vec<TierDefinition>>,
}

impl RewardsFile {
    fn into_config(self) -> Result<RewardsConfig> {
        let tiers = match self.tiers {
            Some(tiers) => TierSchedule::new(tiers)?,
            None => TierSchedule::default(),
        };
        let config = RewardsConfig {
            staking: self.staking,
            experience: self.experience,
            tiers,
        };
        config.validate()?;
        Ok(config)
    }
}

impl RewardsConfig {
    /// Load configuration from an optional TOML file plus environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = ::config::Config::builder();

        if let Some(path) = path {
            if !path.exists() {
                return Err(RewardError::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            tracing::info!(path = %path.display(), "Loading rewards config");
            builder = builder.add_source(
                ::config::File::new(&path.to_string_lossy(), ::config::FileFormat::Toml)
                    .required(true),
            );
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let file: RewardsFile = builder.build()?.try_deserialize()?;
        file.into_config()
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: RewardsFile =
            toml::from_str(content).map_err(|e| RewardError::Config(e.to_string()))?;
        file.into_config()
    }

    /// Render configuration as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| RewardError::Config(e.to_string()))
    }

    /// Check settings not covered by [`TierSchedule`] validation
    pub fn validate(&self) -> Result<()> {
        if self.staking.default_horizon_days == 0 {
            return Err(RewardError::Config(
                "staking.default_horizon_days must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::membership::MembershipLevel;

    #[test]
    fn test_default_config() {
        let cfg = RewardsConfig::default();
        assert_eq!(cfg.staking.default_horizon_days, 30);
        assert_eq!(cfg.experience.points_per_transaction, 100);
        assert_eq!(cfg.tiers.tiers().len(), 3);
    }

    #[test]
    fn test_toml_round_trip() {
        let cfg = RewardsConfig::default();
        let text = cfg.to_toml_string().unwrap();
        assert!(text.contains("[[tiers]]"));

        let parsed = RewardsConfig::from_toml_str(&text).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let cfg = RewardsConfig::from_toml_str("[staking]\ndefault_horizon_days = 90\n").unwrap();
        assert_eq!(cfg.staking.default_horizon_days, 90);
        assert_eq!(cfg.tiers, TierSchedule::default());
    }

    #[test]
    fn test_custom_tiers_from_toml() {
        let text = r#"
[[tiers]]
level = "silver"
annual_percentage_yield = 2.0
cashback_rate = 1.0

[[tiers]]
level = "platinum"
min_balance = 50000
min_experience_points = 5000
annual_percentage_yield = 9.0
cashback_rate = 20.0
benefits = ["Concierge"]
"#;
        let cfg = RewardsConfig::from_toml_str(text).unwrap();
        let tier = cfg.tiers.determine(60_000.0, 5_000).unwrap();
        assert_eq!(tier.level, MembershipLevel::Platinum);
        assert_eq!(tier.benefits, vec!["Concierge"]);

        let tier = cfg.tiers.determine(10_000.0, 2_000).unwrap();
        assert_eq!(tier.level, MembershipLevel::Silver);
    }

    #[test]
    fn test_invalid_tiers_rejected() {
        let text = r#"
[[tiers]]
level = "silver"
annual_percentage_yield = 3.0
cashback_rate = 5.0

[[tiers]]
level = "gold"
min_balance = 5000
min_experience_points = 1000
annual_percentage_yield = 5.4
cashback_rate = 150.0
"#;
        let err = RewardsConfig::from_toml_str(text).unwrap_err();
        assert!(matches!(err, RewardError::InvalidSchedule(_)));
        assert_eq!(err.code(), 1002);
    }

    #[test]
    fn test_base_tier_thresholds_rejected_as_schedule_error() {
        let text = r#"
[[tiers]]
level = "silver"
min_balance = 1
annual_percentage_yield = 3.0
cashback_rate = 5.0
"#;
        assert!(matches!(
            RewardsConfig::from_toml_str(text),
            Err(RewardError::InvalidSchedule(_))
        ));
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let result = RewardsConfig::from_toml_str("[[tiers]]\nlevel = \"diamond\"\n");
        assert!(matches!(result, Err(RewardError::Config(_))));
    }

    #[test]
    fn test_zero_horizon_rejected() {
        let result = RewardsConfig::from_toml_str("[staking]\ndefault_horizon_days = 0\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file() {
        let result = RewardsConfig::load(Some(Path::new("/nonexistent/felimarket.toml")));
        assert!(matches!(result, Err(RewardError::Config(_))));
    }
}
