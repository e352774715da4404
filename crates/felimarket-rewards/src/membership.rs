//! # Membership Tiers
//!
//! Derives a member's tier from token balance and experience points.
//!
//! ## Evaluation
//!
//! Tiers are checked from the highest rank down. The first tier whose balance
//! AND experience thresholds are both met wins; the lowest tier of the
//! schedule is the fallback. A large balance with no experience stays Silver.

use crate::constants::*;
use crate::error::{ensure_non_negative, ensure_percentage, Result, RewardError};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;

static DEFAULT_SCHEDULE: Lazy<TierSchedule> = Lazy::new(TierSchedule::default);

/// Membership level, ordered by rank
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipLevel {
    /// Entry level, granted to everyone
    Silver,
    /// Mid level
    Gold,
    /// Top level
    Platinum,
}

impl MembershipLevel {
    /// All levels, lowest rank first
    pub const ALL: [MembershipLevel; 3] = [Self::Silver, Self::Gold, Self::Platinum];

    /// Numeric rank (Silver = 0)
    pub fn rank(&self) -> u8 {
        match self {
            Self::Silver => 0,
            Self::Gold => 1,
            Self::Platinum => 2,
        }
    }

    /// Get level name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Silver => "SILVER",
            Self::Gold => "GOLD",
            Self::Platinum => "PLATINUM",
        }
    }
}

impl fmt::Display for MembershipLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reward parameters a member receives at a given level
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MembershipTier {
    /// Level this tier represents
    pub level: MembershipLevel,

    /// Annual percentage yield on staked tokens (5.4 means 5.4%)
    pub annual_percentage_yield: f64,

    /// Share of each purchase credited back, in percent
    pub cashback_rate: f64,

    /// Display-only list of perks
    pub benefits: Vec<String>,
}

/// Minimums a member must meet to qualify for a tier
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TierThresholds {
    /// Minimum token balance
    pub min_balance: f64,

    /// Minimum experience points
    pub min_experience_points: u64,
}

impl TierThresholds {
    /// Both the balance and the experience minimum are met
    pub fn is_met(&self, balance: f64, experience_points: u64) -> bool {
        balance >= self.min_balance && experience_points >= self.min_experience_points
    }
}

/// One row of a tier schedule
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TierDefinition {
    /// Level this row defines
    pub level: MembershipLevel,

    /// Minimum token balance
    #[serde(default)]
    pub min_balance: f64,

    /// Minimum experience points
    #[serde(default)]
    pub min_experience_points: u64,

    /// Annual percentage yield
    pub annual_percentage_yield: f64,

    /// Cashback rate in percent
    pub cashback_rate: f64,

    /// Perks shown to the member
    #[serde(default)]
    pub benefits: Vec<String>,
}

impl TierDefinition {
    /// Qualification thresholds of this row
    pub fn thresholds(&self) -> TierThresholds {
        TierThresholds {
            min_balance: self.min_balance,
            min_experience_points: self.min_experience_points,
        }
    }

    /// Reward parameters of this row
    pub fn tier(&self) -> MembershipTier {
        MembershipTier {
            level: self.level,
            annual_percentage_yield: self.annual_percentage_yield,
            cashback_rate: self.cashback_rate,
            benefits: self.benefits.clone(),
        }
    }

    fn validate(&self) -> Result<()> {
        let level = self.level;
        ensure_non_negative("min_balance", self.min_balance)
            .and_then(|_| ensure_non_negative("annual_percentage_yield", self.annual_percentage_yield))
            .and_then(|_| ensure_percentage("cashback_rate", self.cashback_rate))
            .map_err(|e| match e {
                RewardError::InvalidInput(msg) => {
                    RewardError::invalid_schedule(format!("{level}: {msg}"))
                }
                other => other,
            })
    }
}

/// How far a member is from the next tier
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TierProgress {
    /// Tier the member holds now
    pub current: MembershipLevel,

    /// Next tier up, `None` at the top
    pub next: Option<MembershipLevel>,

    /// Balance still missing for the next tier
    pub balance_shortfall: f64,

    /// Experience still missing for the next tier
    pub experience_shortfall: u64,
}

/// Validated, ordered list of tier definitions
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TierSchedule {
    /// Lowest rank first
    tiers: Vec<TierDefinition>,
}

impl TierSchedule {
    /// Build a schedule, enforcing ordering and range rules.
    ///
    /// Levels must be strictly ascending, the lowest tier must have zero
    /// thresholds, and thresholds must not decrease as rank increases.
    pub fn new(tiers: Vec<TierDefinition>) -> Result<Self> {
        let Some(base) = tiers.first() else {
            return Err(RewardError::invalid_schedule("schedule has no tiers"));
        };

        if base.min_balance != 0.0 || base.min_experience_points != 0 {
            return Err(RewardError::invalid_schedule(format!(
                "base tier {} must have zero thresholds",
                base.level
            )));
        }

        for tier in &tiers {
            tier.validate()?;
        }

        for pair in tiers.windows(2) {
            let (lower, upper) = (&pair[0], &pair[1]);
            if upper.level <= lower.level {
                return Err(RewardError::invalid_schedule(format!(
                    "{} listed after {}; tiers must be in ascending order without repeats",
                    upper.level, lower.level
                )));
            }
            if upper.min_balance < lower.min_balance {
                return Err(RewardError::invalid_schedule(format!(
                    "{} balance threshold {} is below {} threshold {}",
                    upper.level, upper.min_balance, lower.level, lower.min_balance
                )));
            }
            if upper.min_experience_points < lower.min_experience_points {
                return Err(RewardError::invalid_schedule(format!(
                    "{} experience threshold {} is below {} threshold {}",
                    upper.level,
                    upper.min_experience_points,
                    lower.level,
                    lower.min_experience_points
                )));
            }
        }

        Ok(Self { tiers })
    }

    /// Tier definitions, lowest rank first
    pub fn tiers(&self) -> &[TierDefinition] {
        &self.tiers
    }

    /// Look up the definition for a level
    pub fn get(&self, level: MembershipLevel) -> Option<&TierDefinition> {
        self.tiers.iter().find(|t| t.level == level)
    }

    /// Determine the tier a member qualifies for
    pub fn determine(&self, balance: f64, experience_points: u64) -> Result<MembershipTier> {
        ensure_non_negative("balance", balance)?;

        let definition = self.qualifying(balance, experience_points);
        tracing::debug!(
            balance,
            experience_points,
            level = %definition.level,
            "Determined membership tier"
        );

        Ok(definition.tier())
    }

    /// Current tier plus the shortfall to the next one
    pub fn progress(&self, balance: f64, experience_points: u64) -> Result<TierProgress> {
        ensure_non_negative("balance", balance)?;

        let current = self.qualifying(balance, experience_points);
        let next = self.tiers.iter().find(|t| t.level > current.level);

        Ok(match next {
            Some(next) => TierProgress {
                current: current.level,
                next: Some(next.level),
                balance_shortfall: (next.min_balance - balance).max(0.0),
                experience_shortfall: next.min_experience_points.saturating_sub(experience_points),
            },
            None => TierProgress {
                current: current.level,
                next: None,
                balance_shortfall: 0.0,
                experience_shortfall: 0,
            },
        })
    }

    fn qualifying(&self, balance: f64, experience_points: u64) -> &TierDefinition {
        self.tiers
            .iter()
            .rev()
            .find(|t| t.thresholds().is_met(balance, experience_points))
            .unwrap_or(&self.tiers[0])
    }
}

impl Default for TierSchedule {
    fn default() -> Self {
        Self {
            tiers: vec![
                TierDefinition {
                    level: MembershipLevel::Silver,
                    min_balance: 0.0,
                    min_experience_points: 0,
                    annual_percentage_yield: 3.0,
                    cashback_rate: 5.0,
                    benefits: benefits(&["APY 3.0%", "5% Cashback", "Basic access"]),
                },
                TierDefinition {
                    level: MembershipLevel::Gold,
                    min_balance: GOLD_MIN_BALANCE,
                    min_experience_points: GOLD_MIN_EXPERIENCE,
                    annual_percentage_yield: 5.4,
                    cashback_rate: 10.0,
                    benefits: benefits(&["APY 5.4%", "10% Cashback", "Discounts", "Events"]),
                },
                TierDefinition {
                    level: MembershipLevel::Platinum,
                    min_balance: PLATINUM_MIN_BALANCE,
                    min_experience_points: PLATINUM_MIN_EXPERIENCE,
                    annual_percentage_yield: 7.5,
                    cashback_rate: 15.0,
                    benefits: benefits(&["APY 7.5%", "15% Cashback", "VIP access", "Exclusive NFTs"]),
                },
            ],
        }
    }
}

impl<'de> Deserialize<'de> for TierSchedule {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let tiers = Vec::<TierDefinition>::deserialize(deserializer)?;
        TierSchedule::new(tiers).map_err(serde::de::Error::custom)
    }
}

fn benefits(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Determine a member's tier using the default schedule
pub fn determine_membership_tier(balance: f64, experience_points: u64) -> Result<MembershipTier> {
    DEFAULT_SCHEDULE.determine(balance, experience_points)
}
