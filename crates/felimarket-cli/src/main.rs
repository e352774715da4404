//! Felimarket CLI
//!
//! Evaluates membership tiers, staking projections and cashback against the
//! configured reward schedule.

use anyhow::Context;
use clap::{ArgGroup, Args, Parser, Subcommand};
use felimarket_rewards::{
    compute_cashback, project_staking_reward, CashbackQuote, MembershipTier, RewardsConfig,
    StakeProjection, TierProgress, TierSchedule, DISPLAY_DECIMALS,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "felimarket")]
#[command(version)]
#[command(about = "Felimarket reward economics - tiers, staking and cashback", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Rewards configuration file (TOML)
    #[arg(short, long, global = true, env = "FELIMARKET_CONFIG")]
    config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Determine the membership tier for a balance and experience
    Tier {
        /// Token balance
        #[arg(long, allow_negative_numbers = true)]
        balance: f64,

        /// Experience points
        #[arg(long)]
        xp: u64,
    },

    /// Project staking rewards
    Stake {
        /// Amount staked
        #[arg(long, allow_negative_numbers = true)]
        principal: f64,

        #[command(flatten)]
        source: ApySource,

        /// Custom horizon in days (defaults to the configured horizon)
        #[arg(long)]
        days: Option<u32>,
    },

    /// Quote cashback on a purchase
    Cashback {
        /// Purchase amount
        #[arg(long, allow_negative_numbers = true)]
        amount: f64,

        #[command(flatten)]
        source: RateSource,
    },

    /// Show the active tier schedule
    Tiers,

    /// Print the default configuration as TOML
    Config,
}

/// Member data used to pick a tier from the schedule
#[derive(Args, Debug)]
struct MemberArgs {
    /// Token balance used to pick the member's tier
    #[arg(long, requires = "xp", allow_negative_numbers = true)]
    balance: Option<f64>,

    /// Experience points used to pick the member's tier
    #[arg(long, requires = "balance")]
    xp: Option<u64>,
}

impl MemberArgs {
    fn tier(&self, schedule: &TierSchedule) -> anyhow::Result<Option<MembershipTier>> {
        match (self.balance, self.xp) {
            (Some(balance), Some(xp)) => Ok(Some(schedule.determine(balance, xp)?)),
            _ => Ok(None),
        }
    }
}

/// Either an explicit APY or the member data to derive it from
#[derive(Args, Debug)]
#[command(group(ArgGroup::new("apy_source").required(true).args(["apy", "balance"])))]
struct ApySource {
    /// Annual percentage yield in percent
    #[arg(long, allow_negative_numbers = true)]
    apy: Option<f64>,

    #[command(flatten)]
    member: MemberArgs,
}

/// Either an explicit cashback rate or the member data to derive it from
#[derive(Args, Debug)]
#[command(group(ArgGroup::new("rate_source").required(true).args(["rate", "balance"])))]
struct RateSource {
    /// Cashback rate in percent
    #[arg(long, allow_negative_numbers = true)]
    rate: Option<f64>,

    #[command(flatten)]
    member: MemberArgs,
}

#[derive(Serialize)]
struct TierReport {
    tier: MembershipTier,
    progress: TierProgress,
}

#[derive(Serialize)]
struct StakeReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    tier: Option<MembershipTier>,
    projection: StakeProjection,
}

#[derive(Serialize)]
struct CashbackReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    tier: Option<MembershipTier>,
    quote: CashbackQuote,
}

fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false),
        )
        .init();
}

fn amount(value: f64) -> String {
    format!("{:.*}", DISPLAY_DECIMALS, value)
}

fn render_tier(tier: &MembershipTier) -> String {
    let mut out = format!(
        "Tier: {}\nAPY: {}%\nCashback: {}%\nBenefits:\n",
        tier.level, tier.annual_percentage_yield, tier.cashback_rate
    );
    for benefit in &tier.benefits {
        out.push_str(&format!("  - {}\n", benefit));
    }
    out
}

fn render_progress(progress: &TierProgress) -> String {
    match progress.next {
        Some(next) => format!(
            "Next tier: {} (needs {} more balance, {} more XP)\n",
            next,
            amount(progress.balance_shortfall),
            progress.experience_shortfall
        ),
        None => "Next tier: none (top tier reached)\n".to_string(),
    }
}

fn render_projection(p: &StakeProjection) -> String {
    format!(
        "Principal: {}\nAPY: {}%\nDaily reward: {}\nMonthly reward (30d): {}\nYearly reward: {}\nReward over {} days: {}\n",
        amount(p.principal),
        p.annual_percentage_yield,
        amount(p.daily_reward),
        amount(p.monthly_reward),
        amount(p.yearly_reward),
        p.horizon_days,
        amount(p.custom_period_reward),
    )
}

fn render_cashback(q: &CashbackQuote) -> String {
    format!(
        "Purchase: {}\nCashback rate: {}%\nCashback: {}\nNet cost: {}\n",
        amount(q.purchase_amount),
        q.cashback_rate,
        amount(q.cashback_amount),
        amount(q.net_cost),
    )
}

fn render_schedule(schedule: &TierSchedule) -> String {
    let mut out = String::new();
    for t in schedule.tiers() {
        out.push_str(&format!(
            "{:<9} balance >= {:<12} xp >= {:<8} apy {:>5}%  cashback {:>5}%\n",
            t.level.name(),
            t.min_balance,
            t.min_experience_points,
            t.annual_percentage_yield,
            t.cashback_rate
        ));
    }
    out
}

fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce() -> String) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print!("{}", text());
    }
    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = RewardsConfig::load(cli.config.as_deref()).context("failed to load rewards config")?;
    let schedule = &config.tiers;

    match cli.command {
        Commands::Tier { balance, xp } => {
            let report = TierReport {
                tier: schedule.determine(balance, xp)?,
                progress: schedule.progress(balance, xp)?,
            };
            emit(cli.json, &report, || {
                render_tier(&report.tier) + &render_progress(&report.progress)
            })?;
        }

        Commands::Stake { principal, source, days } => {
            let tier = source.member.tier(schedule)?;
            let apy = match (&tier, source.apy) {
                (Some(tier), _) => tier.annual_percentage_yield,
                (None, Some(apy)) => apy,
                (None, None) => anyhow::bail!("either --apy or --balance with --xp is required"),
            };
            let days = days.unwrap_or(config.staking.default_horizon_days);

            tracing::debug!(principal, apy, days, "Projecting staking reward");
            let report = StakeReport {
                projection: project_staking_reward(principal, apy, days)?,
                tier,
            };
            emit(cli.json, &report, || {
                let mut out = String::new();
                if let Some(tier) = &report.tier {
                    out.push_str(&format!("Tier: {}\n", tier.level));
                }
                out + &render_projection(&report.projection)
            })?;
        }

        Commands::Cashback { amount: purchase, source } => {
            let tier = source.member.tier(schedule)?;
            let quote = match (&tier, source.rate) {
                (Some(tier), _) => tier.cashback_for(purchase)?,
                (None, Some(r)) => compute_cashback(purchase, r)?,
                (None, None) => anyhow::bail!("either --rate or --balance with --xp is required"),
            };
            let report = CashbackReport { tier, quote };
            emit(cli.json, &report, || {
                let mut out = String::new();
                if let Some(tier) = &report.tier {
                    out.push_str(&format!("Tier: {}\n", tier.level));
                }
                out + &render_cashback(&report.quote)
            })?;
        }

        Commands::Tiers => {
            emit(cli.json, schedule, || render_schedule(schedule))?;
        }

        Commands::Config => {
            print!("{}", RewardsConfig::default().to_toml_string()?);
        }
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(cli)
}
