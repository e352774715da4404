//! Cashback credited back on purchases.

use crate::error::{ensure_non_negative, ensure_percentage, Result};
use crate::membership::MembershipTier;
use serde::{Deserialize, Serialize};

/// Cashback owed on a single purchase
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CashbackQuote {
    /// Purchase amount before cashback
    pub purchase_amount: f64,

    /// Rate applied, in percent
    pub cashback_rate: f64,

    /// Amount credited back to the member
    pub cashback_amount: f64,

    /// Purchase amount minus cashback
    pub net_cost: f64,
}

/// Compute cashback for a purchase at `cashback_rate` percent
pub fn compute_cashback(purchase_amount: f64, cashback_rate: f64) -> Result<CashbackQuote> {
    ensure_non_negative("purchase_amount", purchase_amount)?;
    ensure_percentage("cashback_rate", cashback_rate)?;

    let cashback_amount = purchase_amount * (cashback_rate / 100.0);

    Ok(CashbackQuote {
        purchase_amount,
        cashback_rate,
        cashback_amount,
        net_cost: purchase_amount - cashback_amount,
    })
}

impl MembershipTier {
    /// Cashback this tier earns on a purchase
    pub fn cashback_for(&self, purchase_amount: f64) -> Result<CashbackQuote> {
        compute_cashback(purchase_amount, self.cashback_rate)
    }
}
