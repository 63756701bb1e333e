//! Sizing request: account state, risk parameters and the stop-loss plan.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::StopLossPlan;

/// Input to a single sizing computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizingRequest {
    /// Account balance in quote currency
    pub balance: Decimal,

    /// Percentage of balance to risk (1.0 = 1%)
    pub risk_percent: Decimal,

    /// Planned entry price
    pub entry_price: Decimal,

    /// Weighted stop-loss exits
    pub stop_loss_plan: StopLossPlan,

    /// Leverage multiplier, validated but not used by the sizing formula
    #[serde(default = "default_leverage")]
    pub leverage: Decimal,

    /// Fee rate charged per side (0.0004 = 0.04%)
    #[serde(default)]
    pub fee_rate: Decimal,
}

fn default_leverage() -> Decimal {
    Decimal::ONE
}

impl SizingRequest {
    pub fn new(
        balance: Decimal,
        risk_percent: Decimal,
        entry_price: Decimal,
        stop_loss_plan: StopLossPlan,
    ) -> Self {
        Self {
            balance,
            risk_percent,
            entry_price,
            stop_loss_plan,
            leverage: Decimal::ONE,
            fee_rate: Decimal::ZERO,
        }
    }

    pub fn with_leverage(mut self, leverage: Decimal) -> Self {
        self.leverage = leverage;
        self
    }

    pub fn with_fee_rate(mut self, fee_rate: Decimal) -> Self {
        self.fee_rate = fee_rate;
        self
    }

    /// Amount of balance the trader accepts to lose.
    ///
    /// Returns `None` if the product overflows.
    pub fn risk_amount(&self) -> Option<Decimal> {
        self.balance
            .checked_mul(self.risk_percent)
            .and_then(|v| v.checked_div(Decimal::ONE_HUNDRED))
    }
}
