//! Calculator configuration.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Defaults applied by callers when a request leaves a parameter out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculatorConfig {
    /// Percentage of balance to risk per trade (1.0 = 1%)
    pub default_risk_percent: Decimal,

    /// Fee rate per side (0.0004 = 0.04%)
    pub default_fee_rate: Decimal,

    /// Leverage multiplier, 1 for spot
    pub default_leverage: Decimal,

    /// Risk percentage above which a warning is logged
    pub max_risk_percent_warning: Decimal,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            default_risk_percent: dec!(1.0),      // 1% per trade
            default_fee_rate: dec!(0.0004),       // 0.04% taker fee
            default_leverage: dec!(1),            // Spot
            max_risk_percent_warning: dec!(5.0),  // Warn above 5%
        }
    }
}

impl CalculatorConfig {
    /// Whether a risk percentage is high enough to deserve a warning.
    pub fn is_aggressive(&self, risk_percent: Decimal) -> bool {
        risk_percent > self.max_risk_percent_warning
    }

    /// Replace defaults with any values supplied by the caller (flags or env).
    pub fn with_overrides(
        mut self,
        risk_percent: Option<Decimal>,
        fee_rate: Option<Decimal>,
        leverage: Option<Decimal>,
    ) -> Self {
        if let Some(risk_percent) = risk_percent {
            self.default_risk_percent = risk_percent;
        }
        if let Some(fee_rate) = fee_rate {
            self.default_fee_rate = fee_rate;
        }
        if let Some(leverage) = leverage {
            self.default_leverage = leverage;
        }
        self
    }
}
