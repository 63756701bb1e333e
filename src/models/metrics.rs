//! Trade-plan metrics: reward, risk/reward ratio, margin and setup score.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{SizingResult, TradeSide};

/// Full analysis of a sized trade with take-profit targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanMetrics {
    /// The sizing this plan is built on
    pub sizing: SizingResult,

    /// Direction inferred from the weighted stop
    pub side: TradeSide,

    /// balance × risk% / 100
    pub risk_amount: Decimal,

    // === Reward ===
    /// Weighted mean of the take-profit plan
    pub weighted_average_take_profit: Decimal,

    /// Price-only profit if the weighted take-profit is reached
    pub gross_win: Decimal,

    /// Price-only loss if the weighted stop is reached
    pub gross_loss: Decimal,

    /// Gross win minus entry and exit fees
    pub net_max_win: Decimal,

    /// Gross loss plus entry and exit fees (the risk amount)
    pub net_max_loss: Decimal,

    /// net_max_win / net_max_loss
    pub risk_reward_ratio: Decimal,

    // === Margin ===
    /// Notional divided by leverage, or the full notional without leverage
    pub required_margin: Decimal,

    /// Required margin is larger than the account balance
    pub margin_exceeds_balance: bool,

    /// Setup quality from 1 to 5 stars
    pub setup_score: u8,
}

impl PlanMetrics {
    /// Format the risk/reward ratio as `1:x.xx`.
    pub fn risk_reward_label(&self) -> String {
        if self.risk_reward_ratio <= Decimal::ZERO {
            return "0:0".to_string();
        }
        format!("1:{:.2}", self.risk_reward_ratio)
    }

    pub fn stars(&self) -> String {
        "*".repeat(self.setup_score as usize)
    }
}

impl std::fmt::Display for PlanMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.sizing)?;
        writeln!(f)?;
        writeln!(f, "--- Trade Plan ({}) ---", self.side.as_str())?;
        writeln!(f, "Risk Amount:        ${}", self.risk_amount)?;
        writeln!(f, "Weighted TP:        {}", self.weighted_average_take_profit)?;
        writeln!(f, "Gross Win:          ${}", self.gross_win)?;
        writeln!(f, "Gross Loss:         ${}", self.gross_loss)?;
        writeln!(f, "Net Max Win:        ${}", self.net_max_win)?;
        writeln!(f, "Net Max Loss:       ${}", self.net_max_loss)?;
        writeln!(f, "Risk/Reward:        {}", self.risk_reward_label())?;
        writeln!(f, "Required Margin:    ${}", self.required_margin)?;
        if self.margin_exceeds_balance {
            writeln!(f, "WARNING: required margin exceeds balance, lower leverage or risk%")?;
        }
        write!(f, "Setup Score:        {} ({}/5)", self.stars(), self.setup_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn metrics(ratio: Decimal, score: u8) -> PlanMetrics {
        PlanMetrics {
            sizing: SizingResult {
                position_size_notional: dec!(1000.00),
                position_quantity: dec!(10.000000),
                weighted_average_stop: dec!(99.00),
                estimated_round_trip_fee: dec!(0.0000),
            },
            side: TradeSide::Long,
            risk_amount: dec!(10),
            weighted_average_take_profit: dec!(103),
            gross_win: dec!(30),
            gross_loss: dec!(10),
            net_max_win: dec!(30),
            net_max_loss: dec!(10),
            risk_reward_ratio: ratio,
            required_margin: dec!(1000),
            margin_exceeds_balance: false,
            setup_score: score,
        }
    }

    #[test]
    fn test_risk_reward_label() {
        assert_eq!(metrics(dec!(3.00), 5).risk_reward_label(), "1:3.00");
        assert_eq!(metrics(dec!(1.5), 3).risk_reward_label(), "1:1.50");
        assert_eq!(metrics(Decimal::ZERO, 1).risk_reward_label(), "0:0");
    }

    #[test]
    fn test_stars() {
        assert_eq!(metrics(dec!(3), 4).stars(), "****");
    }
}
