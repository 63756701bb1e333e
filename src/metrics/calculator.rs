//! Trade-plan analysis on top of a sized position: reward, risk/reward ratio,
//! required margin and a 1-5 setup score.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, warn};

use crate::error::{PlanError, SizingError};
use crate::models::{PlanMetrics, SizingRequest, TakeProfitPlan, TradeSide};
use crate::trading::{round_half_away, PositionSizer};

const MONEY_DP: u32 = 2;
const RATIO_DP: u32 = 2;

/// Analyzer for sized trades with take-profit targets.
pub struct TradePlanAnalyzer;

impl TradePlanAnalyzer {
    /// Size the request, then measure the reward against the risk taken.
    ///
    /// Sizing errors are returned unchanged inside [`PlanError::Sizing`].
    /// Leverage only affects the required margin; the position is never capped.
    pub fn analyze(
        request: &SizingRequest,
        take_profits: &TakeProfitPlan,
    ) -> Result<PlanMetrics, PlanError> {
        let raw = PositionSizer::compute_raw(request)?;
        Self::validate_take_profits(take_profits)?;

        let side = TradeSide::from_stop(request.entry_price, raw.weighted_stop)
            .ok_or(PlanError::UndefinedDirection)?;

        let take_profit = take_profits
            .weighted_average()?
            .ok_or(PlanError::EmptyTakeProfitPlan)?;

        let reward = side.favourable_move(request.entry_price, take_profit);
        if reward <= Decimal::ZERO {
            return Err(PlanError::MisplacedTakeProfit {
                entry: request.entry_price,
                take_profit,
            });
        }

        let fee = request.fee_rate;
        let gross_win = mul(raw.quantity, reward)?;
        let gross_loss = mul(raw.quantity, raw.distance)?;
        let win_fees = mul(mul(raw.quantity, add(request.entry_price, take_profit)?)?, fee)?;
        let loss_fees = mul(mul(raw.quantity, add(request.entry_price, raw.weighted_stop)?)?, fee)?;
        let net_max_win = gross_win - win_fees;
        let net_max_loss = add(gross_loss, loss_fees)?;

        let risk_reward_ratio = if net_max_loss > Decimal::ZERO {
            net_max_win
                .checked_div(net_max_loss)
                .ok_or(SizingError::ArithmeticOverflow)?
        } else {
            Decimal::ZERO
        };

        let required_margin = if request.leverage > Decimal::ZERO {
            raw.notional
                .checked_div(request.leverage)
                .ok_or(SizingError::ArithmeticOverflow)?
        } else {
            raw.notional
        };
        let margin_exceeds_balance = required_margin > request.balance;
        if margin_exceeds_balance {
            warn!(
                margin = %required_margin.round_dp(2),
                balance = %request.balance,
                "Required margin exceeds balance"
            );
        }

        let risk_reward_ratio = round_half_away(risk_reward_ratio, RATIO_DP);
        let setup_score = setup_score(risk_reward_ratio, request.risk_percent);

        debug!(
            side = side.as_str(),
            risk_reward = %risk_reward_ratio,
            score = setup_score,
            "Trade plan analyzed"
        );

        Ok(PlanMetrics {
            sizing: raw.rounded(),
            side,
            risk_amount: round_half_away(raw.risk_amount, MONEY_DP),
            weighted_average_take_profit: round_half_away(take_profit, MONEY_DP),
            gross_win: round_half_away(gross_win, MONEY_DP),
            gross_loss: round_half_away(gross_loss, MONEY_DP),
            net_max_win: round_half_away(net_max_win, MONEY_DP),
            net_max_loss: round_half_away(net_max_loss, MONEY_DP),
            risk_reward_ratio,
            required_margin: round_half_away(required_margin, MONEY_DP),
            margin_exceeds_balance,
            setup_score,
        })
    }

    fn validate_take_profits(plan: &TakeProfitPlan) -> Result<(), PlanError> {
        if plan.is_empty() {
            return Err(PlanError::EmptyTakeProfitPlan);
        }

        for (index, target) in plan.targets().iter().enumerate() {
            if target.price <= Decimal::ZERO {
                return Err(PlanError::InvalidTakeProfitPrice {
                    index,
                    price: target.price,
                });
            }
            if target.weight <= Decimal::ZERO {
                return Err(PlanError::InvalidTakeProfitWeight {
                    index,
                    weight: target.weight,
                });
            }
        }

        Ok(())
    }
}

/// Rate a setup from 1 to 5 stars.
///
/// R:R >= 3 scores 5, >= 2 scores 4, >= 1.5 scores 3, otherwise 2.
/// Risking more than 10% costs two stars, more than 5% costs one.
pub fn setup_score(risk_reward_ratio: Decimal, risk_percent: Decimal) -> u8 {
    let mut score: i8 = if risk_reward_ratio >= dec!(3) {
        5
    } else if risk_reward_ratio >= dec!(2) {
        4
    } else if risk_reward_ratio >= dec!(1.5) {
        3
    } else {
        2
    };

    if risk_percent > dec!(10) {
        score -= 2;
    } else if risk_percent > dec!(5) {
        score -= 1;
    }

    score.clamp(1, 5) as u8
}

fn mul(a: Decimal, b: Decimal) -> Result<Decimal, SizingError> {
    a.checked_mul(b).ok_or(SizingError::ArithmeticOverflow)
}

fn add(a: Decimal, b: Decimal) -> Result<Decimal, SizingError> {
    a.checked_add(b).ok_or(SizingError::ArithmeticOverflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PriceTarget, StopLossPlan};
    use test_case::test_case;

    fn request(entry: Decimal, stop: Decimal, fee_rate: Decimal) -> SizingRequest {
        SizingRequest::new(
            dec!(1000),
            dec!(1.0),
            entry,
            StopLossPlan::new(vec![PriceTarget::new(stop, dec!(1))]),
        )
        .with_fee_rate(fee_rate)
    }

    fn take_profits(targets: &[(Decimal, Decimal)]) -> TakeProfitPlan {
        targets
            .iter()
            .map(|&(price, weight)| PriceTarget::new(price, weight))
            .collect()
    }

    #[test]
    fn test_long_without_fees() {
        let metrics = TradePlanAnalyzer::analyze(
            &request(dec!(100), dec!(99), dec!(0)),
            &take_profits(&[(dec!(103), dec!(1))]),
        )
        .unwrap();

        assert_eq!(metrics.side, TradeSide::Long);
        assert_eq!(metrics.risk_amount, dec!(10));
        assert_eq!(metrics.gross_win, dec!(30));
        assert_eq!(metrics.gross_loss, dec!(10));
        assert_eq!(metrics.net_max_loss, dec!(10));
        assert_eq!(metrics.risk_reward_ratio, dec!(3));
        assert_eq!(metrics.required_margin, dec!(1000));
        assert!(!metrics.margin_exceeds_balance);
        assert_eq!(metrics.setup_score, 5);
        assert_eq!(metrics.sizing.position_quantity, dec!(10));
    }

    #[test]
    fn test_fees_reduce_reward_but_not_risk() {
        let metrics = TradePlanAnalyzer::analyze(
            &request(dec!(100), dec!(99), dec!(0.001)),
            &take_profits(&[(dec!(103), dec!(1))]),
        )
        .unwrap();

        // Loss at the stop, fees included, is exactly the risk budget
        assert_eq!(metrics.net_max_loss, dec!(10.00));
        assert_eq!(metrics.gross_win, dec!(25.02));
        assert_eq!(metrics.net_max_win, dec!(23.33));
        assert_eq!(metrics.risk_reward_ratio, dec!(2.33));
        assert_eq!(metrics.setup_score, 4);
    }

    #[test]
    fn test_short_with_split_targets_and_high_risk() {
        let mut req = request(dec!(100), dec!(102), dec!(0));
        req.risk_percent = dec!(6);

        let metrics = TradePlanAnalyzer::analyze(
            &req,
            &take_profits(&[(dec!(96), dec!(1)), (dec!(92), dec!(1))]),
        )
        .unwrap();

        assert_eq!(metrics.side, TradeSide::Short);
        assert_eq!(metrics.weighted_average_take_profit, dec!(94));
        assert_eq!(metrics.gross_win, dec!(180));
        assert_eq!(metrics.risk_reward_ratio, dec!(3));
        // 30 units at 100 on a 1000 balance without leverage
        assert_eq!(metrics.required_margin, dec!(3000));
        assert!(metrics.margin_exceeds_balance);
        assert_eq!(metrics.setup_score, 4);
    }

    #[test_case(dec!(1), dec!(1000) ; "spot")]
    #[test_case(dec!(0), dec!(1000) ; "zero leverage is spot")]
    #[test_case(dec!(10), dec!(100) ; "ten times")]
    fn test_required_margin(leverage: Decimal, margin: Decimal) {
        let req = request(dec!(100), dec!(99), dec!(0)).with_leverage(leverage);
        let metrics =
            TradePlanAnalyzer::analyze(&req, &take_profits(&[(dec!(110), dec!(1))])).unwrap();

        assert_eq!(metrics.required_margin, margin);
        // Sizing itself ignores leverage
        assert_eq!(metrics.sizing.position_size_notional, dec!(1000));
    }

    #[test]
    fn test_take_profit_on_losing_side() {
        let err = TradePlanAnalyzer::analyze(
            &request(dec!(100), dec!(99), dec!(0)),
            &take_profits(&[(dec!(98), dec!(1))]),
        )
        .unwrap_err();

        assert_eq!(
            err,
            PlanError::MisplacedTakeProfit {
                entry: dec!(100),
                take_profit: dec!(98)
            }
        );
    }

    #[test]
    fn test_sizing_errors_propagate() {
        let err = TradePlanAnalyzer::analyze(
            &request(dec!(100), dec!(100), dec!(0)),
            &take_profits(&[(dec!(110), dec!(1))]),
        )
        .unwrap_err();

        assert_eq!(err, PlanError::Sizing(SizingError::ZeroDistance));
    }

    #[test]
    fn test_undefined_direction() {
        let err = TradePlanAnalyzer::analyze(
            &request(dec!(100), dec!(100), dec!(0.001)),
            &take_profits(&[(dec!(110), dec!(1))]),
        )
        .unwrap_err();

        assert_eq!(err, PlanError::UndefinedDirection);
    }

    #[test]
    fn test_take_profit_validation() {
        let req = request(dec!(100), dec!(99), dec!(0));

        assert_eq!(
            TradePlanAnalyzer::analyze(&req, &TakeProfitPlan::default()),
            Err(PlanError::EmptyTakeProfitPlan)
        );
        assert_eq!(
            TradePlanAnalyzer::analyze(&req, &take_profits(&[(dec!(-1), dec!(1))])),
            Err(PlanError::InvalidTakeProfitPrice {
                index: 0,
                price: dec!(-1)
            })
        );
        assert_eq!(
            TradePlanAnalyzer::analyze(
                &req,
                &take_profits(&[(dec!(105), dec!(1)), (dec!(110), dec!(0))])
            ),
            Err(PlanError::InvalidTakeProfitWeight {
                index: 1,
                weight: dec!(0)
            })
        );
    }

    #[test_case(dec!(3), dec!(1), 5 ; "great setup")]
    #[test_case(dec!(2.5), dec!(1), 4 ; "good setup")]
    #[test_case(dec!(1.5), dec!(1), 3 ; "fair setup")]
    #[test_case(dec!(1.2), dec!(1), 2 ; "weak setup")]
    #[test_case(dec!(2), dec!(5), 4 ; "five percent is not penalized")]
    #[test_case(dec!(3), dec!(6), 4 ; "high risk costs one star")]
    #[test_case(dec!(3), dec!(11), 3 ; "very high risk costs two stars")]
    #[test_case(dec!(1), dec!(11), 1 ; "floor at one star")]
    fn test_setup_score(ratio: Decimal, risk_percent: Decimal, expected: u8) {
        assert_eq!(setup_score(ratio, risk_percent), expected);
    }
}
