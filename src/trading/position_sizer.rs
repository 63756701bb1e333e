//! Fee-adjusted, risk-based position sizing.
//!
//! Naive sizing (`risk / |entry - stop|`) understates the loss taken at the
//! stop because opening and closing both pay a fee proportional to notional.
//! The per-unit fees at entry and at the weighted stop are folded into the
//! divisor so that price movement plus both fees stays within the risk budget:
//!
//! ```text
//! quantity = risk_amount / (|entry - stop| + entry * fee + stop * fee)
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use tracing::{debug, error};

use crate::error::SizingError;
use crate::models::{SizingRequest, SizingResult, StopLossPlan};

use super::validator::validate;

const NOTIONAL_DP: u32 = 2;
const QUANTITY_DP: u32 = 6;
const STOP_DP: u32 = 2;
const FEE_DP: u32 = 4;

/// Unrounded intermediate values of a sizing computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawSizing {
    pub risk_amount: Decimal,
    pub weighted_stop: Decimal,
    pub distance: Decimal,
    pub quantity: Decimal,
    pub notional: Decimal,
    pub round_trip_fee: Decimal,
}

impl RawSizing {
    pub fn rounded(&self) -> SizingResult {
        SizingResult {
            position_size_notional: round_half_away(self.notional, NOTIONAL_DP),
            position_quantity: round_half_away(self.quantity, QUANTITY_DP),
            weighted_average_stop: round_half_away(self.weighted_stop, STOP_DP),
            estimated_round_trip_fee: round_half_away(self.round_trip_fee, FEE_DP),
        }
    }
}

/// Stateless position sizing engine.
pub struct PositionSizer;

impl PositionSizer {
    /// Size a position so that the loss at the weighted stop, fees included,
    /// does not exceed `balance * risk_percent / 100`.
    ///
    /// `leverage` is validated but does not enter the formula.
    /// Values whose products exceed the `Decimal` range (about 7.9e28) fail with
    /// [`SizingError::ArithmeticOverflow`].
    pub fn compute(request: &SizingRequest) -> Result<SizingResult, SizingError> {
        let raw = Self::compute_raw(request)?;
        let result = raw.rounded();

        debug!(
            notional = %result.position_size_notional,
            quantity = %result.position_quantity,
            weighted_stop = %result.weighted_average_stop,
            round_trip_fee = %result.estimated_round_trip_fee,
            "Position sized"
        );

        Ok(result)
    }

    /// Weighted mean stop price of a plan.
    ///
    /// An all-zero weight sum cannot pass validation; if it is ever seen the
    /// average is reported as zero.
    pub fn weighted_average_stop(plan: &StopLossPlan) -> Result<Decimal, SizingError> {
        match plan.weighted_average()? {
            Some(avg) => Ok(avg),
            None => {
                error!(targets = plan.len(), "Stop-loss weights sum to zero");
                Ok(Decimal::ZERO)
            }
        }
    }

    /// Validate and run the sizing formula without output rounding.
    pub(crate) fn compute_raw(request: &SizingRequest) -> Result<RawSizing, SizingError> {
        validate(request)?;

        let risk_amount = request
            .risk_amount()
            .ok_or(SizingError::ArithmeticOverflow)?;
        let weighted_stop = Self::weighted_average_stop(&request.stop_loss_plan)?;
        let distance = (request.entry_price - weighted_stop).abs();

        // Per-unit fees in price terms
        let fee_at_entry = checked_mul(request.entry_price, request.fee_rate)?;
        let fee_at_stop = checked_mul(weighted_stop, request.fee_rate)?;
        let adjusted_divisor = distance
            .checked_add(fee_at_entry)
            .and_then(|v| v.checked_add(fee_at_stop))
            .ok_or(SizingError::ArithmeticOverflow)?;

        if adjusted_divisor.is_zero() {
            return Err(SizingError::ZeroDistance);
        }

        let quantity = risk_amount
            .checked_div(adjusted_divisor)
            .ok_or(SizingError::ArithmeticOverflow)?;
        let notional = checked_mul(quantity, request.entry_price)?;
        // Entry and exit both charged on the opened notional; display estimate only
        let round_trip_fee = checked_mul(checked_mul(notional, request.fee_rate)?, dec!(2))?;

        Ok(RawSizing {
            risk_amount,
            weighted_stop,
            distance,
            quantity,
            notional,
            round_trip_fee,
        })
    }
}

fn checked_mul(a: Decimal, b: Decimal) -> Result<Decimal, SizingError> {
    a.checked_mul(b).ok_or(SizingError::ArithmeticOverflow)
}

/// Round half away from zero and fix the scale to `dp` digits.
pub(crate) fn round_half_away(value: Decimal, dp: u32) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(dp);
    rounded
}
