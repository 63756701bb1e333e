//! Input validation for sizing requests.
//!
//! Rules are checked in a fixed order and the first violation is returned,
//! so a given request always fails with the same error kind.

use rust_decimal::Decimal;

use crate::error::SizingError;
use crate::models::SizingRequest;

/// Reject any request that cannot produce a numerically sound result.
///
/// A stop price equal to the entry price is accepted here: it only matters
/// after weighted averaging, where the sizing formula guards against it.
pub fn validate(request: &SizingRequest) -> Result<(), SizingError> {
    if request.balance <= Decimal::ZERO {
        return Err(SizingError::InvalidBalance(request.balance));
    }

    if request.risk_percent <= Decimal::ZERO || request.risk_percent > Decimal::ONE_HUNDRED {
        return Err(SizingError::InvalidRiskPercent(request.risk_percent));
    }

    if request.entry_price <= Decimal::ZERO {
        return Err(SizingError::InvalidEntryPrice(request.entry_price));
    }

    if request.stop_loss_plan.is_empty() {
        return Err(SizingError::EmptyStopLossPlan);
    }

    for (index, target) in request.stop_loss_plan.targets().iter().enumerate() {
        if target.price <= Decimal::ZERO {
            return Err(SizingError::InvalidStopLossPrice {
                index,
                price: target.price,
            });
        }
        if target.weight <= Decimal::ZERO {
            return Err(SizingError::InvalidStopLossWeight {
                index,
                weight: target.weight,
            });
        }
    }

    if request.leverage < Decimal::ZERO {
        return Err(SizingError::InvalidLeverage(request.leverage));
    }

    if request.fee_rate < Decimal::ZERO {
        return Err(SizingError::InvalidFeeRate(request.fee_rate));
    }

    Ok(())
}
