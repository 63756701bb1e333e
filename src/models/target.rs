//! Weighted price targets used for stop-loss and take-profit plans.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::SizingError;

/// One exit point and the relative share of the position assumed to close there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceTarget {
    /// Exit price
    pub price: Decimal,

    /// Relative weight (weights need not sum to 1)
    pub weight: Decimal,
}

impl PriceTarget {
    pub fn new(price: Decimal, weight: Decimal) -> Self {
        Self { price, weight }
    }
}

/// A stop-loss exit point.
pub type StopLossTarget = PriceTarget;

/// An ordered set of stop-loss targets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StopLossPlan(Vec<StopLossTarget>);

/// An ordered set of take-profit targets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TakeProfitPlan(Vec<PriceTarget>);

macro_rules! target_plan {
    ($plan:ident) => {
        impl $plan {
            pub fn new(targets: Vec<PriceTarget>) -> Self {
                Self(targets)
            }

            pub fn targets(&self) -> &[PriceTarget] {
                &self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            pub fn len(&self) -> usize {
                self.0.len()
            }

            /// Weighted mean price of the plan, `None` when the weights sum to zero.
            pub fn weighted_average(&self) -> Result<Option<Decimal>, SizingError> {
                weighted_average(&self.0)
            }
        }

        impl From<Vec<PriceTarget>> for $plan {
            fn from(targets: Vec<PriceTarget>) -> Self {
                Self(targets)
            }
        }

        impl FromIterator<PriceTarget> for $plan {
            fn from_iter<I: IntoIterator<Item = PriceTarget>>(iter: I) -> Self {
                Self(iter.into_iter().collect())
            }
        }
    };
}

target_plan!(StopLossPlan);
target_plan!(TakeProfitPlan);

/// Σ(price × weight) / Σ(weight).
fn weighted_average(targets: &[PriceTarget]) -> Result<Option<Decimal>, SizingError> {
    let mut weighted_sum = Decimal::ZERO;
    let mut total_weight = Decimal::ZERO;

    for target in targets {
        let product = target
            .price
            .checked_mul(target.weight)
            .ok_or(SizingError::ArithmeticOverflow)?;
        weighted_sum = weighted_sum
            .checked_add(product)
            .ok_or(SizingError::ArithmeticOverflow)?;
        total_weight = total_weight
            .checked_add(target.weight)
            .ok_or(SizingError::ArithmeticOverflow)?;
    }

    if total_weight.is_zero() {
        return Ok(None);
    }

    weighted_sum
        .checked_div(total_weight)
        .map(Some)
        .ok_or(SizingError::ArithmeticOverflow)
}
