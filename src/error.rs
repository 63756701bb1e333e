//! Error types for sizing and trade-plan analysis.
//!
//! Every variant is a bad-input error: it is deterministic for a given request
//! and will recur until the caller changes the input.

use rust_decimal::Decimal;
use thiserror::Error;

/// Rejection of a sizing request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SizingError {
    #[error("balance must be greater than 0 (got {0})")]
    InvalidBalance(Decimal),

    #[error("risk percent must be in (0, 100] (got {0})")]
    InvalidRiskPercent(Decimal),

    #[error("entry price must be greater than 0 (got {0})")]
    InvalidEntryPrice(Decimal),

    #[error("at least one stop-loss target is required")]
    EmptyStopLossPlan,

    #[error("stop-loss target {index}: price must be greater than 0 (got {price})")]
    InvalidStopLossPrice { index: usize, price: Decimal },

    #[error("stop-loss target {index}: weight must be greater than 0 (got {weight})")]
    InvalidStopLossWeight { index: usize, weight: Decimal },

    #[error("leverage must not be negative (got {0})")]
    InvalidLeverage(Decimal),

    #[error("fee rate must not be negative (got {0})")]
    InvalidFeeRate(Decimal),

    #[error("weighted stop-loss equals entry price and there is no fee buffer")]
    ZeroDistance,

    #[error("inputs are too large to size without overflowing")]
    ArithmeticOverflow,
}

impl SizingError {
    /// Stable snake_case classification for callers rendering the error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidBalance(_) => "invalid_balance",
            Self::InvalidRiskPercent(_) => "invalid_risk_percent",
            Self::InvalidEntryPrice(_) => "invalid_entry_price",
            Self::EmptyStopLossPlan => "empty_stop_loss_plan",
            Self::InvalidStopLossPrice { .. } => "invalid_stop_loss_price",
            Self::InvalidStopLossWeight { .. } => "invalid_stop_loss_weight",
            Self::InvalidLeverage(_) => "invalid_leverage",
            Self::InvalidFeeRate(_) => "invalid_fee_rate",
            Self::ZeroDistance => "zero_distance",
            Self::ArithmeticOverflow => "arithmetic_overflow",
        }
    }

    /// Raised by input validation rather than by the sizing formula.
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::ZeroDistance | Self::ArithmeticOverflow)
    }
}

/// Rejection of a trade-plan analysis.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error(transparent)]
    Sizing(#[from] SizingError),

    #[error("at least one take-profit target is required")]
    EmptyTakeProfitPlan,

    #[error("take-profit target {index}: price must be greater than 0 (got {price})")]
    InvalidTakeProfitPrice { index: usize, price: Decimal },

    #[error("take-profit target {index}: weight must be greater than 0 (got {weight})")]
    InvalidTakeProfitWeight { index: usize, weight: Decimal },

    #[error("weighted stop-loss equals entry price, trade direction is undefined")]
    UndefinedDirection,

    #[error("weighted take-profit {take_profit} is not on the profitable side of entry {entry}")]
    MisplacedTakeProfit { entry: Decimal, take_profit: Decimal },
}

impl PlanError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Sizing(e) => e.code(),
            Self::EmptyTakeProfitPlan => "empty_take_profit_plan",
            Self::InvalidTakeProfitPrice { .. } => "invalid_take_profit_price",
            Self::InvalidTakeProfitWeight { .. } => "invalid_take_profit_weight",
            Self::UndefinedDirection => "undefined_direction",
            Self::MisplacedTakeProfit { .. } => "misplaced_take_profit",
        }
    }
}
