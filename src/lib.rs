//! Risk-based position sizing.
//!
//! Sizes a position from an account balance, a risk percentage, an entry
//! price, a weighted set of stop-loss targets and a per-side fee rate, so that
//! the loss at the weighted stop (price move plus entry and exit fees) never
//! exceeds the risk budget. Everything here is pure and synchronous.

pub mod error;
pub mod metrics;
pub mod models;
pub mod trading;

pub use error::{PlanError, SizingError};
pub use metrics::TradePlanAnalyzer;
pub use models::{
    PlanMetrics, PriceTarget, SizingRequest, SizingResult, StopLossPlan, StopLossTarget,
    TakeProfitPlan, TradeSide,
};
pub use trading::{CalculatorConfig, PositionSizer};
