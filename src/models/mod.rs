//! Value types for sizing requests, results, targets and plan metrics.

mod metrics;
mod request;
mod result;
mod target;
mod trade;

pub use metrics::PlanMetrics;
pub use request::SizingRequest;
pub use result::SizingResult;
pub use target::{PriceTarget, StopLossPlan, StopLossTarget, TakeProfitPlan};
pub use trade::TradeSide;
