//! Sizing logic: validation, weighted stops, fee-adjusted position size.

mod config;
mod position_sizer;
mod validator;

pub use config::CalculatorConfig;
pub use position_sizer::PositionSizer;
pub use validator::validate;

pub(crate) use position_sizer::round_half_away;
