//! Trade-plan metrics calculated from a sized position.

mod calculator;

pub use calculator::{setup_score, TradePlanAnalyzer};
