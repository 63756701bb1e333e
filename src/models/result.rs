//! Sized position returned by the engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Output of a successful sizing computation, already rounded for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizingResult {
    /// Position value in quote currency (2 dp)
    pub position_size_notional: Decimal,

    /// Units of the asset to buy or sell (6 dp)
    pub position_quantity: Decimal,

    /// Weighted mean of the stop-loss plan (2 dp)
    pub weighted_average_stop: Decimal,

    /// Entry plus exit fee on the opened notional (4 dp)
    pub estimated_round_trip_fee: Decimal,
}

impl std::fmt::Display for SizingResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Position Size:      ${}", self.position_size_notional)?;
        writeln!(f, "Quantity:           {}", self.position_quantity)?;
        writeln!(f, "Weighted Stop:      {}", self.weighted_average_stop)?;
        write!(f, "Round-trip Fee:     ${}", self.estimated_round_trip_fee)
    }
}
