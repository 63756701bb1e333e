//! Trade direction inferred from where the stop sits relative to entry.

use std::cmp::Ordering;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of a planned trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeSide {
    Long,
    Short,
}

impl TradeSide {
    /// Long when the stop is below entry, short when above, `None` when they coincide.
    pub fn from_stop(entry_price: Decimal, stop_price: Decimal) -> Option<Self> {
        match stop_price.cmp(&entry_price) {
            Ordering::Less => Some(Self::Long),
            Ordering::Greater => Some(Self::Short),
            Ordering::Equal => None,
        }
    }

    /// Favourable price move from `entry_price` to `exit_price` for this side.
    pub fn favourable_move(&self, entry_price: Decimal, exit_price: Decimal) -> Decimal {
        match self {
            TradeSide::Long => exit_price - entry_price,
            TradeSide::Short => entry_price - exit_price,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TradeSide::Long => "LONG",
            TradeSide::Short => "SHORT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_side_from_stop() {
        assert_eq!(TradeSide::from_stop(dec!(100), dec!(95)), Some(TradeSide::Long));
        assert_eq!(TradeSide::from_stop(dec!(100), dec!(105)), Some(TradeSide::Short));
        assert_eq!(TradeSide::from_stop(dec!(100), dec!(100)), None);
    }

    #[test]
    fn test_favourable_move() {
        assert_eq!(TradeSide::Long.favourable_move(dec!(100), dec!(110)), dec!(10));
        assert_eq!(TradeSide::Short.favourable_move(dec!(100), dec!(90)), dec!(10));
        assert_eq!(TradeSide::Short.favourable_move(dec!(100), dec!(110)), dec!(-10));
    }
}
