//! Type-safe price representation using decimal arithmetic.
//!
//! The bookstore only sells in RMB, so there is no currency field: a
//! [`Price`] is a decimal amount of yuan. On the wire it is a plain JSON
//! number (`59.9`), matching the server's `BigDecimal` fields.

use std::fmt;
use std::ops::{Add, Mul};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An amount in yuan (CNY).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Zero yuan.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from an amount in fen (1/100 yuan).
    #[must_use]
    pub fn from_fen(fen: i64) -> Self {
        Self(Decimal::new(fen, 2))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self {
        Self(self.0 * Decimal::from(rhs))
    }
}

/// Whole amounts print without decimals (`¥12`), everything else with two
/// (`¥12.50`).
impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let amount = self.0.normalize();
        if amount.fract().is_zero() {
            write!(f, "¥{}", amount.trunc())
        } else {
            write!(f, "¥{amount:.2}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_whole_amount() {
        assert_eq!(Price::from_fen(1200).to_string(), "¥12");
    }

    #[test]
    fn test_display_fractional_amount() {
        assert_eq!(Price::from_fen(1250).to_string(), "¥12.50");
        assert_eq!(Price::from_fen(5990).to_string(), "¥59.90");
    }

    #[test]
    fn test_deserializes_json_number() {
        let price: Price = serde_json::from_str("59.9").unwrap_or_default();
        assert_eq!(price, Price::from_fen(5990));
    }

    #[test]
    fn test_arithmetic() {
        let total = Price::from_fen(1250) * 2 + Price::from_fen(100);
        assert_eq!(total, Price::from_fen(2600));
    }
}
