//! Type-safe unit price using decimal arithmetic.
//!
//! Prices are kept as [`Decimal`] so totals never pick up binary floating
//! point drift. On the wire a price is a plain JSON number (`9.99`), which is
//! what the storefront page has always written to local storage. The number
//! is written from the exact decimal text and read back the same way, so any
//! price that fits in a [`Decimal`] survives a save and load unchanged.

use core::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Number;

use crate::CartError;

/// A non-negative price for a single unit of a product.
///
/// Single currency only; the amount is in the currency's standard unit
/// (dollars, not cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct UnitPrice(Decimal);

impl UnitPrice {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new unit price.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NegativePrice`] if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, CartError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(CartError::NegativePrice { price: amount });
        }
        Ok(Self(amount))
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Format for display (e.g., "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        format_money(self.0)
    }
}

/// Format a decimal amount as a dollar string with two decimal places.
///
/// Halves round away from zero, so `0.125` shows as `$0.13`.
#[must_use]
pub fn format_money(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    format!("${rounded}")
}

impl fmt::Display for UnitPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<Decimal> for UnitPrice {
    type Error = CartError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<UnitPrice> for Decimal {
    fn from(price: UnitPrice) -> Self {
        price.0
    }
}

impl Serialize for UnitPrice {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Number::from_str(&self.0.to_string())
            .map_err(<S::Error as serde::ser::Error>::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for UnitPrice {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let number = Number::deserialize(deserializer)?;
        let text = number.to_string();
        let amount = Decimal::from_str(&text)
            .or_else(|_| Decimal::from_scientific(&text))
            .map_err(|e| D::Error::custom(format!("price {text} is out of range: {e}")))?;
        Self::new(amount).map_err(D::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_negative() {
        assert!(matches!(
            UnitPrice::new(Decimal::new(-100, 2)),
            Err(CartError::NegativePrice { .. })
        ));
        assert!(UnitPrice::new(Decimal::ZERO).is_ok());
        assert!(UnitPrice::new(Decimal::new(999, 2)).is_ok());
    }

    #[test]
    fn test_display_formats_two_places() {
        let price = UnitPrice::new(Decimal::new(5, 0)).unwrap();
        assert_eq!(price.display(), "$5.00");

        let price = UnitPrice::new(Decimal::new(999, 2)).unwrap();
        assert_eq!(price.display(), "$9.99");

        assert_eq!(UnitPrice::ZERO.display(), "$0.00");
    }

    #[test]
    fn test_display_rounds_half_away_from_zero() {
        assert_eq!(format_money(Decimal::new(125, 3)), "$0.13");
        assert_eq!(format_money(Decimal::new(135, 3)), "$0.14");
        assert_eq!(format_money(Decimal::new(1_234, 3)), "$1.23");
        assert_eq!(format_money(Decimal::new(5, 0)), "$5.00");
    }

    #[test]
    fn test_serializes_as_number() {
        let price = UnitPrice::new(Decimal::new(999, 2)).unwrap();
        assert_eq!(serde_json::to_string(&price).unwrap(), "9.99");
    }

    #[test]
    fn test_deserialize_keeps_exact_decimal() {
        let price: UnitPrice = serde_json::from_str("9.99").unwrap();
        assert_eq!(price.amount(), Decimal::new(999, 2));

        let price: UnitPrice = serde_json::from_str("2.5").unwrap();
        assert_eq!(price.amount(), Decimal::new(25, 1));

        let price: UnitPrice = serde_json::from_str("12").unwrap();
        assert_eq!(price.amount(), Decimal::new(12, 0));

        let price: UnitPrice = serde_json::from_str("1.5e2").unwrap();
        assert_eq!(price.amount(), Decimal::new(150, 0));
    }

    #[test]
    fn test_high_precision_and_maximum_prices_round_trip() {
        for amount in [
            Decimal::from_str("0.1234567890123456789").unwrap(),
            Decimal::from_str("1234567890.0123456789012345678").unwrap(),
            Decimal::MAX,
            Decimal::new(1, 28),
        ] {
            let price = UnitPrice::new(amount).unwrap();
            let json = serde_json::to_string(&price).unwrap();
            assert_eq!(json, amount.to_string());

            let parsed: UnitPrice = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, price);

            let through_value: UnitPrice =
                serde_json::from_value(serde_json::from_str(&json).unwrap()).unwrap();
            assert_eq!(through_value, price);
        }
    }

    #[test]
    fn test_deserialize_rejects_bad_values() {
        assert!(serde_json::from_str::<UnitPrice>("-1.0").is_err());
        assert!(serde_json::from_str::<UnitPrice>("-3").is_err());
        assert!(serde_json::from_str::<UnitPrice>("\"9.99\"").is_err());
        assert!(serde_json::from_str::<UnitPrice>("null").is_err());
        assert!(serde_json::from_str::<UnitPrice>("1e40").is_err());
    }
}
