//! Money type with exact decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! This type wraps `rust_decimal::Decimal` and fixes the scale at two
//! decimal places, rounding half-to-even wherever a derived value needs it.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of decimal places carried by every monetary value.
pub const MONEY_SCALE: u32 = 2;

/// Errors raised when constructing or validating monetary amounts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    /// The input was not a parseable decimal number.
    #[error("not a valid decimal amount: {0}")]
    Malformed(String),

    /// A negative amount where only non-negative values are allowed.
    #[error("amount must not be negative")]
    Negative,

    /// A zero amount where a strictly positive value is required.
    #[error("amount must be greater than zero")]
    Zero,

    /// More fractional digits than the two the ledger carries.
    #[error("amount cannot have more than two decimal places")]
    TooPrecise,
}

/// A monetary amount with a fixed two-decimal-place scale.
///
/// `Money` is a value type: arithmetic never touches floating point, and any
/// derived computation is rounded half-to-even so results are reproducible
/// bit-for-bit from their inputs. Negative values are representable (signed
/// projections such as the cash balance need them) but every parsing entry
/// point rejects them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(Decimal);

/// Outcome of subtracting one amount from another.
///
/// Subtraction that would go below zero is an explicit outcome rather than a
/// silently signed result, so callers decide the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subtracted {
    /// The subtrahend fit: the wrapped value is what remains.
    Remaining(Money),
    /// The subtrahend exceeded the amount: the wrapped value is the shortfall.
    Negative(Money),
}

impl Money {
    /// The zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates an amount from a raw decimal, rounding half-to-even to two
    /// decimal places.
    #[must_use]
    pub fn new(amount: Decimal) -> Self {
        Self(amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointNearestEven))
    }

    /// Creates an amount from minor units (e.g. cents).
    #[must_use]
    pub fn from_minor_units(units: i64) -> Self {
        Self(Decimal::new(units, MONEY_SCALE))
    }

    /// Returns the underlying decimal value.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the amount is below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Adds two amounts exactly.
    #[must_use]
    pub fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }

    /// Subtracts `other` from `self`, making a would-be-negative result an
    /// explicit [`Subtracted::Negative`] carrying the shortfall.
    #[must_use]
    pub fn subtract(self, other: Self) -> Subtracted {
        let diff = self.0 - other.0;
        if diff.is_sign_negative() && !diff.is_zero() {
            Subtracted::Negative(Self(-diff))
        } else {
            Subtracted::Remaining(Self(diff))
        }
    }

    /// Validates that the amount is strictly positive.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::Zero`] for zero and [`MoneyError::Negative`]
    /// for negative amounts.
    pub fn require_positive(self) -> Result<Self, MoneyError> {
        if self.is_negative() {
            return Err(MoneyError::Negative);
        }
        if self.is_zero() {
            return Err(MoneyError::Zero);
        }
        Ok(self)
    }

    /// Validates that the amount is zero or above.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::Negative`] for negative amounts.
    pub fn require_non_negative(self) -> Result<Self, MoneyError> {
        if self.is_negative() {
            return Err(MoneyError::Negative);
        }
        Ok(self)
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    /// Parses an exact decimal amount.
    ///
    /// Rejects non-numeric input, negative values, and more than two decimal
    /// places. The result is normalized to the canonical two-place scale.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parsed =
            Decimal::from_str(trimmed).map_err(|_| MoneyError::Malformed(trimmed.to_string()))?;

        if parsed.is_sign_negative() && !parsed.is_zero() {
            return Err(MoneyError::Negative);
        }
        if parsed.normalize().scale() > MONEY_SCALE {
            return Err(MoneyError::TooPrecise);
        }

        Ok(Self(parsed.normalize()))
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut canonical = self.0;
        canonical.rescale(MONEY_SCALE);
        write!(f, "{canonical}")
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_and_format_round_trip() {
        let money = Money::from_str("150.50").unwrap();
        assert_eq!(money.amount(), dec!(150.50));
        assert_eq!(money.to_string(), "150.50");

        let whole = Money::from_str("1000").unwrap();
        assert_eq!(whole.to_string(), "1000.00");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(matches!(
            Money::from_str("abc"),
            Err(MoneyError::Malformed(_))
        ));
        assert!(matches!(Money::from_str(""), Err(MoneyError::Malformed(_))));
        assert!(matches!(
            Money::from_str("12,50"),
            Err(MoneyError::Malformed(_))
        ));
    }

    #[test]
    fn test_parse_rejects_negative() {
        assert_eq!(Money::from_str("-10.00"), Err(MoneyError::Negative));
    }

    #[test]
    fn test_parse_rejects_excess_precision() {
        assert_eq!(Money::from_str("10.005"), Err(MoneyError::TooPrecise));
        // Trailing zeros beyond two places are still the same value.
        assert!(Money::from_str("10.500").is_ok());
    }

    #[rstest]
    #[case(dec!(2.345), dec!(2.34))]
    #[case(dec!(2.355), dec!(2.36))]
    #[case(dec!(2.365), dec!(2.36))]
    #[case(dec!(1.005), dec!(1.00))]
    #[case(dec!(1.015), dec!(1.02))]
    fn test_bankers_rounding(#[case] raw: Decimal, #[case] expected: Decimal) {
        assert_eq!(Money::new(raw).amount(), expected);
    }

    #[test]
    fn test_add_is_exact() {
        let a = Money::from_str("0.10").unwrap();
        let b = Money::from_str("0.20").unwrap();
        assert_eq!(a.add(b), Money::from_str("0.30").unwrap());
    }

    #[test]
    fn test_subtract_remaining() {
        let balance = Money::from_minor_units(100_000);
        let payment = Money::from_minor_units(30_000);
        assert_eq!(
            balance.subtract(payment),
            Subtracted::Remaining(Money::from_minor_units(70_000))
        );
    }

    #[test]
    fn test_subtract_to_exactly_zero() {
        let balance = Money::from_minor_units(500);
        assert_eq!(
            balance.subtract(balance),
            Subtracted::Remaining(Money::ZERO)
        );
    }

    #[test]
    fn test_subtract_negative_carries_shortfall() {
        let balance = Money::from_minor_units(200);
        let payment = Money::from_minor_units(350);
        assert_eq!(
            balance.subtract(payment),
            Subtracted::Negative(Money::from_minor_units(150))
        );
    }

    #[test]
    fn test_require_positive() {
        assert!(Money::from_minor_units(1).require_positive().is_ok());
        assert_eq!(Money::ZERO.require_positive(), Err(MoneyError::Zero));
        assert_eq!(
            Money::new(dec!(-1)).require_positive(),
            Err(MoneyError::Negative)
        );
    }

    #[test]
    fn test_require_non_negative() {
        assert!(Money::ZERO.require_non_negative().is_ok());
        assert_eq!(
            Money::new(dec!(-0.01)).require_non_negative(),
            Err(MoneyError::Negative)
        );
    }

    #[test]
    fn test_comparison_ignores_scale() {
        assert_eq!(Money::new(dec!(1)), Money::new(dec!(1.00)));
        assert!(Money::new(dec!(2.50)) > Money::new(dec!(2.49)));
    }

    #[test]
    fn test_sum_folds_exactly() {
        let total: Money = [
            Money::from_str("0.10").unwrap(),
            Money::from_str("0.20").unwrap(),
            Money::from_str("0.30").unwrap(),
        ]
        .into_iter()
        .sum();
        assert_eq!(total, Money::from_str("0.60").unwrap());
    }
}
