//! Monetary amounts
//!
//! All RangerBlock balances, prices and shares are `Money`: an
//! arbitrary-precision decimal that is quantized to exactly two fractional
//! digits on construction. Rounding is half-up (ties move away from zero),
//! so `0.005` becomes `0.01` and `-0.005` becomes `-0.01`.
//!
//! Amounts are bounded by `Money::MAX`, the largest decimal that still has
//! room for two fractional digits. Constructors that could exceed it return
//! `MoneyError::OutOfRange`, and `checked_add`/`checked_sub` report overflow
//! as `None`. The `+` and `-` operators panic on overflow, like integer
//! arithmetic.
//!
//! There is no constructor from `f64`.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;
use thiserror::Error;

/// Number of fractional digits every amount is stored with
pub const MONEY_SCALE: u32 = 2;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Invalid amount '{input}': {reason}")]
    Parse { input: String, reason: String },

    #[error("Amount {0} does not fit in two fractional digits")]
    OutOfRange(Decimal),

    #[error("Scale {0} exceeds the supported precision")]
    InvalidScale(u32),
}

/// A quantized two-place decimal amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Money(Decimal);

impl Money {
    /// Largest representable amount (`792281625142643375935439503.35`)
    pub const MAX: Money = Money(Decimal::from_parts(
        u32::MAX,
        u32::MAX,
        u32::MAX,
        false,
        MONEY_SCALE,
    ));

    /// Smallest representable amount, `-MAX`
    pub const MIN: Money = Money(Decimal::from_parts(
        u32::MAX,
        u32::MAX,
        u32::MAX,
        true,
        MONEY_SCALE,
    ));

    /// The zero amount (`0.00`)
    pub fn zero() -> Self {
        Self(Decimal::new(0, MONEY_SCALE))
    }

    /// Build from a mantissa and scale, e.g. `Money::try_new(1999, 2)` is `19.99`
    pub fn try_new(mantissa: i64, scale: u32) -> Result<Self, MoneyError> {
        let value =
            Decimal::try_new(mantissa, scale).map_err(|_| MoneyError::InvalidScale(scale))?;
        Self::quantize(value)
    }

    /// Build from whole cents
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, MONEY_SCALE))
    }

    /// Round `value` half-up to two places.
    ///
    /// Fails when the rounded value cannot be stored with two fractional
    /// digits, i.e. when it lies outside `MIN..=MAX`.
    pub fn quantize(value: Decimal) -> Result<Self, MoneyError> {
        let mut rounded =
            value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(MONEY_SCALE);
        if rounded.scale() != MONEY_SCALE {
            return Err(MoneyError::OutOfRange(value));
        }
        if rounded.is_zero() {
            rounded.set_sign_positive(true);
        }
        Ok(Self(rounded))
    }

    /// Multiply by `fraction` and quantize the product.
    ///
    /// Meant for fractions in `0..=1`, which can never leave the range. A
    /// product that would is clamped to `MIN` or `MAX`.
    pub fn share(&self, fraction: Decimal) -> Self {
        let negative = self.is_negative() != fraction.is_sign_negative();
        self.0
            .checked_mul(fraction)
            .and_then(|product| Self::quantize(product).ok())
            .unwrap_or(if negative { Self::MIN } else { Self::MAX })
    }

    /// The underlying decimal value
    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    /// Absolute value
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Addition, `None` on overflow
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0
            .checked_add(other.0)
            .and_then(|sum| Self::quantize(sum).ok())
    }

    /// Subtraction that refuses to go below zero
    pub fn checked_sub(self, other: Money) -> Option<Money> {
        self.checked_difference(other)
            .filter(|result| !result.is_negative())
    }

    fn checked_difference(self, other: Money) -> Option<Money> {
        self.0
            .checked_sub(other.0)
            .and_then(|difference| Self::quantize(difference).ok())
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl TryFrom<Decimal> for Money {
    type Error = MoneyError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::quantize(value)
    }
}

impl From<Money> for Decimal {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('€');
        let value = Decimal::from_str(trimmed).map_err(|e| MoneyError::Parse {
            input: s.to_string(),
            reason: e.to_string(),
        })?;
        Self::quantize(value)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        self.checked_add(rhs)
            .unwrap_or_else(|| panic!("Money overflow: {} + {}", self, rhs))
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        self.checked_difference(rhs)
            .unwrap_or_else(|| panic!("Money overflow: {} - {}", self, rhs))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        *self = *self + rhs;
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        *self = *self - rhs;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(s: &str) -> Money {
        s.parse().unwrap()
    }

    #[test]
    fn test_quantize_half_up() {
        assert_eq!(m("0.005"), m("0.01"));
        assert_eq!(m("0.004"), Money::zero());
        assert_eq!(m("1.125"), m("1.13"));
        assert_eq!(m("-0.005"), m("-0.01"));
        assert_eq!(m("2.675").to_string(), "2.68");
    }

    #[test]
    fn test_display_always_two_places() {
        assert_eq!(m("5").to_string(), "5.00");
        assert_eq!(m("19.9").to_string(), "19.90");
        assert_eq!(Money::zero().to_string(), "0.00");
        assert_eq!(m("-0.001").to_string(), "0.00");
    }

    #[test]
    fn test_constructors_agree() {
        assert_eq!(Money::try_new(1999, 2).unwrap(), m("19.99"));
        assert_eq!(Money::try_new(19995, 3).unwrap(), m("20.00"));
        assert_eq!(Money::from_cents(1000), m("10.00"));
        assert_eq!(Money::try_from(Decimal::new(7, 0)).unwrap(), m("7"));
        assert_eq!(Money::from_cents(-250).to_string(), "-2.50");
    }

    #[test]
    fn test_try_new_rejects_unsupported_scale() {
        assert_eq!(Money::try_new(1, 29), Err(MoneyError::InvalidScale(29)));
        assert_eq!(Money::try_new(1, 28).unwrap(), Money::zero());
    }

    #[test]
    fn test_max_keeps_two_places() {
        assert_eq!(Money::MAX.amount().scale(), MONEY_SCALE);
        assert_eq!(Money::MAX.to_string(), "792281625142643375935439503.35");
        assert_eq!(Money::MIN, Money::zero().checked_difference(Money::MAX).unwrap());
        assert_eq!(m("792281625142643375935439503.35"), Money::MAX);
    }

    #[test]
    fn test_out_of_range_amounts_rejected() {
        // Fits in a Decimal, but not with two fractional digits
        let huge = "50000000000000000000000000000";
        assert!(matches!(
            huge.parse::<Money>(),
            Err(MoneyError::OutOfRange(_))
        ));
        assert!(Money::quantize(Decimal::MAX).is_err());
        assert!(Money::quantize(Decimal::MIN).is_err());
        assert!(serde_json::from_str::<Money>(&format!("\"{}\"", huge)).is_err());
    }

    #[test]
    fn test_checked_add_reports_overflow() {
        assert_eq!(Money::MAX.checked_add(m("0.01")), None);
        assert_eq!(Money::MAX.checked_add(Money::MAX), None);
        assert_eq!(Money::MAX.checked_add(Money::zero()), Some(Money::MAX));
        assert_eq!(m("1.10").checked_add(m("2.25")), Some(m("3.35")));
        assert_eq!(Money::MIN.checked_sub(Money::MAX), None);
    }

    #[test]
    #[should_panic(expected = "Money overflow")]
    fn test_operator_overflow_panics() {
        let _ = Money::MAX + m("0.01");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("ten euros".parse::<Money>().is_err());
        assert_eq!(m("€3.50"), Money::from_cents(350));
    }

    #[test]
    fn test_arithmetic() {
        let mut total = Money::zero();
        total += m("7.00");
        total += m("2.50");
        assert_eq!(total, m("9.50"));
        total -= m("0.50");
        assert_eq!(total, m("9.00"));

        let sum: Money = [m("1.10"), m("2.20"), m("3.30")].iter().sum();
        assert_eq!(sum, m("6.60"));

        assert_eq!(m("1.00").checked_sub(m("1.01")), None);
        assert_eq!(m("1.00").checked_sub(m("1.00")), Some(Money::zero()));
    }

    #[test]
    fn test_share_is_quantized() {
        let price = m("19.99");
        assert_eq!(price.share(Decimal::new(1000, 4)), m("2.00"));
        assert_eq!(price.share(Decimal::new(7360, 4)), m("14.71"));
        assert_eq!(Money::MAX.share(Decimal::ONE), Money::MAX);
        assert_eq!(Money::MAX.share(Decimal::TWO), Money::MAX);
        assert_eq!(Money::MAX.share(Decimal::NEGATIVE_ONE), Money::MIN);
    }

    #[test]
    fn test_sign_predicates() {
        assert!(m("0.01").is_positive());
        assert!(!Money::zero().is_positive());
        assert!(!Money::zero().is_negative());
        assert!(m("-0.01").is_negative());
        assert_eq!(m("-3.00").abs(), m("3.00"));
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&m("12.5")).unwrap();
        assert_eq!(json, "\"12.50\"");

        let back: Money = serde_json::from_str("\"0.125\"").unwrap();
        assert_eq!(back, m("0.13"));
    }
}
