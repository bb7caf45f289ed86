//! Amount value object for value transfers and notional sizes.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::BasisPoints;
use crate::domain::shared::DomainError;

/// A non-negative amount in the smallest indivisible unit.
///
/// All arithmetic is integer arithmetic; proportional amounts are floored.
/// Serialized as a decimal string so values above `u64::MAX` survive JSON.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Amount(u128);

impl Amount {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Create an amount from base units.
    #[must_use]
    pub const fn new(units: u128) -> Self {
        Self(units)
    }

    /// Get the raw base-unit value.
    #[must_use]
    pub const fn value(&self) -> u128 {
        self.0
    }

    /// Returns true if this amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition.
    #[must_use]
    pub const fn checked_add(self, rhs: Self) -> Option<Self> {
        match self.0.checked_add(rhs.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked subtraction.
    #[must_use]
    pub const fn checked_sub(self, rhs: Self) -> Option<Self> {
        match self.0.checked_sub(rhs.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Saturating subtraction.
    #[must_use]
    pub const fn saturating_sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }

    /// `floor(self * rate / 10_000)`, computed without intermediate overflow.
    ///
    /// Rates above 100% are clamped to 100%, so the result never exceeds `self`.
    #[must_use]
    pub fn bps_portion(self, rate: BasisPoints) -> Self {
        let denominator = u128::from(BasisPoints::FULL.value());
        let bps = u128::from(rate.min(BasisPoints::FULL).value());
        let whole = self.0 / denominator;
        let rest = self.0 % denominator;
        // whole * bps <= u128::MAX / 10_000 * 10_000, rest * bps < 10_000^2
        Self(whole * bps + rest * bps / denominator)
    }

    /// Lossy conversion for metrics, saturating at `u64::MAX`.
    #[must_use]
    pub fn as_u64_saturating(&self) -> u64 {
        u64::try_from(self.0).unwrap_or(u64::MAX)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self(u128::from(value))
    }
}

impl From<u128> for Amount {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

impl FromStr for Amount {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u128>()
            .map(Self)
            .map_err(|e| DomainError::InvalidValue {
                field: "amount".to_string(),
                message: format!("'{s}' is not a non-negative integer: {e}"),
            })
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(AmountVisitor)
    }
}

struct AmountVisitor;

impl Visitor<'_> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative integer or a decimal integer string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Amount, E> {
        Ok(Amount::from(v))
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<Amount, E> {
        Ok(Amount::new(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Amount, E> {
        u64::try_from(v)
            .map(Amount::from)
            .map_err(|_| E::custom(format!("amount cannot be negative: {v}")))
    }

    fn visit_i128<E: de::Error>(self, v: i128) -> Result<Amount, E> {
        u128::try_from(v)
            .map(Amount::new)
            .map_err(|_| E::custom(format!("amount cannot be negative: {v}")))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Amount, E> {
        v.parse().map_err(E::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn amount_bps_portion_floors() {
        assert_eq!(
            Amount::new(15_000).bps_portion(BasisPoints::new(100)),
            Amount::new(150)
        );
        assert_eq!(
            Amount::new(1_999).bps_portion(BasisPoints::new(50)),
            Amount::new(9)
        );
        assert_eq!(
            Amount::new(99).bps_portion(BasisPoints::new(100)),
            Amount::ZERO
        );
    }

    #[test]
    fn amount_bps_portion_handles_max_value() {
        let max = Amount::new(u128::MAX);
        assert_eq!(max.bps_portion(BasisPoints::FULL), max);
        assert!(max.bps_portion(BasisPoints::new(1_000)) < max);
    }

    #[test]
    fn amount_bps_portion_clamps_above_full() {
        let amount = Amount::new(500);
        assert_eq!(amount.bps_portion(BasisPoints::new(20_000)), amount);
    }

    #[test]
    fn amount_checked_arithmetic() {
        assert_eq!(
            Amount::new(5).checked_add(Amount::new(7)),
            Some(Amount::new(12))
        );
        assert_eq!(Amount::new(5).checked_sub(Amount::new(7)), None);
        assert_eq!(Amount::new(u128::MAX).checked_add(Amount::new(1)), None);
        assert_eq!(Amount::new(5).saturating_sub(Amount::new(7)), Amount::ZERO);
    }

    #[test]
    fn amount_serializes_as_string() {
        let json = serde_json::to_string(&Amount::new(u128::MAX)).unwrap();
        assert_eq!(json, format!("\"{}\"", u128::MAX));
    }

    #[test]
    fn amount_deserializes_from_number_or_string() {
        let from_number: Amount = serde_json::from_str("150").unwrap();
        let from_string: Amount = serde_json::from_str("\"150\"").unwrap();
        assert_eq!(from_number, Amount::new(150));
        assert_eq!(from_string, Amount::new(150));
    }

    #[test]
    fn amount_rejects_negative_and_garbage() {
        assert!(serde_json::from_str::<Amount>("-1").is_err());
        assert!(serde_json::from_str::<Amount>("\"12.5\"").is_err());
        assert!("abc".parse::<Amount>().is_err());
    }

    #[test]
    fn amount_as_u64_saturates() {
        assert_eq!(Amount::new(42).as_u64_saturating(), 42);
        assert_eq!(Amount::new(u128::MAX).as_u64_saturating(), u64::MAX);
    }

    proptest! {
        #[test]
        fn bps_portion_matches_wide_formula(units in 0u128..=u128::from(u64::MAX), bps in 0u32..=10_000) {
            let expected = units * u128::from(bps) / 10_000;
            prop_assert_eq!(Amount::new(units).bps_portion(BasisPoints::new(bps)).value(), expected);
        }

        #[test]
        fn bps_portion_never_exceeds_amount(units in any::<u128>(), bps in 0u32..=50_000) {
            prop_assert!(Amount::new(units).bps_portion(BasisPoints::new(bps)) <= Amount::new(units));
        }
    }
}
