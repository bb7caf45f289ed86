//! Tiered fee table.

use serde::{Deserialize, Serialize};

use super::errors::FeeScheduleError;
use crate::domain::shared::{Amount, BasisPoints};

/// Maximum fee rate accepted anywhere (10%).
pub const MAX_FEE_RATE: BasisPoints = BasisPoints::new(1_000);

/// A fee tier: amounts at or above `min_amount` pay `fee_rate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeBracket {
    /// Inclusive lower bound of the tier.
    pub min_amount: Amount,
    /// Fee rate for the tier.
    pub fee_rate: BasisPoints,
}

impl FeeBracket {
    /// Create a bracket.
    #[must_use]
    pub const fn new(min_amount: Amount, fee_rate: BasisPoints) -> Self {
        Self {
            min_amount,
            fee_rate,
        }
    }
}

/// Brackets ordered by strictly increasing `min_amount`.
///
/// Mutation is stack-like: append at the tail, pop from the tail.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeeTierTable {
    brackets: Vec<FeeBracket>,
}

impl FeeTierTable {
    /// Create an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            brackets: Vec::new(),
        }
    }

    /// Build a table by appending each bracket in order.
    pub fn from_brackets(
        brackets: impl IntoIterator<Item = FeeBracket>,
    ) -> Result<Self, FeeScheduleError> {
        let mut table = Self::new();
        for bracket in brackets {
            table.append(bracket)?;
        }
        Ok(table)
    }

    /// Rate of the bracket with the greatest `min_amount <= amount`, or zero.
    #[must_use]
    pub fn resolve(&self, amount: Amount) -> BasisPoints {
        self.brackets
            .iter()
            .rev()
            .find(|bracket| bracket.min_amount <= amount)
            .map_or(BasisPoints::ZERO, |bracket| bracket.fee_rate)
    }

    /// Append a bracket at the tail.
    pub fn append(&mut self, bracket: FeeBracket) -> Result<(), FeeScheduleError> {
        if bracket.fee_rate > MAX_FEE_RATE {
            return Err(FeeScheduleError::FeeTooHigh {
                rate: bracket.fee_rate,
                max: MAX_FEE_RATE,
            });
        }
        if let Some(tail) = self.brackets.last() {
            if bracket.min_amount <= tail.min_amount {
                return Err(FeeScheduleError::BracketOrderViolation {
                    min_amount: bracket.min_amount,
                    tail_min_amount: tail.min_amount,
                });
            }
        }
        self.brackets.push(bracket);
        Ok(())
    }

    /// Remove and return the tail bracket.
    pub fn pop_last(&mut self) -> Result<FeeBracket, FeeScheduleError> {
        self.brackets
            .pop()
            .ok_or(FeeScheduleError::EmptyBracketTable)
    }

    /// All brackets in ascending order.
    #[must_use]
    pub fn brackets(&self) -> &[FeeBracket] {
        &self.brackets
    }

    /// Number of brackets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.brackets.len()
    }

    /// Returns true if the table has no brackets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.brackets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_case::test_case;

    fn bracket(min: u128, bps: u32) -> FeeBracket {
        FeeBracket::new(Amount::new(min), BasisPoints::new(bps))
    }

    fn standard_table() -> FeeTierTable {
        FeeTierTable::from_brackets([bracket(0, 0), bracket(1000, 50), bracket(10_000, 100)])
            .unwrap()
    }

    #[test_case(0, 0 ; "zero amount")]
    #[test_case(500, 0 ; "inside first tier")]
    #[test_case(999, 0 ; "just below second tier")]
    #[test_case(1000, 50 ; "exactly second tier")]
    #[test_case(9_999, 50 ; "just below third tier")]
    #[test_case(10_000, 100 ; "exactly third tier")]
    #[test_case(15_000, 100 ; "above top tier")]
    fn resolve_standard_table(amount: u128, expected_bps: u32) {
        assert_eq!(
            standard_table().resolve(Amount::new(amount)),
            BasisPoints::new(expected_bps)
        );
    }

    #[test]
    fn resolve_empty_table_is_zero() {
        assert_eq!(FeeTierTable::new().resolve(Amount::new(1_000_000)), BasisPoints::ZERO);
    }

    #[test]
    fn resolve_below_smallest_threshold_is_zero() {
        let table = FeeTierTable::from_brackets([bracket(100, 30)]).unwrap();
        assert_eq!(table.resolve(Amount::new(99)), BasisPoints::ZERO);
        assert_eq!(table.resolve(Amount::new(100)), BasisPoints::new(30));
    }

    #[test]
    fn append_rejects_fee_above_cap() {
        let mut table = FeeTierTable::new();
        assert_eq!(
            table.append(bracket(0, 1001)),
            Err(FeeScheduleError::FeeTooHigh {
                rate: BasisPoints::new(1001),
                max: MAX_FEE_RATE,
            })
        );
        assert!(table.append(bracket(0, 1000)).is_ok());
    }

    #[test]
    fn append_rejects_equal_threshold() {
        let mut table = standard_table();
        let err = table.append(bracket(10_000, 200)).unwrap_err();
        assert!(matches!(err, FeeScheduleError::BracketOrderViolation { .. }));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn append_rejects_lower_threshold() {
        let mut table = standard_table();
        assert!(table.append(bracket(5, 10)).is_err());
    }

    #[test]
    fn pop_last_returns_tail_then_rejects_when_empty() {
        let mut table = standard_table();
        assert_eq!(table.pop_last(), Ok(bracket(10_000, 100)));
        assert_eq!(table.pop_last(), Ok(bracket(1000, 50)));
        assert_eq!(table.pop_last(), Ok(bracket(0, 0)));
        assert_eq!(table.pop_last(), Err(FeeScheduleError::EmptyBracketTable));
        assert!(table.is_empty());
    }

    #[test]
    fn pop_then_append_lower_threshold() {
        let mut table = standard_table();
        table.pop_last().unwrap();
        assert!(table.append(bracket(5_000, 75)).is_ok());
        assert_eq!(table.resolve(Amount::new(15_000)), BasisPoints::new(75));
    }

    #[test]
    fn from_brackets_rejects_unordered_input() {
        assert!(FeeTierTable::from_brackets([bracket(100, 10), bracket(50, 20)]).is_err());
    }

    proptest! {
        #[test]
        fn resolve_is_monotonic_for_increasing_rates(
            steps in proptest::collection::vec((1u128..10_000, 0u32..=100), 1..10),
            a in 0u128..200_000,
            b in 0u128..200_000,
        ) {
            let mut table = FeeTierTable::new();
            let mut threshold = 0u128;
            let mut rate = 0u32;
            for (gap, bump) in steps {
                threshold += gap;
                rate = (rate + bump).min(1_000);
                table.append(bracket(threshold, rate)).unwrap();
            }

            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(table.resolve(Amount::new(low)) <= table.resolve(Amount::new(high)));

            let smallest = table.brackets()[0].min_amount;
            if Amount::new(low) < smallest {
                prop_assert_eq!(table.resolve(Amount::new(low)), BasisPoints::ZERO);
            }
        }

        #[test]
        fn resolve_matches_floor_bracket(
            gaps in proptest::collection::vec((1u128..1_000, 0u32..=1_000), 0..8),
            amount in 0u128..10_000,
        ) {
            let mut table = FeeTierTable::new();
            let mut threshold = 0u128;
            for (gap, rate) in gaps {
                threshold += gap;
                table.append(bracket(threshold, rate)).unwrap();
            }

            let expected = table
                .brackets()
                .iter()
                .filter(|b| b.min_amount <= Amount::new(amount))
                .max_by_key(|b| b.min_amount)
                .map_or(BasisPoints::ZERO, |b| b.fee_rate);
            prop_assert_eq!(table.resolve(Amount::new(amount)), expected);
        }
    }
}
