//! Fee schedule errors.

use std::fmt;

use crate::domain::shared::{Amount, BasisPoints};

/// Rejections raised while configuring fee rates and brackets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeeScheduleError {
    /// Fee rate above the configured cap.
    FeeTooHigh {
        /// Requested rate.
        rate: BasisPoints,
        /// Maximum allowed rate.
        max: BasisPoints,
    },

    /// Cashback rate above the configured cap.
    CashbackTooHigh {
        /// Requested rate.
        rate: BasisPoints,
        /// Maximum allowed rate.
        max: BasisPoints,
    },

    /// Appended bracket threshold does not exceed the current tail.
    BracketOrderViolation {
        /// Threshold of the rejected bracket.
        min_amount: Amount,
        /// Threshold of the current tail bracket.
        tail_min_amount: Amount,
    },

    /// Pop attempted on an empty table.
    EmptyBracketTable,
}

impl fmt::Display for FeeScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FeeTooHigh { rate, max } => {
                write!(f, "Fee rate {rate} exceeds maximum {max}")
            }
            Self::CashbackTooHigh { rate, max } => {
                write!(f, "Cashback rate {rate} exceeds maximum {max}")
            }
            Self::BracketOrderViolation {
                min_amount,
                tail_min_amount,
            } => {
                write!(
                    f,
                    "Bracket threshold {min_amount} must exceed current tail threshold {tail_min_amount}"
                )
            }
            Self::EmptyBracketTable => write!(f, "Fee bracket table is empty"),
        }
    }
}

impl std::error::Error for FeeScheduleError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fee_too_high_display() {
        let msg = FeeScheduleError::FeeTooHigh {
            rate: BasisPoints::new(1001),
            max: BasisPoints::new(1000),
        }
        .to_string();
        assert!(msg.contains("1001bps"));
        assert!(msg.contains("1000bps"));
    }

    #[test]
    fn bracket_order_violation_display() {
        let msg = FeeScheduleError::BracketOrderViolation {
            min_amount: Amount::new(500),
            tail_min_amount: Amount::new(1000),
        }
        .to_string();
        assert!(msg.contains("500"));
        assert!(msg.contains("1000"));
    }

    #[test]
    fn empty_table_display() {
        assert!(FeeScheduleError::EmptyBracketTable
            .to_string()
            .contains("empty"));
    }
}
