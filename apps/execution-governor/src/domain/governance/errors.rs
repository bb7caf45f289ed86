//! Governance errors.
//!
//! Every variant rejects the whole call; no partial effects survive.

use thiserror::Error;

use crate::domain::fee_schedule::FeeScheduleError;
use crate::domain::quota::QuotaError;
use crate::domain::shared::{Amount, BasisPoints, Identity};

/// Errors surfaced by the administrative and execution surfaces.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GovernanceError {
    /// A null identity was supplied where one is required.
    #[error("Invalid {role}: identity must not be null")]
    InvalidIdentity {
        /// Which identity was null (identity, caller, fee recipient).
        role: &'static str,
    },

    /// A zero notional was supplied where a positive amount is required.
    #[error("Invalid amount: notional must be positive")]
    InvalidAmount,

    /// Global quota exhausted.
    #[error("Global execution limit reached ({limit})")]
    GlobalLimitReached {
        /// Configured global limit.
        limit: u64,
    },

    /// Identity quota exhausted.
    #[error("Execution limit reached for {identity} ({limit})")]
    IdentityLimitReached {
        /// Identity whose quota is exhausted.
        identity: Identity,
        /// Configured identity limit.
        limit: u64,
    },

    /// Fee rate above its cap.
    #[error("Fee rate {rate} exceeds maximum {max}")]
    FeeTooHigh {
        /// Requested rate.
        rate: BasisPoints,
        /// Maximum allowed rate.
        max: BasisPoints,
    },

    /// Cashback rate above its cap.
    #[error("Cashback rate {rate} exceeds maximum {max}")]
    CashbackTooHigh {
        /// Requested rate.
        rate: BasisPoints,
        /// Maximum allowed rate.
        max: BasisPoints,
    },

    /// Appended bracket does not exceed the tail threshold.
    #[error("Bracket threshold {min_amount} must exceed current tail threshold {tail_min_amount}")]
    BracketOrderViolation {
        /// Threshold of the rejected bracket.
        min_amount: Amount,
        /// Threshold of the current tail bracket.
        tail_min_amount: Amount,
    },

    /// Pop attempted on an empty bracket table.
    #[error("Fee bracket table is empty")]
    EmptyBracketTable,

    /// Supplied value is below the computed fee.
    #[error("Insufficient payment: fee is {required}, supplied {supplied}")]
    InsufficientPayment {
        /// Computed fee.
        required: Amount,
        /// Supplied value.
        supplied: Amount,
    },

    /// A fee-bearing execution was attempted before a recipient was configured.
    #[error("Fee recipient is not configured")]
    FeeRecipientNotSet,

    /// A value transfer could not complete.
    #[error("Transfer failed: {reason}")]
    TransferFailure {
        /// Failure reported by the transfer port.
        reason: String,
    },

    /// The matching engine refused to fill the order.
    #[error("Matching engine rejected execution: {reason}")]
    MatchingRejected {
        /// Failure reported by the matching engine.
        reason: String,
    },
}

impl From<QuotaError> for GovernanceError {
    fn from(err: QuotaError) -> Self {
        match err {
            QuotaError::GlobalLimitReached { limit } => Self::GlobalLimitReached { limit },
            QuotaError::IdentityLimitReached { identity, limit } => {
                Self::IdentityLimitReached { identity, limit }
            }
        }
    }
}

impl From<FeeScheduleError> for GovernanceError {
    fn from(err: FeeScheduleError) -> Self {
        match err {
            FeeScheduleError::FeeTooHigh { rate, max } => Self::FeeTooHigh { rate, max },
            FeeScheduleError::CashbackTooHigh { rate, max } => Self::CashbackTooHigh { rate, max },
            FeeScheduleError::BracketOrderViolation {
                min_amount,
                tail_min_amount,
            } => Self::BracketOrderViolation {
                min_amount,
                tail_min_amount,
            },
            FeeScheduleError::EmptyBracketTable => Self::EmptyBracketTable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quota_errors_convert() {
        let err: GovernanceError = QuotaError::GlobalLimitReached { limit: 2 }.into();
        assert_eq!(err, GovernanceError::GlobalLimitReached { limit: 2 });

        let err: GovernanceError = QuotaError::IdentityLimitReached {
            identity: Identity::new("alice"),
            limit: 1,
        }
        .into();
        assert!(matches!(err, GovernanceError::IdentityLimitReached { .. }));
    }

    #[test]
    fn fee_schedule_errors_convert() {
        let err: GovernanceError = FeeScheduleError::EmptyBracketTable.into();
        assert_eq!(err, GovernanceError::EmptyBracketTable);
    }

    #[test]
    fn insufficient_payment_display() {
        let err = GovernanceError::InsufficientPayment {
            required: Amount::new(150),
            supplied: Amount::new(149),
        };
        let msg = err.to_string();
        assert!(msg.contains("150"));
        assert!(msg.contains("149"));
    }

    #[test]
    fn invalid_identity_display_names_role() {
        let err = GovernanceError::InvalidIdentity { role: "caller" };
        assert!(err.to_string().contains("caller"));
    }
}
