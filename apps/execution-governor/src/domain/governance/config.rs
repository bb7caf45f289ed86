//! Governance configuration registers.

use serde::{Deserialize, Serialize};

use super::errors::GovernanceError;
use crate::domain::fee_schedule::{FeeScheduleError, MAX_CASHBACK_RATE, MAX_FEE_RATE};
use crate::domain::shared::{Amount, BasisPoints, Identity};

/// What happens to value supplied beyond the computed fee.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverpaymentPolicy {
    /// Excess stays in governor escrow.
    #[default]
    Retain,
    /// Excess is returned to the caller within the same settlement.
    Refund,
}

impl OverpaymentPolicy {
    /// Get the policy as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Retain => "retain",
            Self::Refund => "refund",
        }
    }
}

/// Scalar configuration read by every execution.
///
/// Values persist until overwritten; setters enforce the administrative caps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceConfig {
    flat_fee_rate: BasisPoints,
    cashback_rate: BasisPoints,
    fee_recipient: Option<Identity>,
    executor_reward: Amount,
    overpayment_policy: OverpaymentPolicy,
}

impl GovernanceConfig {
    /// Create a config with zero rates, no recipient and no reward.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flat fee rate used by the flat-fee mode.
    #[must_use]
    pub const fn flat_fee_rate(&self) -> BasisPoints {
        self.flat_fee_rate
    }

    /// Cashback rate used by the cashback mode.
    #[must_use]
    pub const fn cashback_rate(&self) -> BasisPoints {
        self.cashback_rate
    }

    /// Destination of net fees.
    #[must_use]
    pub const fn fee_recipient(&self) -> Option<&Identity> {
        self.fee_recipient.as_ref()
    }

    /// Flat reward paid to the submitter of a reward-bearing execution.
    #[must_use]
    pub const fn executor_reward(&self) -> Amount {
        self.executor_reward
    }

    /// Overpayment handling.
    #[must_use]
    pub const fn overpayment_policy(&self) -> OverpaymentPolicy {
        self.overpayment_policy
    }

    /// Set the flat fee rate (at most 10%).
    pub fn set_flat_fee_rate(&mut self, rate: BasisPoints) -> Result<(), GovernanceError> {
        if rate > MAX_FEE_RATE {
            return Err(FeeScheduleError::FeeTooHigh {
                rate,
                max: MAX_FEE_RATE,
            }
            .into());
        }
        self.flat_fee_rate = rate;
        Ok(())
    }

    /// Set the cashback rate (at most 5%).
    pub fn set_cashback_rate(&mut self, rate: BasisPoints) -> Result<(), GovernanceError> {
        if rate > MAX_CASHBACK_RATE {
            return Err(FeeScheduleError::CashbackTooHigh {
                rate,
                max: MAX_CASHBACK_RATE,
            }
            .into());
        }
        self.cashback_rate = rate;
        Ok(())
    }

    /// Set the fee recipient (must not be null).
    pub fn set_fee_recipient(&mut self, recipient: Identity) -> Result<(), GovernanceError> {
        if recipient.is_null() {
            return Err(GovernanceError::InvalidIdentity {
                role: "fee recipient",
            });
        }
        self.fee_recipient = Some(recipient);
        Ok(())
    }

    /// Set the executor reward.
    pub const fn set_executor_reward(&mut self, reward: Amount) {
        self.executor_reward = reward;
    }

    /// Set the overpayment policy.
    pub const fn set_overpayment_policy(&mut self, policy: OverpaymentPolicy) {
        self.overpayment_policy = policy;
    }
}
