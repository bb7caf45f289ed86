//! HTTP request DTOs.

use serde::{Deserialize, Serialize};

use crate::domain::governance::{ExecutionRequest, OverpaymentPolicy};
use crate::domain::shared::{Amount, BasisPoints, Identity};

/// Request to set the global limit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalLimitRequest {
    /// New limit (0 = unlimited).
    pub limit: u64,
}

/// Request to set an identity's limit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityLimitRequest {
    /// Identity.
    pub identity: Identity,
    /// New limit (0 = unlimited).
    pub limit: u64,
}

/// Request to set a basis-point rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateRequest {
    /// New rate.
    pub rate: BasisPoints,
}

/// Request to set the fee recipient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeRecipientRequest {
    /// New recipient.
    pub recipient: Identity,
}

/// Request to set the executor reward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutorRewardRequest {
    /// New reward in base units.
    pub reward: Amount,
}

/// Request to set the overpayment policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverpaymentPolicyRequest {
    /// New policy.
    pub policy: OverpaymentPolicy,
}

/// Query for the fee rate of a notional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeRateQuery {
    /// Notional in base units.
    pub amount: Amount,
}

/// Request to run one execution, tagged by `mode`.
///
/// Amounts are accepted as JSON numbers or decimal strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ExecuteRequest {
    /// Quota only.
    QuotaOnly {
        /// Order owner.
        identity: Identity,
        /// Submitter.
        caller: Identity,
    },
    /// Flat fee on the supplied value.
    FlatFee {
        /// Order owner.
        identity: Identity,
        /// Submitter.
        caller: Identity,
        /// Supplied value.
        payment: Amount,
    },
    /// Quota only with executor reward.
    Reward {
        /// Order owner.
        identity: Identity,
        /// Submitter, receives the reward.
        caller: Identity,
    },
    /// Tiered fee on a notional.
    TieredFee {
        /// Order owner.
        identity: Identity,
        /// Submitter.
        caller: Identity,
        /// Notional.
        amount: Amount,
        /// Supplied value.
        payment: Amount,
    },
    /// Tiered fee with cashback to the order owner.
    TieredFeeWithCashback {
        /// Order owner.
        identity: Identity,
        /// Submitter.
        caller: Identity,
        /// Notional.
        amount: Amount,
        /// Supplied value.
        payment: Amount,
    },
}

impl From<ExecuteRequest> for ExecutionRequest {
    fn from(request: ExecuteRequest) -> Self {
        match request {
            ExecuteRequest::QuotaOnly { identity, caller } => Self::quota_only(identity, caller),
            ExecuteRequest::FlatFee {
                identity,
                caller,
                payment,
            } => Self::flat_fee(identity, caller, payment),
            ExecuteRequest::Reward { identity, caller } => Self::reward(identity, caller),
            ExecuteRequest::TieredFee {
                identity,
                caller,
                amount,
                payment,
            } => Self::tiered_fee(identity, caller, amount, payment),
            ExecuteRequest::TieredFeeWithCashback {
                identity,
                caller,
                amount,
                payment,
            } => Self::tiered_fee_with_cashback(identity, caller, amount, payment),
        }
    }
}
