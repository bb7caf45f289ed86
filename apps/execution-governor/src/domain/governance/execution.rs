//! Execution requests, plans and receipts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::fee_schedule::FeeSplit;
use crate::domain::shared::{Amount, BasisPoints, ExecutionId, Identity};

/// The five execution variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    /// Quota only, no fee.
    QuotaOnly,
    /// Flat-rate fee on the supplied value.
    FlatFee,
    /// Quota only, flat reward to the caller.
    Reward,
    /// Tiered fee on the notional amount.
    TieredFee,
    /// Tiered fee split between recipient and identity cashback.
    TieredFeeWithCashback,
}

impl ExecutionMode {
    /// Get the mode as a string (metrics label, log field).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::QuotaOnly => "quota_only",
            Self::FlatFee => "flat_fee",
            Self::Reward => "reward",
            Self::TieredFee => "tiered_fee",
            Self::TieredFeeWithCashback => "tiered_fee_with_cashback",
        }
    }

    /// Modes that accept a payment.
    #[must_use]
    pub const fn is_payable(&self) -> bool {
        matches!(
            self,
            Self::FlatFee | Self::TieredFee | Self::TieredFeeWithCashback
        )
    }

    /// Modes that carry a notional amount.
    #[must_use]
    pub const fn is_amount_bearing(&self) -> bool {
        matches!(self, Self::TieredFee | Self::TieredFeeWithCashback)
    }

    /// Modes that pay a fee to the recipient.
    #[must_use]
    pub const fn is_fee_bearing(&self) -> bool {
        self.is_payable()
    }
}

/// A single execution attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionRequest {
    mode: ExecutionMode,
    identity: Identity,
    caller: Identity,
    amount: Amount,
    payment: Amount,
}

impl ExecutionRequest {
    /// Quota-only execution.
    #[must_use]
    pub const fn quota_only(identity: Identity, caller: Identity) -> Self {
        Self::build(ExecutionMode::QuotaOnly, identity, caller, Amount::ZERO, Amount::ZERO)
    }

    /// Flat-fee execution; the fee is taken from `payment`.
    #[must_use]
    pub const fn flat_fee(identity: Identity, caller: Identity, payment: Amount) -> Self {
        Self::build(ExecutionMode::FlatFee, identity, caller, payment, payment)
    }

    /// Quota-only execution that pays the executor reward to `caller`.
    #[must_use]
    pub const fn reward(identity: Identity, caller: Identity) -> Self {
        Self::build(ExecutionMode::Reward, identity, caller, Amount::ZERO, Amount::ZERO)
    }

    /// Tiered-fee execution for a notional `amount`.
    #[must_use]
    pub const fn tiered_fee(
        identity: Identity,
        caller: Identity,
        amount: Amount,
        payment: Amount,
    ) -> Self {
        Self::build(ExecutionMode::TieredFee, identity, caller, amount, payment)
    }

    /// Tiered-fee execution with cashback to `identity`.
    #[must_use]
    pub const fn tiered_fee_with_cashback(
        identity: Identity,
        caller: Identity,
        amount: Amount,
        payment: Amount,
    ) -> Self {
        Self::build(
            ExecutionMode::TieredFeeWithCashback,
            identity,
            caller,
            amount,
            payment,
        )
    }

    const fn build(
        mode: ExecutionMode,
        identity: Identity,
        caller: Identity,
        amount: Amount,
        payment: Amount,
    ) -> Self {
        Self {
            mode,
            identity,
            caller,
            amount,
            payment,
        }
    }

    /// Execution mode.
    #[must_use]
    pub const fn mode(&self) -> ExecutionMode {
        self.mode
    }

    /// Identity that owns the order.
    #[must_use]
    pub const fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Identity submitting the execution.
    #[must_use]
    pub const fn caller(&self) -> &Identity {
        &self.caller
    }

    /// Notional amount (the payment for flat-fee mode, zero for quota modes).
    #[must_use]
    pub const fn amount(&self) -> Amount {
        self.amount
    }

    /// Supplied value.
    #[must_use]
    pub const fn payment(&self) -> Amount {
        self.payment
    }
}

/// Purpose of an outgoing transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferKind {
    /// Net fee to the fee recipient.
    NetFee,
    /// Cashback to the order owner.
    Cashback,
    /// Executor reward to the caller.
    ExecutorReward,
    /// Overpayment refund to the caller.
    Refund,
}

/// One outgoing value transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    /// Purpose.
    pub kind: TransferKind,
    /// Destination.
    pub to: Identity,
    /// Amount moved.
    pub amount: Amount,
}

/// Staged outcome of an execution, ready for settlement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionPlan {
    /// Execution ID.
    pub execution_id: ExecutionId,
    /// The request that produced this plan.
    pub request: ExecutionRequest,
    /// Resolved fee rate.
    pub fee_rate: BasisPoints,
    /// Computed fee.
    pub fee: Amount,
    /// Fee split.
    pub split: FeeSplit,
    /// Executor reward paid.
    pub reward: Amount,
    /// Overpayment refunded.
    pub refund: Amount,
    /// Outgoing transfers (zero amounts omitted).
    pub transfers: Vec<Transfer>,
}

impl ExecutionPlan {
    /// Finalize into a receipt once settlement and matching succeeded.
    #[must_use]
    pub fn into_receipt(
        self,
        matching_reference: String,
        committed_at: DateTime<Utc>,
    ) -> ExecutionReceipt {
        ExecutionReceipt {
            execution_id: self.execution_id,
            mode: self.request.mode,
            identity: self.request.identity,
            caller: self.request.caller,
            amount: self.request.amount,
            payment: self.request.payment,
            fee_rate: self.fee_rate,
            fee: self.fee,
            net_fee: self.split.net_fee,
            cashback: self.split.cashback,
            reward: self.reward,
            refund: self.refund,
            matching_reference,
            committed_at,
        }
    }
}

/// Record of a committed execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionReceipt {
    /// Execution ID.
    pub execution_id: ExecutionId,
    /// Execution mode.
    pub mode: ExecutionMode,
    /// Order owner.
    pub identity: Identity,
    /// Submitter.
    pub caller: Identity,
    /// Notional amount.
    pub amount: Amount,
    /// Supplied value.
    pub payment: Amount,
    /// Applied fee rate.
    pub fee_rate: BasisPoints,
    /// Total fee.
    pub fee: Amount,
    /// Fee paid to the recipient.
    pub net_fee: Amount,
    /// Fee returned to the identity.
    pub cashback: Amount,
    /// Reward paid to the caller.
    pub reward: Amount,
    /// Overpayment returned to the caller.
    pub refund: Amount,
    /// Reference assigned by the matching engine.
    pub matching_reference: String,
    /// Commit time.
    pub committed_at: DateTime<Utc>,
}
