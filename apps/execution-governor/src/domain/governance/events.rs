//! Domain events for governance state changes.
//!
//! Emitted after every committed write so observers can follow quota,
//! fee and configuration changes without polling.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::config::OverpaymentPolicy;
use super::execution::{ExecutionMode, ExecutionReceipt};
use crate::domain::fee_schedule::FeeBracket;
use crate::domain::shared::{Amount, BasisPoints, Identity};

/// All governance events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GovernanceEvent {
    /// An execution committed.
    ExecutionCommitted {
        /// Receipt of the execution.
        receipt: ExecutionReceipt,
    },
    /// An execution was rejected.
    ExecutionRejected {
        /// Execution mode.
        mode: ExecutionMode,
        /// Order owner.
        identity: Identity,
        /// Stable error reason.
        code: String,
        /// Human-readable message.
        message: String,
        /// When the event occurred.
        occurred_at: DateTime<Utc>,
    },
    /// Global limit changed.
    GlobalLimitUpdated {
        /// New limit.
        limit: u64,
        /// When the event occurred.
        occurred_at: DateTime<Utc>,
    },
    /// Identity limit changed.
    IdentityLimitUpdated {
        /// Identity.
        identity: Identity,
        /// New limit.
        limit: u64,
        /// When the event occurred.
        occurred_at: DateTime<Utc>,
    },
    /// Flat fee rate changed.
    FlatFeeRateUpdated {
        /// New rate.
        rate: BasisPoints,
        /// When the event occurred.
        occurred_at: DateTime<Utc>,
    },
    /// Fee recipient changed.
    FeeRecipientUpdated {
        /// New recipient.
        recipient: Identity,
        /// When the event occurred.
        occurred_at: DateTime<Utc>,
    },
    /// Executor reward changed.
    ExecutorRewardUpdated {
        /// New reward.
        reward: Amount,
        /// When the event occurred.
        occurred_at: DateTime<Utc>,
    },
    /// Cashback rate changed.
    CashbackRateUpdated {
        /// New rate.
        rate: BasisPoints,
        /// When the event occurred.
        occurred_at: DateTime<Utc>,
    },
    /// Bracket appended at the tail.
    FeeBracketAppended {
        /// Appended bracket.
        bracket: FeeBracket,
        /// When the event occurred.
        occurred_at: DateTime<Utc>,
    },
    /// Tail bracket removed.
    FeeBracketRemoved {
        /// Removed bracket.
        bracket: FeeBracket,
        /// When the event occurred.
        occurred_at: DateTime<Utc>,
    },
    /// Overpayment policy changed.
    OverpaymentPolicyUpdated {
        /// New policy.
        policy: OverpaymentPolicy,
        /// When the event occurred.
        occurred_at: DateTime<Utc>,
    },
}

impl GovernanceEvent {
    /// Get the timestamp when this event occurred.
    #[must_use]
    pub fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            Self::ExecutionCommitted { receipt } => receipt.committed_at,
            Self::ExecutionRejected { occurred_at, .. }
            | Self::GlobalLimitUpdated { occurred_at, .. }
            | Self::IdentityLimitUpdated { occurred_at, .. }
            | Self::FlatFeeRateUpdated { occurred_at, .. }
            | Self::FeeRecipientUpdated { occurred_at, .. }
            | Self::ExecutorRewardUpdated { occurred_at, .. }
            | Self::CashbackRateUpdated { occurred_at, .. }
            | Self::FeeBracketAppended { occurred_at, .. }
            | Self::FeeBracketRemoved { occurred_at, .. }
            | Self::OverpaymentPolicyUpdated { occurred_at, .. } => *occurred_at,
        }
    }

    /// Get the event type name.
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::ExecutionCommitted { .. } => "EXECUTION_COMMITTED",
            Self::ExecutionRejected { .. } => "EXECUTION_REJECTED",
            Self::GlobalLimitUpdated { .. } => "GLOBAL_LIMIT_UPDATED",
            Self::IdentityLimitUpdated { .. } => "IDENTITY_LIMIT_UPDATED",
            Self::FlatFeeRateUpdated { .. } => "FLAT_FEE_RATE_UPDATED",
            Self::FeeRecipientUpdated { .. } => "FEE_RECIPIENT_UPDATED",
            Self::ExecutorRewardUpdated { .. } => "EXECUTOR_REWARD_UPDATED",
            Self::CashbackRateUpdated { .. } => "CASHBACK_RATE_UPDATED",
            Self::FeeBracketAppended { .. } => "FEE_BRACKET_APPENDED",
            Self::FeeBracketRemoved { .. } => "FEE_BRACKET_REMOVED",
            Self::OverpaymentPolicyUpdated { .. } => "OVERPAYMENT_POLICY_UPDATED",
        }
    }
}
