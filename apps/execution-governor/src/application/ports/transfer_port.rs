//! Transfer Port (Driven Port)
//!
//! Moves value between identities. A settlement is applied all-or-nothing and
//! can be reverted as a whole.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::governance::{ExecutionPlan, Transfer};
use crate::domain::shared::{Amount, ExecutionId, Identity};

/// One execution's value movement: the payment enters escrow from `payer`,
/// then every transfer leaves escrow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    /// Execution the settlement belongs to.
    pub execution_id: ExecutionId,
    /// Identity supplying the payment (the caller).
    pub payer: Identity,
    /// Value supplied with the execution.
    pub payment: Amount,
    /// Outgoing transfers.
    pub transfers: Vec<Transfer>,
}

impl Settlement {
    /// Build the settlement for a plan.
    #[must_use]
    pub fn from_plan(plan: &ExecutionPlan) -> Self {
        Self {
            execution_id: plan.execution_id.clone(),
            payer: plan.request.caller().clone(),
            payment: plan.request.payment(),
            transfers: plan.transfers.clone(),
        }
    }

    /// Returns true if no value moves at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.payment.is_zero() && self.transfers.is_empty()
    }

    /// Sum of outgoing transfers, `None` on overflow.
    #[must_use]
    pub fn outgoing_total(&self) -> Option<Amount> {
        self.transfers
            .iter()
            .try_fold(Amount::ZERO, |acc, t| acc.checked_add(t.amount))
    }
}

/// Transfer port error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransferError {
    /// The destination refused the transfer.
    #[error("Transfer to {to} refused")]
    Refused {
        /// Destination.
        to: Identity,
    },

    /// Escrow cannot cover the outgoing transfers.
    #[error("Insufficient escrow: need {required}, have {available}")]
    InsufficientEscrow {
        /// Amount needed.
        required: Amount,
        /// Amount available.
        available: Amount,
    },

    /// A balance would overflow.
    #[error("Balance overflow")]
    Overflow,

    /// Revert or confirm of an unknown settlement.
    #[error("Settlement {execution_id} not found")]
    UnknownSettlement {
        /// Execution ID.
        execution_id: ExecutionId,
    },
}

/// Port for value transfers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransferPort: Send + Sync {
    /// Apply a settlement atomically.
    async fn settle(&self, settlement: &Settlement) -> Result<(), TransferError>;

    /// Undo a previously applied settlement.
    async fn revert(&self, settlement: &Settlement) -> Result<(), TransferError>;

    /// Mark an applied settlement final; it can no longer be reverted.
    async fn confirm(&self, settlement: &Settlement) -> Result<(), TransferError>;
}
