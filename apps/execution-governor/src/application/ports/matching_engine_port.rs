//! Matching Engine Port (Driven Port)
//!
//! Hands an approved execution to the downstream matching engine.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::governance::{ExecutionMode, ExecutionPlan};
use crate::domain::shared::{Amount, ExecutionId, Identity};

/// Request to fill an approved execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillRequest {
    /// Execution ID.
    pub execution_id: ExecutionId,
    /// Execution mode.
    pub mode: ExecutionMode,
    /// Order owner.
    pub identity: Identity,
    /// Notional amount (zero for quota-only modes).
    pub amount: Amount,
}

impl FillRequest {
    /// Build the fill request for a plan.
    #[must_use]
    pub fn from_plan(plan: &ExecutionPlan) -> Self {
        Self {
            execution_id: plan.execution_id.clone(),
            mode: plan.request.mode(),
            identity: plan.request.identity().clone(),
            amount: plan.request.amount(),
        }
    }
}

/// Acknowledgment from the matching engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillAck {
    /// Engine-assigned reference.
    pub reference: String,
}

/// Matching engine port error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum MatchingError {
    /// The engine refused the fill.
    #[error("Fill rejected: {reason}")]
    Rejected {
        /// Rejection reason.
        reason: String,
    },

    /// The engine could not be reached.
    #[error("Matching engine unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },
}

/// Port for the matching engine.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MatchingEnginePort: Send + Sync {
    /// Fill an approved execution.
    async fn fill(&self, request: &FillRequest) -> Result<FillAck, MatchingError>;
}
