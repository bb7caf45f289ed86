//! Execution Governor Use Case
//!
//! Serializes every execution behind one async lock. Each execution is planned
//! read-only against the live state; its quota is consumed only after
//! settlement and matching both succeeded.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tokio::sync::Mutex;

use crate::application::ports::{
    EventPublisherPort, FillRequest, MatchingEnginePort, Settlement, TransferPort,
};
use crate::domain::governance::{
    ExecutionReceipt, ExecutionRequest, GovernanceError, GovernanceEvent, GovernorState,
};
use crate::domain::shared::{Amount, Identity};
use crate::observability::{record_execution, record_quota_rejection, record_settlement};

/// Gatekeeper in front of the matching engine.
pub struct ExecutionGovernor<T, M, E>
where
    T: TransferPort,
    M: MatchingEnginePort,
    E: EventPublisherPort,
{
    pub(super) state: Mutex<GovernorState>,
    transfers: Arc<T>,
    matching: Arc<M>,
    pub(super) event_publisher: Arc<E>,
}

impl<T, M, E> ExecutionGovernor<T, M, E>
where
    T: TransferPort,
    M: MatchingEnginePort,
    E: EventPublisherPort,
{
    /// Create a governor over an initial state.
    pub fn new(
        state: GovernorState,
        transfers: Arc<T>,
        matching: Arc<M>,
        event_publisher: Arc<E>,
    ) -> Self {
        Self {
            state: Mutex::new(state),
            transfers,
            matching,
            event_publisher,
        }
    }

    /// Quota-only execution.
    pub async fn execute_quota_only(
        &self,
        identity: Identity,
        caller: Identity,
    ) -> Result<ExecutionReceipt, GovernanceError> {
        self.execute(ExecutionRequest::quota_only(identity, caller))
            .await
    }

    /// Flat-fee execution charged on `payment`.
    pub async fn execute_with_flat_fee(
        &self,
        identity: Identity,
        caller: Identity,
        payment: Amount,
    ) -> Result<ExecutionReceipt, GovernanceError> {
        self.execute(ExecutionRequest::flat_fee(identity, caller, payment))
            .await
    }

    /// Quota-only execution that pays the executor reward to `caller`.
    pub async fn execute_with_reward(
        &self,
        identity: Identity,
        caller: Identity,
    ) -> Result<ExecutionReceipt, GovernanceError> {
        self.execute(ExecutionRequest::reward(identity, caller)).await
    }

    /// Tiered-fee execution for a notional `amount`.
    pub async fn execute_with_tiered_fee(
        &self,
        identity: Identity,
        caller: Identity,
        amount: Amount,
        payment: Amount,
    ) -> Result<ExecutionReceipt, GovernanceError> {
        self.execute(ExecutionRequest::tiered_fee(identity, caller, amount, payment))
            .await
    }

    /// Tiered-fee execution with cashback to `identity`.
    pub async fn execute_with_tiered_fee_and_cashback(
        &self,
        identity: Identity,
        caller: Identity,
        amount: Amount,
        payment: Amount,
    ) -> Result<ExecutionReceipt, GovernanceError> {
        self.execute(ExecutionRequest::tiered_fee_with_cashback(
            identity, caller, amount, payment,
        ))
        .await
    }

    /// Run one execution to completion. Either everything commits or nothing
    /// observable changes.
    #[tracing::instrument(
        skip(self, request),
        fields(mode = request.mode().as_str(), identity = %request.identity())
    )]
    pub async fn execute(
        &self,
        request: ExecutionRequest,
    ) -> Result<ExecutionReceipt, GovernanceError> {
        let started = Instant::now();
        let result = {
            let mut live = self.state.lock().await;
            self.commit(&mut live, &request).await
        };
        let elapsed = started.elapsed().as_secs_f64();
        let mode = request.mode();

        let event = match &result {
            Ok(receipt) => {
                tracing::info!(
                    execution_id = %receipt.execution_id,
                    fee = %receipt.fee,
                    cashback = %receipt.cashback,
                    reward = %receipt.reward,
                    refund = %receipt.refund,
                    "Execution committed"
                );
                record_execution(mode.as_str(), "committed", elapsed);
                record_settlement(
                    receipt.net_fee.as_u64_saturating(),
                    receipt.cashback.as_u64_saturating(),
                    receipt.reward.as_u64_saturating(),
                );
                GovernanceEvent::ExecutionCommitted {
                    receipt: receipt.clone(),
                }
            }
            Err(err) => {
                tracing::warn!(code = %err.code(), error = %err, "Execution rejected");
                record_execution(mode.as_str(), err.code().reason(), elapsed);
                match err {
                    GovernanceError::GlobalLimitReached { .. } => record_quota_rejection("global"),
                    GovernanceError::IdentityLimitReached { .. } => {
                        record_quota_rejection("identity");
                    }
                    _ => {}
                }
                GovernanceEvent::ExecutionRejected {
                    mode,
                    identity: request.identity().clone(),
                    code: err.code().reason().to_string(),
                    message: err.to_string(),
                    occurred_at: Utc::now(),
                }
            }
        };

        self.publish(vec![event]).await;
        result
    }

    async fn commit(
        &self,
        live: &mut GovernorState,
        request: &ExecutionRequest,
    ) -> Result<ExecutionReceipt, GovernanceError> {
        let plan = live.plan_execution(request)?;

        let settlement = Settlement::from_plan(&plan);
        let settles = !settlement.is_empty();
        if settles {
            self.transfers
                .settle(&settlement)
                .await
                .map_err(|e| GovernanceError::TransferFailure {
                    reason: e.to_string(),
                })?;
        }

        let ack = match self.matching.fill(&FillRequest::from_plan(&plan)).await {
            Ok(ack) => ack,
            Err(e) => {
                if settles {
                    if let Err(revert_err) = self.transfers.revert(&settlement).await {
                        tracing::error!(
                            execution_id = %plan.execution_id,
                            error = %revert_err,
                            "Failed to revert settlement after fill rejection"
                        );
                    }
                }
                return Err(GovernanceError::MatchingRejected {
                    reason: e.to_string(),
                });
            }
        };

        live.commit_execution(&plan);
        if settles {
            if let Err(e) = self.transfers.confirm(&settlement).await {
                tracing::warn!(
                    execution_id = %plan.execution_id,
                    error = %e,
                    "Failed to confirm settlement"
                );
            }
        }
        Ok(plan.into_receipt(ack.reference, Utc::now()))
    }

    pub(super) async fn publish(&self, events: Vec<GovernanceEvent>) {
        if events.is_empty() {
            return;
        }
        if let Err(e) = self.event_publisher.publish(events).await {
            tracing::error!(error = %e, "Failed to publish governance events");
        }
    }
}
