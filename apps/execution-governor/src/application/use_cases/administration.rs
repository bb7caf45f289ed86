//! Administrative surface of the execution governor.
//!
//! Writes take the governor lock, apply to the live state and publish the
//! resulting events. They are last-writer-wins and affect the next execution.

use crate::application::dto::GovernanceSnapshotDto;
use crate::application::ports::{EventPublisherPort, MatchingEnginePort, TransferPort};
use crate::domain::fee_schedule::FeeBracket;
use crate::domain::governance::{GovernanceError, GovernorState, OverpaymentPolicy};
use crate::domain::quota::Quota;
use crate::domain::shared::{Amount, BasisPoints, Identity};

use super::governor::ExecutionGovernor;

impl<T, M, E> ExecutionGovernor<T, M, E>
where
    T: TransferPort,
    M: MatchingEnginePort,
    E: EventPublisherPort,
{
    async fn update<R>(
        &self,
        operation: &'static str,
        apply: impl FnOnce(&mut GovernorState) -> R,
    ) -> R {
        let (result, events) = {
            let mut state = self.state.lock().await;
            let result = apply(&mut state);
            (result, state.drain_events())
        };

        for event in &events {
            tracing::info!(operation, event = event.event_type(), "Governance updated");
        }

        self.publish(events).await;
        result
    }

    async fn administer<R>(
        &self,
        operation: &'static str,
        apply: impl FnOnce(&mut GovernorState) -> Result<R, GovernanceError>,
    ) -> Result<R, GovernanceError> {
        self.update(operation, apply).await.inspect_err(|e| {
            tracing::warn!(operation, error = %e, "Governance update rejected");
        })
    }

    async fn read<R>(&self, view: impl FnOnce(&GovernorState) -> R) -> R {
        view(&*self.state.lock().await)
    }

    // ========================================================================
    // Quotas
    // ========================================================================

    /// Set the global execution limit (0 = unlimited).
    pub async fn set_global_limit(&self, limit: u64) {
        self.update("set_global_limit", |state| state.set_global_limit(limit))
            .await;
    }

    /// Global execution limit.
    pub async fn global_limit(&self) -> u64 {
        self.read(|state| state.global_quota().limit).await
    }

    /// Executions counted against the global limit.
    pub async fn global_executed_count(&self) -> u64 {
        self.read(|state| state.global_quota().executed).await
    }

    /// Set an identity's execution limit (0 = unlimited).
    pub async fn set_identity_limit(
        &self,
        identity: Identity,
        limit: u64,
    ) -> Result<(), GovernanceError> {
        self.administer("set_identity_limit", |state| {
            state.set_identity_limit(&identity, limit)
        })
        .await
    }

    /// An identity's execution limit.
    pub async fn identity_limit(&self, identity: &Identity) -> u64 {
        self.identity_quota(identity).await.limit
    }

    /// Executions counted against an identity's limit.
    pub async fn identity_executed_count(&self, identity: &Identity) -> u64 {
        self.identity_quota(identity).await.executed
    }

    /// An identity's full quota.
    pub async fn identity_quota(&self, identity: &Identity) -> Quota {
        self.read(|state| state.identity_quota(identity)).await
    }

    // ========================================================================
    // Fee configuration
    // ========================================================================

    /// Set the flat fee rate (at most 1000 bps).
    pub async fn set_flat_fee_rate(&self, rate: BasisPoints) -> Result<(), GovernanceError> {
        self.administer("set_flat_fee_rate", |state| state.set_flat_fee_rate(rate))
            .await
    }

    /// Flat fee rate.
    pub async fn flat_fee_rate(&self) -> BasisPoints {
        self.read(|state| state.config().flat_fee_rate()).await
    }

    /// Set the fee recipient (non-null).
    pub async fn set_fee_recipient(&self, recipient: Identity) -> Result<(), GovernanceError> {
        self.administer("set_fee_recipient", |state| {
            state.set_fee_recipient(recipient)
        })
        .await
    }

    /// Fee recipient, if configured.
    pub async fn fee_recipient(&self) -> Option<Identity> {
        self.read(|state| state.config().fee_recipient().cloned())
            .await
    }

    /// Set the executor reward.
    pub async fn set_executor_reward(&self, reward: Amount) {
        self.update("set_executor_reward", |state| {
            state.set_executor_reward(reward);
        })
        .await;
    }

    /// Executor reward.
    pub async fn executor_reward(&self) -> Amount {
        self.read(|state| state.config().executor_reward()).await
    }

    /// Set the cashback rate (at most 500 bps).
    pub async fn set_cashback_rate(&self, rate: BasisPoints) -> Result<(), GovernanceError> {
        self.administer("set_cashback_rate", |state| state.set_cashback_rate(rate))
            .await
    }

    /// Cashback rate.
    pub async fn cashback_rate(&self) -> BasisPoints {
        self.read(|state| state.config().cashback_rate()).await
    }

    /// Set the overpayment policy.
    pub async fn set_overpayment_policy(&self, policy: OverpaymentPolicy) {
        self.update("set_overpayment_policy", |state| {
            state.set_overpayment_policy(policy);
        })
        .await;
    }

    /// Overpayment policy.
    pub async fn overpayment_policy(&self) -> OverpaymentPolicy {
        self.read(|state| state.config().overpayment_policy()).await
    }

    // ========================================================================
    // Fee brackets
    // ========================================================================

    /// Append a bracket; its threshold must exceed the current tail's.
    pub async fn append_fee_bracket(&self, bracket: FeeBracket) -> Result<(), GovernanceError> {
        self.administer("append_fee_bracket", |state| {
            state.append_fee_bracket(bracket)
        })
        .await
    }

    /// Remove and return the tail bracket.
    pub async fn pop_last_fee_bracket(&self) -> Result<FeeBracket, GovernanceError> {
        self.administer("pop_last_fee_bracket", GovernorState::pop_last_fee_bracket)
            .await
    }

    /// All brackets in ascending threshold order.
    pub async fn fee_brackets(&self) -> Vec<FeeBracket> {
        self.read(|state| state.fee_table().brackets().to_vec())
            .await
    }

    /// Fee rate the tier table assigns to `amount`.
    pub async fn resolve_fee_rate(&self, amount: Amount) -> BasisPoints {
        self.read(|state| state.resolve_fee_rate(amount)).await
    }

    /// Consistent view of every register and counter.
    pub async fn snapshot(&self) -> GovernanceSnapshotDto {
        self.read(|state| GovernanceSnapshotDto::from(state)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockMatchingEnginePort, MockTransferPort, NoOpEventPublisher};
    use std::sync::Arc;

    type TestGovernor = ExecutionGovernor<MockTransferPort, MockMatchingEnginePort, NoOpEventPublisher>;

    fn governor() -> TestGovernor {
        ExecutionGovernor::new(
            GovernorState::default(),
            Arc::new(MockTransferPort::new()),
            Arc::new(MockMatchingEnginePort::new()),
            Arc::new(NoOpEventPublisher),
        )
    }

    #[tokio::test]
    async fn limits_round_trip() {
        let governor = governor();
        governor.set_global_limit(10).await;
        governor
            .set_identity_limit(Identity::new("alice"), 3)
            .await
            .unwrap();

        assert_eq!(governor.global_limit().await, 10);
        assert_eq!(governor.identity_limit(&Identity::new("alice")).await, 3);
        assert_eq!(governor.identity_limit(&Identity::new("bob")).await, 0);
        assert_eq!(
            governor.identity_executed_count(&Identity::new("alice")).await,
            0
        );
    }

    #[tokio::test]
    async fn null_identity_limit_rejected() {
        let governor = governor();
        assert_eq!(
            governor.set_identity_limit(Identity::null(), 3).await,
            Err(GovernanceError::InvalidIdentity { role: "identity" })
        );
    }

    #[tokio::test]
    async fn rate_caps_enforced() {
        let governor = governor();
        assert!(governor.set_flat_fee_rate(BasisPoints::new(1000)).await.is_ok());
        assert!(governor.set_flat_fee_rate(BasisPoints::new(1001)).await.is_err());
        assert!(governor.set_cashback_rate(BasisPoints::new(500)).await.is_ok());
        assert!(governor.set_cashback_rate(BasisPoints::new(501)).await.is_err());

        assert_eq!(governor.flat_fee_rate().await, BasisPoints::new(1000));
        assert_eq!(governor.cashback_rate().await, BasisPoints::new(500));
    }

    #[tokio::test]
    async fn brackets_append_resolve_pop() {
        let governor = governor();
        for (min, bps) in [(0, 0), (1000, 50), (10_000, 100)] {
            governor
                .append_fee_bracket(FeeBracket::new(Amount::new(min), BasisPoints::new(bps)))
                .await
                .unwrap();
        }

        assert_eq!(governor.resolve_fee_rate(Amount::new(999)).await, BasisPoints::ZERO);
        assert_eq!(
            governor.resolve_fee_rate(Amount::new(1000)).await,
            BasisPoints::new(50)
        );
        assert_eq!(
            governor.resolve_fee_rate(Amount::new(15_000)).await,
            BasisPoints::new(100)
        );

        let popped = governor.pop_last_fee_bracket().await.unwrap();
        assert_eq!(popped.min_amount, Amount::new(10_000));
        assert_eq!(governor.fee_brackets().await.len(), 2);
    }

    #[tokio::test]
    async fn pop_on_empty_table_rejected() {
        let governor = governor();
        assert_eq!(
            governor.pop_last_fee_bracket().await,
            Err(GovernanceError::EmptyBracketTable)
        );
    }

    #[tokio::test]
    async fn snapshot_reflects_writes() {
        let governor = governor();
        governor
            .set_fee_recipient(Identity::new("treasury"))
            .await
            .unwrap();
        governor.set_executor_reward(Amount::new(9)).await;
        governor
            .set_overpayment_policy(OverpaymentPolicy::Refund)
            .await;

        let snapshot = governor.snapshot().await;
        assert_eq!(snapshot.fee_recipient, Some(Identity::new("treasury")));
        assert_eq!(snapshot.executor_reward, Amount::new(9));
        assert_eq!(snapshot.overpayment_policy, OverpaymentPolicy::Refund);
        assert_eq!(governor.fee_recipient().await, Some(Identity::new("treasury")));
        assert_eq!(governor.executor_reward().await, Amount::new(9));
        assert_eq!(
            governor.overpayment_policy().await,
            OverpaymentPolicy::Refund
        );
    }
}
