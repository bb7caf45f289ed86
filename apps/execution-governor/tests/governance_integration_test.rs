//! Integration tests for the execution governor.
//!
//! Drives the governor through its public API with the in-memory ledger and
//! the pass-through matching engine, checking counters and balances together.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use execution_governor::config::load_config_from_string;
use execution_governor::{
    Amount, BasisPoints, ExecutionGovernor, FeeBracket, FillAck, FillRequest, GovernanceError,
    Identity, InMemoryTransferLedger, MatchingEnginePort, MatchingError, NoOpEventPublisher,
    OverpaymentPolicy, PassThroughMatchingEngine,
};

type Governor =
    ExecutionGovernor<InMemoryTransferLedger, PassThroughMatchingEngine, NoOpEventPublisher>;

fn governor_with_ledger(escrow: u128) -> (Governor, Arc<InMemoryTransferLedger>) {
    let ledger = Arc::new(InMemoryTransferLedger::new());
    ledger.seed_escrow(Amount::new(escrow)).unwrap();
    let governor = ExecutionGovernor::new(
        Default::default(),
        Arc::clone(&ledger),
        Arc::new(PassThroughMatchingEngine::new()),
        Arc::new(NoOpEventPublisher),
    );
    (governor, ledger)
}

async fn install_tiers(governor: &Governor) {
    for (min, bps) in [(0, 0), (1000, 50), (10_000, 100)] {
        governor
            .append_fee_bracket(FeeBracket::new(Amount::new(min), BasisPoints::new(bps)))
            .await
            .unwrap();
    }
    governor
        .set_fee_recipient(Identity::new("treasury"))
        .await
        .unwrap();
}

fn alice() -> Identity {
    Identity::new("alice")
}

fn bob() -> Identity {
    Identity::new("bob")
}

#[tokio::test]
async fn global_limit_caps_all_identities() {
    let (governor, _) = governor_with_ledger(0);
    governor.set_global_limit(2).await;

    governor.execute_quota_only(alice(), alice()).await.unwrap();
    governor.execute_quota_only(bob(), bob()).await.unwrap();

    let third = governor.execute_quota_only(alice(), alice()).await;
    assert_eq!(third, Err(GovernanceError::GlobalLimitReached { limit: 2 }));
    assert_eq!(governor.global_executed_count().await, 2);
}

#[tokio::test]
async fn identity_limit_only_affects_that_identity() {
    let (governor, _) = governor_with_ledger(0);
    governor.set_identity_limit(alice(), 1).await.unwrap();

    governor.execute_quota_only(alice(), alice()).await.unwrap();
    assert!(matches!(
        governor.execute_quota_only(alice(), alice()).await,
        Err(GovernanceError::IdentityLimitReached { .. })
    ));

    governor.execute_quota_only(bob(), alice()).await.unwrap();
    assert_eq!(governor.identity_executed_count(&alice()).await, 1);
    assert_eq!(governor.global_executed_count().await, 2);
}

#[tokio::test]
async fn tiered_fee_requires_full_payment() {
    let (governor, ledger) = governor_with_ledger(0);
    install_tiers(&governor).await;

    let short = governor
        .execute_with_tiered_fee(alice(), alice(), Amount::new(15_000), Amount::new(149))
        .await;
    assert_eq!(
        short,
        Err(GovernanceError::InsufficientPayment {
            required: Amount::new(150),
            supplied: Amount::new(149),
        })
    );
    assert_eq!(governor.global_executed_count().await, 0);

    let receipt = governor
        .execute_with_tiered_fee(alice(), alice(), Amount::new(15_000), Amount::new(150))
        .await
        .unwrap();
    assert_eq!(receipt.fee_rate, BasisPoints::new(100));
    assert_eq!(receipt.net_fee, Amount::new(150));
    assert_eq!(ledger.balance_of(&Identity::new("treasury")), Amount::new(150));
    assert_eq!(ledger.escrow_balance(), Amount::ZERO);
    assert_eq!(ledger.pending_settlements(), 0);
}

#[tokio::test]
async fn committed_settlements_are_released() {
    let (governor, ledger) = governor_with_ledger(1_000);
    install_tiers(&governor).await;
    governor.set_executor_reward(Amount::new(1)).await;

    for _ in 0..200 {
        governor
            .execute_with_tiered_fee(alice(), bob(), Amount::new(15_000), Amount::new(150))
            .await
            .unwrap();
        governor.execute_with_reward(alice(), bob()).await.unwrap();
    }

    assert_eq!(ledger.pending_settlements(), 0);
    assert_eq!(ledger.balance_of(&bob()), Amount::new(200));
}

#[tokio::test]
async fn cashback_splits_fee_between_recipient_and_identity() {
    let (governor, ledger) = governor_with_ledger(0);
    install_tiers(&governor).await;
    governor.set_cashback_rate(BasisPoints::new(200)).await.unwrap();

    let receipt = governor
        .execute_with_tiered_fee_and_cashback(
            alice(),
            bob(),
            Amount::new(100_000),
            Amount::new(1000),
        )
        .await
        .unwrap();

    assert_eq!(receipt.fee, Amount::new(1000));
    assert_eq!(receipt.net_fee, Amount::new(980));
    assert_eq!(receipt.cashback, Amount::new(20));
    assert_eq!(ledger.balance_of(&Identity::new("treasury")), Amount::new(980));
    assert_eq!(ledger.balance_of(&alice()), Amount::new(20));
    assert_eq!(ledger.balance_of(&bob()), Amount::ZERO);
}

#[tokio::test]
async fn refused_transfer_rolls_back_everything() {
    let (governor, ledger) = governor_with_ledger(0);
    install_tiers(&governor).await;
    governor.set_cashback_rate(BasisPoints::new(200)).await.unwrap();
    governor.set_identity_limit(alice(), 5).await.unwrap();
    ledger.refuse_transfers_to(alice());

    let result = governor
        .execute_with_tiered_fee_and_cashback(
            alice(),
            alice(),
            Amount::new(100_000),
            Amount::new(1000),
        )
        .await;

    assert!(matches!(result, Err(GovernanceError::TransferFailure { .. })));
    assert_eq!(governor.global_executed_count().await, 0);
    assert_eq!(governor.identity_executed_count(&alice()).await, 0);
    assert_eq!(ledger.balance_of(&Identity::new("treasury")), Amount::ZERO);
    assert_eq!(ledger.escrow_balance(), Amount::ZERO);

    ledger.accept_transfers_to(&alice());
    governor
        .execute_with_tiered_fee_and_cashback(
            alice(),
            alice(),
            Amount::new(100_000),
            Amount::new(1000),
        )
        .await
        .unwrap();
    assert_eq!(governor.identity_executed_count(&alice()).await, 1);
}

#[tokio::test]
async fn overpayment_refund_policy_returns_excess_to_caller() {
    let (governor, ledger) = governor_with_ledger(0);
    install_tiers(&governor).await;

    governor
        .execute_with_tiered_fee(alice(), bob(), Amount::new(15_000), Amount::new(200))
        .await
        .unwrap();
    assert_eq!(ledger.escrow_balance(), Amount::new(50));

    governor
        .set_overpayment_policy(OverpaymentPolicy::Refund)
        .await;
    let receipt = governor
        .execute_with_tiered_fee(alice(), bob(), Amount::new(15_000), Amount::new(200))
        .await
        .unwrap();
    assert_eq!(receipt.refund, Amount::new(50));
    assert_eq!(ledger.balance_of(&bob()), Amount::new(50));
    assert_eq!(ledger.escrow_balance(), Amount::new(50));
}

#[tokio::test]
async fn reward_is_paid_from_escrow() {
    let (governor, ledger) = governor_with_ledger(100);
    governor.set_executor_reward(Amount::new(40)).await;

    let receipt = governor.execute_with_reward(alice(), bob()).await.unwrap();
    assert_eq!(receipt.reward, Amount::new(40));
    assert_eq!(ledger.balance_of(&bob()), Amount::new(40));
    assert_eq!(ledger.escrow_balance(), Amount::new(60));

    governor.execute_with_reward(alice(), bob()).await.unwrap();
    let drained = governor.execute_with_reward(alice(), bob()).await;
    assert!(matches!(drained, Err(GovernanceError::TransferFailure { .. })));
    assert_eq!(governor.global_executed_count().await, 2);
    assert_eq!(ledger.escrow_balance(), Amount::new(20));
}

#[tokio::test]
async fn bracket_administration_round_trip() {
    let (governor, _) = governor_with_ledger(0);
    install_tiers(&governor).await;

    assert!(matches!(
        governor
            .append_fee_bracket(FeeBracket::new(Amount::new(10_000), BasisPoints::new(10)))
            .await,
        Err(GovernanceError::BracketOrderViolation { .. })
    ));

    let removed = governor.pop_last_fee_bracket().await.unwrap();
    assert_eq!(removed.min_amount, Amount::new(10_000));
    assert_eq!(
        governor.resolve_fee_rate(Amount::new(50_000)).await,
        BasisPoints::new(50)
    );
}

struct FlakyMatchingEngine {
    reject: AtomicBool,
}

#[async_trait]
impl MatchingEnginePort for FlakyMatchingEngine {
    async fn fill(&self, request: &FillRequest) -> Result<FillAck, MatchingError> {
        if self.reject.load(Ordering::SeqCst) {
            return Err(MatchingError::Rejected {
                reason: "book closed".to_string(),
            });
        }
        Ok(FillAck {
            reference: format!("fill-{}", request.execution_id),
        })
    }
}

#[tokio::test]
async fn matching_rejection_reverts_settlement() {
    let ledger = Arc::new(InMemoryTransferLedger::new());
    let matching = Arc::new(FlakyMatchingEngine {
        reject: AtomicBool::new(true),
    });
    let governor = ExecutionGovernor::new(
        Default::default(),
        Arc::clone(&ledger),
        Arc::clone(&matching),
        Arc::new(NoOpEventPublisher),
    );
    governor
        .set_fee_recipient(Identity::new("treasury"))
        .await
        .unwrap();
    governor
        .set_flat_fee_rate(BasisPoints::new(100))
        .await
        .unwrap();

    let result = governor
        .execute_with_flat_fee(alice(), alice(), Amount::new(10_000))
        .await;
    assert!(matches!(result, Err(GovernanceError::MatchingRejected { .. })));
    assert_eq!(ledger.balance_of(&Identity::new("treasury")), Amount::ZERO);
    assert_eq!(ledger.escrow_balance(), Amount::ZERO);
    assert_eq!(governor.global_executed_count().await, 0);

    matching.reject.store(false, Ordering::SeqCst);
    let receipt = governor
        .execute_with_flat_fee(alice(), alice(), Amount::new(10_000))
        .await
        .unwrap();
    assert_eq!(receipt.fee, Amount::new(100));
    assert_eq!(ledger.balance_of(&Identity::new("treasury")), Amount::new(100));
    assert_eq!(ledger.escrow_balance(), Amount::new(9_900));
    assert_eq!(ledger.pending_settlements(), 0);
}

#[tokio::test]
async fn governor_built_from_yaml_settings() {
    let config = load_config_from_string(
        r"
governance:
  global_limit: 3
  identity_limits:
    alice: 1
  fee_recipient: treasury
  fee_brackets:
    - min_amount: 0
      fee_rate: 0
    - min_amount: 1000
      fee_rate: 50
",
    )
    .unwrap();

    let ledger = Arc::new(InMemoryTransferLedger::new());
    let governor = ExecutionGovernor::new(
        config.governance.build_state().unwrap(),
        ledger,
        Arc::new(PassThroughMatchingEngine::new()),
        Arc::new(NoOpEventPublisher),
    );

    assert_eq!(governor.global_limit().await, 3);
    assert_eq!(governor.identity_limit(&alice()).await, 1);
    assert_eq!(
        governor.resolve_fee_rate(Amount::new(2000)).await,
        BasisPoints::new(50)
    );

    let snapshot = governor.snapshot().await;
    assert_eq!(snapshot.fee_brackets.len(), 2);
    assert_eq!(snapshot.fee_recipient, Some(Identity::new("treasury")));
}
