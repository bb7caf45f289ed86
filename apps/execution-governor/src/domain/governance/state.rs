//! Governor State Aggregate
//!
//! Owns the configuration registers, the fee tier table and the quota ledger.
//! Executions are planned read-only; the quota is consumed by
//! `commit_execution` only once the whole execution has gone through.

use chrono::Utc;

use super::config::{GovernanceConfig, OverpaymentPolicy};
use super::errors::GovernanceError;
use super::events::GovernanceEvent;
use super::execution::{ExecutionMode, ExecutionPlan, ExecutionRequest, Transfer, TransferKind};
use crate::domain::fee_schedule::{FeeBracket, FeeSplit, FeeTierTable, SettlementSplitter};
use crate::domain::quota::{Quota, QuotaLedger};
use crate::domain::shared::{Amount, BasisPoints, ExecutionId, Identity};

/// Governance aggregate.
#[derive(Debug, Clone, Default)]
pub struct GovernorState {
    config: GovernanceConfig,
    fee_table: FeeTierTable,
    quotas: QuotaLedger,
    events: Vec<GovernanceEvent>,
}

impl GovernorState {
    /// Create state from already-validated parts.
    #[must_use]
    pub const fn new(config: GovernanceConfig, fee_table: FeeTierTable, quotas: QuotaLedger) -> Self {
        Self {
            config,
            fee_table,
            quotas,
            events: Vec::new(),
        }
    }

    /// Configuration registers.
    #[must_use]
    pub const fn config(&self) -> &GovernanceConfig {
        &self.config
    }

    /// Fee tier table.
    #[must_use]
    pub const fn fee_table(&self) -> &FeeTierTable {
        &self.fee_table
    }

    /// Quota ledger.
    #[must_use]
    pub const fn quotas(&self) -> &QuotaLedger {
        &self.quotas
    }

    /// Take the events recorded since the last drain.
    pub fn drain_events(&mut self) -> Vec<GovernanceEvent> {
        std::mem::take(&mut self.events)
    }

    // ========================================================================
    // Administration
    // ========================================================================

    /// Set the global execution limit (0 = unlimited).
    pub fn set_global_limit(&mut self, limit: u64) {
        self.quotas.set_global_limit(limit);
        self.events.push(GovernanceEvent::GlobalLimitUpdated {
            limit,
            occurred_at: Utc::now(),
        });
    }

    /// Set an identity's execution limit (0 = unlimited).
    pub fn set_identity_limit(
        &mut self,
        identity: &Identity,
        limit: u64,
    ) -> Result<(), GovernanceError> {
        if identity.is_null() {
            return Err(GovernanceError::InvalidIdentity { role: "identity" });
        }
        self.quotas.set_identity_limit(identity, limit);
        self.events.push(GovernanceEvent::IdentityLimitUpdated {
            identity: identity.clone(),
            limit,
            occurred_at: Utc::now(),
        });
        Ok(())
    }

    /// Set the flat fee rate.
    pub fn set_flat_fee_rate(&mut self, rate: BasisPoints) -> Result<(), GovernanceError> {
        self.config.set_flat_fee_rate(rate)?;
        self.events.push(GovernanceEvent::FlatFeeRateUpdated {
            rate,
            occurred_at: Utc::now(),
        });
        Ok(())
    }

    /// Set the fee recipient.
    pub fn set_fee_recipient(&mut self, recipient: Identity) -> Result<(), GovernanceError> {
        self.config.set_fee_recipient(recipient.clone())?;
        self.events.push(GovernanceEvent::FeeRecipientUpdated {
            recipient,
            occurred_at: Utc::now(),
        });
        Ok(())
    }

    /// Set the executor reward.
    pub fn set_executor_reward(&mut self, reward: Amount) {
        self.config.set_executor_reward(reward);
        self.events.push(GovernanceEvent::ExecutorRewardUpdated {
            reward,
            occurred_at: Utc::now(),
        });
    }

    /// Set the cashback rate.
    pub fn set_cashback_rate(&mut self, rate: BasisPoints) -> Result<(), GovernanceError> {
        self.config.set_cashback_rate(rate)?;
        self.events.push(GovernanceEvent::CashbackRateUpdated {
            rate,
            occurred_at: Utc::now(),
        });
        Ok(())
    }

    /// Set the overpayment policy.
    pub fn set_overpayment_policy(&mut self, policy: OverpaymentPolicy) {
        self.config.set_overpayment_policy(policy);
        self.events.push(GovernanceEvent::OverpaymentPolicyUpdated {
            policy,
            occurred_at: Utc::now(),
        });
    }

    /// Append a fee bracket at the tail.
    pub fn append_fee_bracket(&mut self, bracket: FeeBracket) -> Result<(), GovernanceError> {
        self.fee_table.append(bracket)?;
        self.events.push(GovernanceEvent::FeeBracketAppended {
            bracket,
            occurred_at: Utc::now(),
        });
        Ok(())
    }

    /// Remove the tail fee bracket.
    pub fn pop_last_fee_bracket(&mut self) -> Result<FeeBracket, GovernanceError> {
        let bracket = self.fee_table.pop_last()?;
        self.events.push(GovernanceEvent::FeeBracketRemoved {
            bracket,
            occurred_at: Utc::now(),
        });
        Ok(bracket)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Fee rate the tier table assigns to `amount`.
    #[must_use]
    pub fn resolve_fee_rate(&self, amount: Amount) -> BasisPoints {
        self.fee_table.resolve(amount)
    }

    /// Global quota.
    #[must_use]
    pub const fn global_quota(&self) -> Quota {
        self.quotas.global()
    }

    /// Quota of one identity.
    #[must_use]
    pub fn identity_quota(&self, identity: &Identity) -> Quota {
        self.quotas.identity_quota(identity)
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Validate a request, check quota and stage the resulting transfers.
    ///
    /// Nothing is consumed; the plan is valid against this state until the
    /// next write.
    pub fn plan_execution(
        &self,
        request: &ExecutionRequest,
    ) -> Result<ExecutionPlan, GovernanceError> {
        let mode = request.mode();

        if request.identity().is_null() {
            return Err(GovernanceError::InvalidIdentity { role: "identity" });
        }
        if request.caller().is_null() {
            return Err(GovernanceError::InvalidIdentity { role: "caller" });
        }
        if mode.is_amount_bearing() && request.amount().is_zero() {
            return Err(GovernanceError::InvalidAmount);
        }

        let fee_rate = match mode {
            ExecutionMode::FlatFee => self.config.flat_fee_rate(),
            ExecutionMode::TieredFee | ExecutionMode::TieredFeeWithCashback => {
                self.fee_table.resolve(request.amount())
            }
            ExecutionMode::QuotaOnly | ExecutionMode::Reward => BasisPoints::ZERO,
        };
        let fee = SettlementSplitter::fee_for(request.amount(), fee_rate);

        if request.payment() < fee {
            return Err(GovernanceError::InsufficientPayment {
                required: fee,
                supplied: request.payment(),
            });
        }

        let recipient = if mode.is_fee_bearing() {
            Some(
                self.config
                    .fee_recipient()
                    .cloned()
                    .ok_or(GovernanceError::FeeRecipientNotSet)?,
            )
        } else {
            None
        };

        let split = if mode == ExecutionMode::TieredFeeWithCashback {
            SettlementSplitter::split(fee, self.config.cashback_rate())
        } else {
            FeeSplit::without_cashback(fee)
        };

        self.quotas.check(request.identity())?;

        let reward = if mode == ExecutionMode::Reward {
            self.config.executor_reward()
        } else {
            Amount::ZERO
        };
        let refund = if mode.is_payable()
            && self.config.overpayment_policy() == OverpaymentPolicy::Refund
        {
            request.payment().saturating_sub(fee)
        } else {
            Amount::ZERO
        };

        let mut transfers = Vec::with_capacity(4);
        let mut stage = |kind: TransferKind, to: &Identity, amount: Amount| {
            if !amount.is_zero() {
                transfers.push(Transfer {
                    kind,
                    to: to.clone(),
                    amount,
                });
            }
        };
        if let Some(recipient) = &recipient {
            stage(TransferKind::NetFee, recipient, split.net_fee);
        }
        stage(TransferKind::Cashback, request.identity(), split.cashback);
        stage(TransferKind::ExecutorReward, request.caller(), reward);
        stage(TransferKind::Refund, request.caller(), refund);

        Ok(ExecutionPlan {
            execution_id: ExecutionId::generate(),
            request: request.clone(),
            fee_rate,
            fee,
            split,
            reward,
            refund,
            transfers,
        })
    }

    /// Consume the quota of a planned execution after it went through.
    pub fn commit_execution(&mut self, plan: &ExecutionPlan) {
        self.quotas.record(plan.request.identity());
    }
}
