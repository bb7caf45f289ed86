//! Governance DTOs

use serde::{Deserialize, Serialize};

use crate::domain::fee_schedule::FeeBracket;
use crate::domain::governance::{GovernorState, OverpaymentPolicy};
use crate::domain::quota::Quota;
use crate::domain::shared::{Amount, BasisPoints, Identity};

/// DTO for one quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaDto {
    /// Limit (0 = unlimited).
    pub limit: u64,
    /// Executions counted.
    pub executed: u64,
    /// Remaining executions (absent when unlimited).
    pub remaining: Option<u64>,
}

impl From<Quota> for QuotaDto {
    fn from(quota: Quota) -> Self {
        Self {
            limit: quota.limit,
            executed: quota.executed,
            remaining: quota.remaining(),
        }
    }
}

/// DTO for an identity's quota.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityQuotaDto {
    /// Identity.
    pub identity: Identity,
    /// Quota.
    #[serde(flatten)]
    pub quota: QuotaDto,
}

/// Read-only view of the whole governor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceSnapshotDto {
    /// Global quota.
    pub global: QuotaDto,
    /// Identities with an explicit quota entry.
    pub identities: Vec<IdentityQuotaDto>,
    /// Flat fee rate.
    pub flat_fee_rate: BasisPoints,
    /// Cashback rate.
    pub cashback_rate: BasisPoints,
    /// Fee recipient.
    pub fee_recipient: Option<Identity>,
    /// Executor reward.
    pub executor_reward: Amount,
    /// Overpayment policy.
    pub overpayment_policy: OverpaymentPolicy,
    /// Fee brackets in ascending threshold order.
    pub fee_brackets: Vec<FeeBracket>,
}

impl From<&GovernorState> for GovernanceSnapshotDto {
    fn from(state: &GovernorState) -> Self {
        let config = state.config();
        Self {
            global: state.global_quota().into(),
            identities: state
                .quotas()
                .identities()
                .into_iter()
                .map(|(identity, quota)| IdentityQuotaDto {
                    identity,
                    quota: quota.into(),
                })
                .collect(),
            flat_fee_rate: config.flat_fee_rate(),
            cashback_rate: config.cashback_rate(),
            fee_recipient: config.fee_recipient().cloned(),
            executor_reward: config.executor_reward(),
            overpayment_policy: config.overpayment_policy(),
            fee_brackets: state.fee_table().brackets().to_vec(),
        }
    }
}
