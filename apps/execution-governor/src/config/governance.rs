//! Initial governance settings applied at startup.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::fee_schedule::{FeeBracket, FeeTierTable};
use crate::domain::governance::{
    GovernanceConfig, GovernanceError, GovernorState, OverpaymentPolicy,
};
use crate::domain::quota::QuotaLedger;
use crate::domain::shared::{Amount, BasisPoints, Identity};

/// Seed values for the governor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GovernanceSettings {
    /// Global execution limit (0 = unlimited).
    #[serde(default)]
    pub global_limit: u64,
    /// Per-identity execution limits.
    #[serde(default)]
    pub identity_limits: BTreeMap<String, u64>,
    /// Flat fee rate (at most 1000 bps).
    #[serde(default)]
    pub flat_fee_rate: BasisPoints,
    /// Cashback rate (at most 500 bps).
    #[serde(default)]
    pub cashback_rate: BasisPoints,
    /// Fee recipient.
    #[serde(default)]
    pub fee_recipient: Option<String>,
    /// Executor reward in base units.
    #[serde(default)]
    pub executor_reward: Amount,
    /// Overpayment handling.
    #[serde(default)]
    pub overpayment_policy: OverpaymentPolicy,
    /// Fee brackets in ascending threshold order.
    #[serde(default)]
    pub fee_brackets: Vec<FeeBracket>,
    /// Value credited to the in-memory escrow at startup.
    #[serde(default)]
    pub escrow_seed: Amount,
}

impl GovernanceSettings {
    /// Build the initial governor state, enforcing the same rules as the
    /// administrative surface.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule.
    pub fn build_state(&self) -> Result<GovernorState, GovernanceError> {
        let mut config = GovernanceConfig::new();
        config.set_flat_fee_rate(self.flat_fee_rate)?;
        config.set_cashback_rate(self.cashback_rate)?;
        config.set_executor_reward(self.executor_reward);
        config.set_overpayment_policy(self.overpayment_policy);
        if let Some(recipient) = &self.fee_recipient {
            config.set_fee_recipient(Identity::new(recipient.as_str()))?;
        }

        let fee_table = FeeTierTable::from_brackets(self.fee_brackets.iter().copied())?;

        let mut quotas = QuotaLedger::new();
        quotas.set_global_limit(self.global_limit);
        for (identity, limit) in &self.identity_limits {
            let identity = Identity::new(identity.as_str());
            if identity.is_null() {
                return Err(GovernanceError::InvalidIdentity { role: "identity" });
            }
            quotas.set_identity_limit(&identity, *limit);
        }

        Ok(GovernorState::new(config, fee_table, quotas))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_build_empty_state() {
        let state = GovernanceSettings::default().build_state().unwrap();
        assert!(state.fee_table().is_empty());
        assert_eq!(state.global_quota().limit, 0);
        assert!(state.config().fee_recipient().is_none());
    }

    #[test]
    fn settings_seed_every_register() {
        let settings = GovernanceSettings {
            global_limit: 10,
            identity_limits: BTreeMap::from([("alice".to_string(), 2)]),
            flat_fee_rate: BasisPoints::new(30),
            cashback_rate: BasisPoints::new(200),
            fee_recipient: Some("treasury".to_string()),
            executor_reward: Amount::new(5),
            overpayment_policy: OverpaymentPolicy::Refund,
            fee_brackets: vec![
                FeeBracket::new(Amount::ZERO, BasisPoints::ZERO),
                FeeBracket::new(Amount::new(1000), BasisPoints::new(50)),
            ],
            escrow_seed: Amount::ZERO,
        };

        let state = settings.build_state().unwrap();
        assert_eq!(state.global_quota().limit, 10);
        assert_eq!(state.identity_quota(&Identity::new("alice")).limit, 2);
        assert_eq!(state.resolve_fee_rate(Amount::new(1500)), BasisPoints::new(50));
        assert_eq!(state.config().overpayment_policy(), OverpaymentPolicy::Refund);
        assert_eq!(
            state.config().fee_recipient(),
            Some(&Identity::new("treasury"))
        );
    }

    #[test]
    fn out_of_order_brackets_rejected() {
        let settings = GovernanceSettings {
            fee_brackets: vec![
                FeeBracket::new(Amount::new(1000), BasisPoints::new(50)),
                FeeBracket::new(Amount::new(1000), BasisPoints::new(60)),
            ],
            ..GovernanceSettings::default()
        };
        assert!(matches!(
            settings.build_state(),
            Err(GovernanceError::BracketOrderViolation { .. })
        ));
    }

    #[test]
    fn null_recipient_rejected() {
        let settings = GovernanceSettings {
            fee_recipient: Some("0x0000".to_string()),
            ..GovernanceSettings::default()
        };
        assert!(matches!(
            settings.build_state(),
            Err(GovernanceError::InvalidIdentity { .. })
        ));
    }
}
