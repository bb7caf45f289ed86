//! Quota ledger: global and per-identity execution counters.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::errors::QuotaError;
use crate::domain::shared::Identity;

/// A single execution quota.
///
/// `limit == 0` means unlimited. Otherwise `executed <= limit` holds after
/// every successful check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quota {
    /// Maximum number of successful executions (0 = unlimited).
    pub limit: u64,
    /// Successful executions counted so far.
    pub executed: u64,
}

impl Quota {
    /// Create an unused quota with the given limit.
    #[must_use]
    pub const fn with_limit(limit: u64) -> Self {
        Self { limit, executed: 0 }
    }

    /// Returns true if a limit is enforced.
    #[must_use]
    pub const fn is_limited(&self) -> bool {
        self.limit > 0
    }

    /// Returns true if no further executions are allowed.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.is_limited() && self.executed >= self.limit
    }

    /// Remaining executions, or `None` when unlimited.
    #[must_use]
    pub const fn remaining(&self) -> Option<u64> {
        if self.is_limited() {
            Some(self.limit.saturating_sub(self.executed))
        } else {
            None
        }
    }

    fn consume(&mut self) {
        if self.is_limited() {
            self.executed += 1;
        }
    }
}

/// Tracks the global counter and every identity counter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuotaLedger {
    global: Quota,
    identities: HashMap<Identity, Quota>,
}

impl QuotaLedger {
    /// Create a ledger with no limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check both quotas and, if both pass, consume one unit of each limited one.
    ///
    /// A rejection leaves every counter untouched.
    pub fn check_and_increment(&mut self, identity: &Identity) -> Result<(), QuotaError> {
        self.check(identity)?;
        self.record(identity);
        Ok(())
    }

    /// Check both quotas without consuming anything.
    pub fn check(&self, identity: &Identity) -> Result<(), QuotaError> {
        if self.global.is_exhausted() {
            return Err(QuotaError::GlobalLimitReached {
                limit: self.global.limit,
            });
        }

        let identity_quota = self.identity_quota(identity);
        if identity_quota.is_exhausted() {
            return Err(QuotaError::IdentityLimitReached {
                identity: identity.clone(),
                limit: identity_quota.limit,
            });
        }
        Ok(())
    }

    /// Consume one unit of the global quota and, if limited, of the
    /// identity's quota. Callers check first.
    pub fn record(&mut self, identity: &Identity) {
        self.global.consume();
        if let Some(quota) = self.identities.get_mut(identity) {
            quota.consume();
        }
    }

    /// Global quota.
    #[must_use]
    pub const fn global(&self) -> Quota {
        self.global
    }

    /// Quota for an identity (default unlimited, unused).
    #[must_use]
    pub fn identity_quota(&self, identity: &Identity) -> Quota {
        self.identities.get(identity).copied().unwrap_or_default()
    }

    /// Set the global limit. The executed counter is kept.
    pub fn set_global_limit(&mut self, limit: u64) {
        self.global.limit = limit;
    }

    /// Set an identity's limit. The executed counter is kept.
    pub fn set_identity_limit(&mut self, identity: &Identity, limit: u64) {
        self.identities
            .entry(identity.clone())
            .and_modify(|quota| quota.limit = limit)
            .or_insert(Quota::with_limit(limit));
    }

    /// Identities with an explicit quota entry, sorted by identity.
    #[must_use]
    pub fn identities(&self) -> Vec<(Identity, Quota)> {
        let mut entries: Vec<_> = self
            .identities
            .iter()
            .map(|(id, quota)| (id.clone(), *quota))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }
}
