//! Quota errors.

use std::fmt;

use crate::domain::shared::Identity;

/// Rejections raised by the quota ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuotaError {
    /// The global execution limit has been reached.
    GlobalLimitReached {
        /// Configured global limit.
        limit: u64,
    },

    /// The identity's execution limit has been reached.
    IdentityLimitReached {
        /// Identity whose quota is exhausted.
        identity: Identity,
        /// Configured identity limit.
        limit: u64,
    },
}

impl fmt::Display for QuotaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GlobalLimitReached { limit } => {
                write!(f, "Global execution limit reached ({limit})")
            }
            Self::IdentityLimitReached { identity, limit } => {
                write!(f, "Execution limit reached for {identity} ({limit})")
            }
        }
    }
}

impl std::error::Error for QuotaError {}
