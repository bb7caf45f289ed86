//! Quota Bounded Context
//!
//! Caps the number of successful executions.
//!
//! # Key Concepts
//!
//! - **Global quota**: one counter shared by every identity
//! - **Identity quota**: one counter per identity, independent of the global one
//! - **Unlimited**: a limit of zero disables both checking and counting

pub mod errors;
pub mod ledger;

pub use errors::QuotaError;
pub use ledger::{Quota, QuotaLedger};
