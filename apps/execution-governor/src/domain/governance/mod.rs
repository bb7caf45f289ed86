//! Governance Bounded Context
//!
//! Combines quotas, the fee schedule and the configuration registers into the
//! aggregate every execution is planned against.
//!
//! # Key Concepts
//!
//! - **Governor state**: the consistency boundary (config, fee table, quotas)
//! - **Execution plan**: planned outcome of one execution attempt (fee, split, transfers)
//! - **Governance events**: records of committed changes

pub mod config;
pub mod errors;
pub mod events;
pub mod execution;
pub mod state;

pub use config::{GovernanceConfig, OverpaymentPolicy};
pub use errors::GovernanceError;
pub use events::GovernanceEvent;
pub use execution::{
    ExecutionMode, ExecutionPlan, ExecutionReceipt, ExecutionRequest, Transfer, TransferKind,
};
pub use state::GovernorState;
