//! Use Cases
//!
//! Application-specific orchestration of the governance domain.

mod administration;
mod governor;

pub use governor::ExecutionGovernor;
