//! Shared Value Objects
//!
//! Immutable domain types used across the quota, fee-schedule and governance contexts.
//! Value objects are compared by value, not identity.

mod amount;
mod basis_points;
mod identifiers;

pub use amount::Amount;
pub use basis_points::BasisPoints;
pub use identifiers::{ExecutionId, Identity};
