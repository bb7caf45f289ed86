//! Domain Layer
//!
//! Business rules of the governor with no infrastructure dependencies.
//!
//! # Bounded Contexts
//!
//! - [`quota`]: Global and per-identity execution counters
//! - [`fee_schedule`]: Tiered fee brackets and the recipient/cashback split
//! - [`governance`]: Configuration registers, execution planning and events

pub mod fee_schedule;
pub mod governance;
pub mod quota;
pub mod shared;
