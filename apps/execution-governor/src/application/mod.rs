//! Application Layer
//!
//! Orchestrates the domain through use cases.
//!
//! - **Ports**: Interfaces for value transfer, matching and event publishing
//! - **Use Cases**: The execution governor
//! - **DTOs**: Read models for API boundaries

pub mod dto;
pub mod ports;
pub mod use_cases;

pub use dto::*;
pub use ports::*;
pub use use_cases::*;
