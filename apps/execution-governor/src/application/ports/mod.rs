//! Application Ports (Driven)
//!
//! Interfaces the governor uses to reach value transfer, matching and event
//! sinks.

mod event_publisher_port;
mod matching_engine_port;
mod transfer_port;

pub use event_publisher_port::{EventPublishError, EventPublisherPort, NoOpEventPublisher};
#[cfg(test)]
pub use matching_engine_port::MockMatchingEnginePort;
pub use matching_engine_port::{FillAck, FillRequest, MatchingEnginePort, MatchingError};
#[cfg(test)]
pub use transfer_port::MockTransferPort;
pub use transfer_port::{Settlement, TransferError, TransferPort};
