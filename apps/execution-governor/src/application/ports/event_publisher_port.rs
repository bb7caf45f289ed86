//! Event Publisher Port (Driven Port)
//!
//! Interface for publishing governance events to external systems.

use async_trait::async_trait;

use crate::domain::governance::GovernanceEvent;

/// Event publishing error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EventPublishError {
    /// Serialization error.
    #[error("Event serialization error: {message}")]
    SerializationError {
        /// Error details.
        message: String,
    },

    /// Publishing failed.
    #[error("Event publish failed: {message}")]
    PublishFailed {
        /// Error details.
        message: String,
    },
}

/// Port for publishing governance events.
#[async_trait]
pub trait EventPublisherPort: Send + Sync {
    /// Publish events in order.
    async fn publish(&self, events: Vec<GovernanceEvent>) -> Result<(), EventPublishError>;

    /// Publish a single event.
    async fn publish_one(&self, event: GovernanceEvent) -> Result<(), EventPublishError> {
        self.publish(vec![event]).await
    }
}

/// No-op event publisher for testing.
#[derive(Debug, Clone, Default)]
pub struct NoOpEventPublisher;

#[async_trait]
impl EventPublisherPort for NoOpEventPublisher {
    async fn publish(&self, _events: Vec<GovernanceEvent>) -> Result<(), EventPublishError> {
        Ok(())
    }
}
