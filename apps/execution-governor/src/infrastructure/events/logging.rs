//! Event publisher that writes every event to the structured log.

use async_trait::async_trait;

use crate::application::ports::{EventPublishError, EventPublisherPort};
use crate::domain::governance::GovernanceEvent;

/// Logs each event as a JSON payload under the `governance_events` target.
#[derive(Debug, Clone, Default)]
pub struct LoggingEventPublisher;

#[async_trait]
impl EventPublisherPort for LoggingEventPublisher {
    async fn publish(&self, events: Vec<GovernanceEvent>) -> Result<(), EventPublishError> {
        for event in events {
            let payload = serde_json::to_string(&event).map_err(|e| {
                EventPublishError::SerializationError {
                    message: e.to_string(),
                }
            })?;
            tracing::info!(
                target: "governance_events",
                event_type = event.event_type(),
                occurred_at = %event.occurred_at(),
                payload = %payload,
                "Governance event"
            );
        }
        Ok(())
    }
}
