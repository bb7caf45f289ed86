//! Matching engine adapter that accepts every fill.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

use crate::application::ports::{FillAck, FillRequest, MatchingEnginePort, MatchingError};

/// Accept-all implementation of `MatchingEnginePort`.
///
/// Assigns sequential references; used until a real engine is wired in.
#[derive(Debug, Default)]
pub struct PassThroughMatchingEngine {
    sequence: AtomicU64,
}

impl PassThroughMatchingEngine {
    /// Create a new adapter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fills accepted so far.
    #[must_use]
    pub fn fill_count(&self) -> u64 {
        self.sequence.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl MatchingEnginePort for PassThroughMatchingEngine {
    async fn fill(&self, request: &FillRequest) -> Result<FillAck, MatchingError> {
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::debug!(
            execution_id = %request.execution_id,
            mode = request.mode.as_str(),
            sequence,
            "Fill accepted"
        );
        Ok(FillAck {
            reference: format!("fill-{sequence}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::governance::ExecutionMode;
    use crate::domain::shared::{Amount, ExecutionId, Identity};

    #[tokio::test]
    async fn references_are_sequential() {
        let engine = PassThroughMatchingEngine::new();
        let request = FillRequest {
            execution_id: ExecutionId::new("e1"),
            mode: ExecutionMode::QuotaOnly,
            identity: Identity::new("alice"),
            amount: Amount::ZERO,
        };

        assert_eq!(engine.fill(&request).await.unwrap().reference, "fill-1");
        assert_eq!(engine.fill(&request).await.unwrap().reference, "fill-2");
        assert_eq!(engine.fill_count(), 2);
    }
}
