// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::items_after_statements
    )
)]

//! Execution Governor - Rust Core Library
//!
//! Governance layer that sits in front of an order-matching engine and
//! decides whether an execution may proceed and how its fee is settled.
//!
//! # Architecture (Clean Architecture + DDD + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Core business logic
//!   - `quota`: Global and per-identity execution counters
//!   - `fee_schedule`: Ordered fee brackets, fee computation, cashback split
//!   - `governance`: Configuration registers, execution planning, events
//!
//! - **Application**: Use cases and orchestration
//!   - `ports`: Interfaces for external systems (`TransferPort`, `MatchingEnginePort`)
//!   - `use_cases`: `ExecutionGovernor` (executions and administration)
//!   - `dto`: Read models for API boundaries
//!
//! - **Infrastructure**: Adapters (implementations)
//!   - `ledger`: In-memory transfer ledger with escrow
//!   - `matching`: Pass-through matching engine
//!   - `events`: Structured-log event publisher
//!   - `http`: Axum REST API

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Cross-cutting
// =============================================================================

/// YAML configuration with environment interpolation.
pub mod config;

/// Error codes and HTTP error mapping.
pub mod error;

/// Logging and Prometheus metrics.
pub mod observability;

// =============================================================================
// Re-exports
// =============================================================================

// Domain re-exports
pub use domain::fee_schedule::{FeeBracket, FeeSplit, FeeTierTable, SettlementSplitter};
pub use domain::governance::{
    ExecutionMode, ExecutionReceipt, ExecutionRequest, GovernanceError, GovernanceEvent,
    GovernorState, OverpaymentPolicy,
};
pub use domain::quota::{Quota, QuotaLedger};
pub use domain::shared::{Amount, BasisPoints, ExecutionId, Identity};

// Application re-exports
pub use application::dto::{GovernanceSnapshotDto, IdentityQuotaDto, QuotaDto};
pub use application::ports::{
    EventPublisherPort, FillAck, FillRequest, MatchingEnginePort, MatchingError,
    NoOpEventPublisher, Settlement, TransferError, TransferPort,
};
pub use application::use_cases::ExecutionGovernor;

// Infrastructure re-exports
pub use infrastructure::events::LoggingEventPublisher;
pub use infrastructure::http::{AppState, create_router};
pub use infrastructure::ledger::InMemoryTransferLedger;
pub use infrastructure::matching::PassThroughMatchingEngine;

// Cross-cutting re-exports
pub use error::{ApiError, ErrorCode, HttpErrorResponse};
