//! Data Transfer Objects (DTOs)
//!
//! Read models returned across API boundaries.

mod governance_dto;

pub use governance_dto::{GovernanceSnapshotDto, IdentityQuotaDto, QuotaDto};
