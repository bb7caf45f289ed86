//! Stable error codes and the HTTP error body.
//!
//! # HTTP Status Codes
//!
//! | Status | Usage |
//! |--------|-------|
//! | `400` | Malformed request, null identity, zero amount |
//! | `402` | Payment below the computed fee |
//! | `412` | Fee recipient not configured |
//! | `422` | Administrative cap or bracket ordering violated |
//! | `429` | Global or identity quota exhausted |
//! | `502` | Transfer or matching engine failure |
//! | `500` | Unexpected server error |

use std::collections::HashMap;

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::governance::GovernanceError;

/// Error codes for the governor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation errors
    /// Malformed request body or query.
    InvalidRequest,
    /// Null identity.
    InvalidIdentity,
    /// Zero notional.
    InvalidAmount,

    // Quota errors
    /// Global quota exhausted.
    GlobalLimitReached,
    /// Identity quota exhausted.
    IdentityLimitReached,

    // Administrative errors
    /// Fee rate above cap.
    FeeTooHigh,
    /// Cashback rate above cap.
    CashbackTooHigh,
    /// Bracket threshold not increasing.
    BracketOrderViolation,
    /// Pop on an empty bracket table.
    EmptyBracketTable,

    // Payment errors
    /// Payment below fee.
    InsufficientPayment,
    /// No fee recipient configured.
    FeeRecipientNotSet,

    // Downstream errors
    /// Transfer failed.
    TransferFailure,
    /// Matching engine rejected the fill.
    MatchingRejected,

    /// Internal server error.
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status for this error.
    #[must_use]
    pub const fn http_status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest | Self::InvalidIdentity | Self::InvalidAmount => {
                StatusCode::BAD_REQUEST
            }
            Self::GlobalLimitReached | Self::IdentityLimitReached => StatusCode::TOO_MANY_REQUESTS,
            Self::FeeTooHigh
            | Self::CashbackTooHigh
            | Self::BracketOrderViolation
            | Self::EmptyBracketTable => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InsufficientPayment => StatusCode::PAYMENT_REQUIRED,
            Self::FeeRecipientNotSet => StatusCode::PRECONDITION_FAILED,
            Self::TransferFailure | Self::MatchingRejected => StatusCode::BAD_GATEWAY,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error reason string.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::InvalidIdentity => "INVALID_IDENTITY",
            Self::InvalidAmount => "INVALID_AMOUNT",
            Self::GlobalLimitReached => "GLOBAL_LIMIT_REACHED",
            Self::IdentityLimitReached => "IDENTITY_LIMIT_REACHED",
            Self::FeeTooHigh => "FEE_TOO_HIGH",
            Self::CashbackTooHigh => "CASHBACK_TOO_HIGH",
            Self::BracketOrderViolation => "BRACKET_ORDER_VIOLATION",
            Self::EmptyBracketTable => "EMPTY_BRACKET_TABLE",
            Self::InsufficientPayment => "INSUFFICIENT_PAYMENT",
            Self::FeeRecipientNotSet => "FEE_RECIPIENT_NOT_SET",
            Self::TransferFailure => "TRANSFER_FAILURE",
            Self::MatchingRejected => "MATCHING_REJECTED",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason())
    }
}

impl GovernanceError {
    /// Get the stable error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidIdentity { .. } => ErrorCode::InvalidIdentity,
            Self::InvalidAmount => ErrorCode::InvalidAmount,
            Self::GlobalLimitReached { .. } => ErrorCode::GlobalLimitReached,
            Self::IdentityLimitReached { .. } => ErrorCode::IdentityLimitReached,
            Self::FeeTooHigh { .. } => ErrorCode::FeeTooHigh,
            Self::CashbackTooHigh { .. } => ErrorCode::CashbackTooHigh,
            Self::BracketOrderViolation { .. } => ErrorCode::BracketOrderViolation,
            Self::EmptyBracketTable => ErrorCode::EmptyBracketTable,
            Self::InsufficientPayment { .. } => ErrorCode::InsufficientPayment,
            Self::FeeRecipientNotSet => ErrorCode::FeeRecipientNotSet,
            Self::TransferFailure { .. } => ErrorCode::TransferFailure,
            Self::MatchingRejected { .. } => ErrorCode::MatchingRejected,
        }
    }
}

/// A coded error with context, as returned by the HTTP surface.
#[derive(Debug, Error)]
pub struct ApiError {
    code: ErrorCode,
    message: String,
    context: Vec<(String, String)>,
}

impl ApiError {
    /// Create a new API error.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: Vec::new(),
        }
    }

    /// Add context to the error.
    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.push((key.into(), value.into()));
        self
    }

    /// Malformed request.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Get the error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Get the message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Convert to the HTTP error body.
    #[must_use]
    pub fn to_http_response(&self) -> HttpErrorResponse {
        HttpErrorResponse {
            code: self.code.reason().to_string(),
            message: self.message.clone(),
            details: self.context.iter().cloned().collect(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code.reason(), self.message)
    }
}

impl From<GovernanceError> for ApiError {
    fn from(err: GovernanceError) -> Self {
        let error = Self::new(err.code(), err.to_string());
        match err {
            GovernanceError::InvalidIdentity { role } => error.with_context("role", role),
            GovernanceError::GlobalLimitReached { limit } => {
                error.with_context("limit", limit.to_string())
            }
            GovernanceError::IdentityLimitReached { identity, limit } => error
                .with_context("identity", identity.into_inner())
                .with_context("limit", limit.to_string()),
            GovernanceError::FeeTooHigh { rate, max }
            | GovernanceError::CashbackTooHigh { rate, max } => error
                .with_context("rate", rate.value().to_string())
                .with_context("max", max.value().to_string()),
            GovernanceError::BracketOrderViolation {
                min_amount,
                tail_min_amount,
            } => error
                .with_context("min_amount", min_amount.to_string())
                .with_context("tail_min_amount", tail_min_amount.to_string()),
            GovernanceError::InsufficientPayment { required, supplied } => error
                .with_context("required", required.to_string())
                .with_context("supplied", supplied.to_string()),
            GovernanceError::InvalidAmount
            | GovernanceError::EmptyBracketTable
            | GovernanceError::FeeRecipientNotSet
            | GovernanceError::TransferFailure { .. }
            | GovernanceError::MatchingRejected { .. } => error,
        }
    }
}

/// HTTP error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpErrorResponse {
    /// Error code string.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Additional details.
    pub details: HashMap<String, String>,
}
