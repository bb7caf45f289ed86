//! HTTP response DTOs.

use axum::Json;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::domain::shared::{Amount, BasisPoints};
use crate::error::ApiError;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}

/// Fee rate lookup response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeRateResponse {
    /// Queried notional.
    pub amount: Amount,
    /// Rate the tier table assigns.
    pub fee_rate: BasisPoints,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.code().http_status();
        (status, Json(self.to_http_response())).into_response()
    }
}
