//! HTTP Controller (Driver Adapter)
//!
//! Axum-based REST API that delegates to the execution governor.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    response::IntoResponse,
    routing::{delete, get, post},
};

use crate::application::dto::{GovernanceSnapshotDto, IdentityQuotaDto};
use crate::application::ports::{EventPublisherPort, MatchingEnginePort, TransferPort};
use crate::application::use_cases::ExecutionGovernor;
use crate::domain::fee_schedule::FeeBracket;
use crate::domain::governance::{ExecutionReceipt, ExecutionRequest};
use crate::domain::shared::Identity;
use crate::error::ApiError;

use super::request::{
    ExecuteRequest, ExecutorRewardRequest, FeeRateQuery, FeeRecipientRequest, GlobalLimitRequest,
    IdentityLimitRequest, OverpaymentPolicyRequest, RateRequest,
};
use super::response::{FeeRateResponse, HealthResponse};

/// Application state shared across handlers.
pub struct AppState<T, M, E>
where
    T: TransferPort,
    M: MatchingEnginePort,
    E: EventPublisherPort,
{
    /// The governor.
    pub governor: Arc<ExecutionGovernor<T, M, E>>,
    /// Application version.
    pub version: String,
}

impl<T, M, E> Clone for AppState<T, M, E>
where
    T: TransferPort,
    M: MatchingEnginePort,
    E: EventPublisherPort,
{
    fn clone(&self) -> Self {
        Self {
            governor: Arc::clone(&self.governor),
            version: self.version.clone(),
        }
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

/// Create the HTTP router with all endpoints.
pub fn create_router<T, M, E>(state: AppState<T, M, E>) -> Router
where
    T: TransferPort + 'static,
    M: MatchingEnginePort + 'static,
    E: EventPublisherPort + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route("/api/v1/governance", get(snapshot))
        .route("/api/v1/admin/global-limit", post(set_global_limit))
        .route("/api/v1/admin/identity-limit", post(set_identity_limit))
        .route("/api/v1/admin/flat-fee-rate", post(set_flat_fee_rate))
        .route("/api/v1/admin/fee-recipient", post(set_fee_recipient))
        .route("/api/v1/admin/executor-reward", post(set_executor_reward))
        .route("/api/v1/admin/cashback-rate", post(set_cashback_rate))
        .route(
            "/api/v1/admin/overpayment-policy",
            post(set_overpayment_policy),
        )
        .route("/api/v1/admin/fee-brackets", post(append_fee_bracket))
        .route(
            "/api/v1/admin/fee-brackets/last",
            delete(pop_last_fee_bracket),
        )
        .route("/api/v1/identities/{identity}/quota", get(identity_quota))
        .route("/api/v1/fee-rate", get(fee_rate))
        .route("/api/v1/executions", post(execute))
        .with_state(state)
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::invalid_request(rejection.body_text()))
}

/// Health check endpoint.
async fn health_check<T, M, E>(State(state): State<AppState<T, M, E>>) -> impl IntoResponse
where
    T: TransferPort,
    M: MatchingEnginePort,
    E: EventPublisherPort,
{
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
    })
}

/// Full governance snapshot.
async fn snapshot<T, M, E>(State(state): State<AppState<T, M, E>>) -> Json<GovernanceSnapshotDto>
where
    T: TransferPort,
    M: MatchingEnginePort,
    E: EventPublisherPort,
{
    Json(state.governor.snapshot().await)
}

async fn set_global_limit<T, M, E>(
    State(state): State<AppState<T, M, E>>,
    payload: Result<Json<GlobalLimitRequest>, JsonRejection>,
) -> ApiResult<GovernanceSnapshotDto>
where
    T: TransferPort,
    M: MatchingEnginePort,
    E: EventPublisherPort,
{
    let request = json_body(payload)?;
    state.governor.set_global_limit(request.limit).await;
    Ok(Json(state.governor.snapshot().await))
}

async fn set_identity_limit<T, M, E>(
    State(state): State<AppState<T, M, E>>,
    payload: Result<Json<IdentityLimitRequest>, JsonRejection>,
) -> ApiResult<GovernanceSnapshotDto>
where
    T: TransferPort,
    M: MatchingEnginePort,
    E: EventPublisherPort,
{
    let request = json_body(payload)?;
    state
        .governor
        .set_identity_limit(request.identity, request.limit)
        .await?;
    Ok(Json(state.governor.snapshot().await))
}

async fn set_flat_fee_rate<T, M, E>(
    State(state): State<AppState<T, M, E>>,
    payload: Result<Json<RateRequest>, JsonRejection>,
) -> ApiResult<GovernanceSnapshotDto>
where
    T: TransferPort,
    M: MatchingEnginePort,
    E: EventPublisherPort,
{
    let request = json_body(payload)?;
    state.governor.set_flat_fee_rate(request.rate).await?;
    Ok(Json(state.governor.snapshot().await))
}

async fn set_fee_recipient<T, M, E>(
    State(state): State<AppState<T, M, E>>,
    payload: Result<Json<FeeRecipientRequest>, JsonRejection>,
) -> ApiResult<GovernanceSnapshotDto>
where
    T: TransferPort,
    M: MatchingEnginePort,
    E: EventPublisherPort,
{
    let request = json_body(payload)?;
    state.governor.set_fee_recipient(request.recipient).await?;
    Ok(Json(state.governor.snapshot().await))
}

async fn set_executor_reward<T, M, E>(
    State(state): State<AppState<T, M, E>>,
    payload: Result<Json<ExecutorRewardRequest>, JsonRejection>,
) -> ApiResult<GovernanceSnapshotDto>
where
    T: TransferPort,
    M: MatchingEnginePort,
    E: EventPublisherPort,
{
    let request = json_body(payload)?;
    state.governor.set_executor_reward(request.reward).await;
    Ok(Json(state.governor.snapshot().await))
}

async fn set_cashback_rate<T, M, E>(
    State(state): State<AppState<T, M, E>>,
    payload: Result<Json<RateRequest>, JsonRejection>,
) -> ApiResult<GovernanceSnapshotDto>
where
    T: TransferPort,
    M: MatchingEnginePort,
    E: EventPublisherPort,
{
    let request = json_body(payload)?;
    state.governor.set_cashback_rate(request.rate).await?;
    Ok(Json(state.governor.snapshot().await))
}

async fn set_overpayment_policy<T, M, E>(
    State(state): State<AppState<T, M, E>>,
    payload: Result<Json<OverpaymentPolicyRequest>, JsonRejection>,
) -> ApiResult<GovernanceSnapshotDto>
where
    T: TransferPort,
    M: MatchingEnginePort,
    E: EventPublisherPort,
{
    let request = json_body(payload)?;
    state.governor.set_overpayment_policy(request.policy).await;
    Ok(Json(state.governor.snapshot().await))
}

async fn append_fee_bracket<T, M, E>(
    State(state): State<AppState<T, M, E>>,
    payload: Result<Json<FeeBracket>, JsonRejection>,
) -> ApiResult<GovernanceSnapshotDto>
where
    T: TransferPort,
    M: MatchingEnginePort,
    E: EventPublisherPort,
{
    let bracket = json_body(payload)?;
    state.governor.append_fee_bracket(bracket).await?;
    Ok(Json(state.governor.snapshot().await))
}

async fn pop_last_fee_bracket<T, M, E>(
    State(state): State<AppState<T, M, E>>,
) -> ApiResult<FeeBracket>
where
    T: TransferPort,
    M: MatchingEnginePort,
    E: EventPublisherPort,
{
    Ok(Json(state.governor.pop_last_fee_bracket().await?))
}

async fn identity_quota<T, M, E>(
    State(state): State<AppState<T, M, E>>,
    Path(identity): Path<String>,
) -> Json<IdentityQuotaDto>
where
    T: TransferPort,
    M: MatchingEnginePort,
    E: EventPublisherPort,
{
    let identity = Identity::new(identity);
    let quota = state.governor.identity_quota(&identity).await;
    Json(IdentityQuotaDto {
        identity,
        quota: quota.into(),
    })
}

async fn fee_rate<T, M, E>(
    State(state): State<AppState<T, M, E>>,
    query: Result<Query<FeeRateQuery>, QueryRejection>,
) -> ApiResult<FeeRateResponse>
where
    T: TransferPort,
    M: MatchingEnginePort,
    E: EventPublisherPort,
{
    let Query(query) =
        query.map_err(|rejection| ApiError::invalid_request(rejection.body_text()))?;
    let fee_rate = state.governor.resolve_fee_rate(query.amount).await;
    Ok(Json(FeeRateResponse {
        amount: query.amount,
        fee_rate,
    }))
}

/// Execution endpoint for all five modes.
async fn execute<T, M, E>(
    State(state): State<AppState<T, M, E>>,
    payload: Result<Json<ExecuteRequest>, JsonRejection>,
) -> ApiResult<ExecutionReceipt>
where
    T: TransferPort,
    M: MatchingEnginePort,
    E: EventPublisherPort,
{
    let request = ExecutionRequest::from(json_body(payload)?);
    Ok(Json(state.governor.execute(request).await?))
}
