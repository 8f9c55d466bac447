//! Claims handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use core_kernel::ClaimId;

use crate::{AppState, error::ApiError};
use crate::dto::claims::*;

/// Accepts a claim for asynchronous settlement
pub async fn submit_claim(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<IntakeResponse>), ApiError> {
    let Json(payload) = body?;
    let claim = state.processor.intake(&payload).await?;
    Ok((StatusCode::ACCEPTED, Json(IntakeResponse::from(&claim))))
}

/// Gets a stored claim and its settlement, if any
pub async fn get_claim(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let stored = state.processor.find_claim(&ClaimId::new(id)).await?;
    Ok(Json(ClaimResponse::from(stored)))
}
