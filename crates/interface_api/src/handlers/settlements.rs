//! Settlement handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;

use crate::{AppState, error::ApiError};
use crate::dto::settlements::*;

/// Settles a claim and generates its invoice
pub async fn settle_claim(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SettlementResponse>, ApiError> {
    let Json(payload) = body?;
    let settled = state.processor.settle_now(&payload).await?;
    Ok(Json(SettlementResponse::from(settled)))
}

/// Computes a settlement without persisting or publishing anything
pub async fn preview_settlement(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<PreviewResponse>, ApiError> {
    let Json(payload) = body?;
    let (claim, settlement) = state.processor.preview(&payload)?;
    Ok(Json(PreviewResponse { claim, settlement }))
}
