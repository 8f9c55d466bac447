//! HTTP API Layer
//!
//! This crate exposes the claim settlement workflow over REST using Axum and
//! hosts the asynchronous queue worker.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for claims and settlements
//! - **Service**: `ClaimProcessor`, shared by HTTP and the queue worker
//! - **Worker**: Batch consumer of queued claims
//! - **Adapters**: In-memory ports and the invoice renderer
//! - **Error Handling**: Consistent error responses
//!
//! # Routes
//!
//! ```text
//! GET  /health
//! POST /api/v1/claims                  intake, queued settlement
//! GET  /api/v1/claims/:id              stored claim and settlement
//! POST /api/v1/settlements             settle now, generate invoice
//! POST /api/v1/settlements/preview     settlement only, no side effects
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod service;
pub mod worker;
pub mod adapters;

use axum::{
    Router,
    routing::{get, post},
    middleware as axum_middleware,
};
use tower_http::cors::{CorsLayer, Any};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{claims, health, settlements};
use crate::middleware::audit_middleware;
use crate::service::ClaimProcessor;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub processor: ClaimProcessor,
}

/// Creates the main API router
pub fn create_router(processor: ClaimProcessor) -> Router {
    let state = AppState { processor };

    let public_routes = Router::new()
        .route("/health", get(health::health_check));

    let claims_routes = Router::new()
        .route("/", post(claims::submit_claim))
        .route("/:id", get(claims::get_claim));

    let settlement_routes = Router::new()
        .route("/", post(settlements::settle_claim))
        .route("/preview", post(settlements::preview_settlement));

    let api_routes = Router::new()
        .nest("/claims", claims_routes)
        .nest("/settlements", settlement_routes)
        .layer(axum_middleware::from_fn(audit_middleware));

    // Layers run bottom-up: the request id is set before tracing sees it
    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
