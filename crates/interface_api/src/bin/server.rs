//! Claim Settlement - API Server Binary
//!
//! This binary starts the HTTP API server and the background queue worker.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin claims-api
//!
//! # Run with environment variables
//! API_PORT=9000 SETTLEMENT_TAX_RATE=0.10 cargo run --bin claims-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `API_LOG_FORMAT` - `pretty` or `json` (default: pretty)
//! * `API_QUEUE_BATCH_SIZE` - Queued claims settled per batch (default: 10)
//! * `SETTLEMENT_CURRENCY` - Settlement currency (default: EUR)
//! * `SETTLEMENT_TAX_RATE` - Tax rate as a fraction (default: 0.21)
//! * `SETTLEMENT_DEPRECIATION_RATE` - Parts depreciation as a fraction (default: 0.20)
//! * `SETTLEMENT_DEPRECIATION_AGE_THRESHOLD` - Age in years above which parts are depreciated (default: 10)
//! * `SETTLEMENT_TIMEZONE` - IANA timezone deciding the current year (default: Europe/Madrid)

use anyhow::Context;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use core_kernel::{Clock, SystemClock};
use domain_settlement::SettlementEngine;
use interface_api::adapters::{
    ChannelClaimQueue, InMemoryClaimStore, InMemoryDocumentStore, InMemoryPublisher,
    LoggingNotifier, TextInvoiceRenderer,
};
use interface_api::config::{load_settlement_config, ApiConfig, LogFormat};
use interface_api::create_router;
use interface_api::service::{ClaimProcessor, Collaborators};
use interface_api::worker::QueueWorker;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().context("invalid API_* configuration")?;
    init_tracing(&config.log_level, config.log_format);

    let settlement_config =
        load_settlement_config().context("invalid SETTLEMENT_* configuration")?;

    tracing::info!(
        host = %config.host,
        port = %config.port,
        currency = %settlement_config.currency,
        tax_rate = %settlement_config.tax_rate,
        timezone = %settlement_config.timezone,
        "Starting claim settlement API server"
    );

    let clock: Arc<dyn Clock> = Arc::new(SystemClock::new(settlement_config.timezone));
    let tax_rate = settlement_config.tax_rate;
    let engine = SettlementEngine::new(settlement_config, clock.clone())?;

    let (queue, receiver) = ChannelClaimQueue::channel();
    let ports = Collaborators {
        store: Arc::new(InMemoryClaimStore::new()),
        queue: Arc::new(queue),
        publisher: Arc::new(InMemoryPublisher::new()),
        renderer: Arc::new(TextInvoiceRenderer::new(tax_rate, clock)),
        documents: Arc::new(InMemoryDocumentStore::new()),
        notifier: Arc::new(LoggingNotifier::new()),
    };
    let processor = ClaimProcessor::new(engine, ports);

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let worker = QueueWorker::new(processor.clone(), config.queue_batch_size);
    let worker_handle = tokio::spawn(worker.run(receiver, async move {
        let _ = shutdown_rx.changed().await;
    }));

    let app = create_router(processor);
    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("invalid server address {}", config.server_addr()))?;

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let _ = shutdown_tx.send(true);
    worker_handle.await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
fn init_tracing(log_level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init(),
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
