//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind the server to a listener with graceful shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::compiler::builder::LedgerSdk;
use crate::config::GatewayConfig;
use crate::http::handlers;
use crate::providers::probe::Prober;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub prober: Prober,
    pub sdk: Arc<dyn LedgerSdk>,
}

/// HTTP server for the transaction gateway.
pub struct HttpServer {
    router: Router,
    config: Arc<GatewayConfig>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and ledger
    /// SDK binding.
    pub fn new(config: GatewayConfig, sdk: Arc<dyn LedgerSdk>) -> Self {
        let config = Arc::new(config);
        let client = reqwest::Client::new();
        let state = AppState {
            config: config.clone(),
            prober: Prober::new(client, &config.probes),
            sdk,
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        let cardano = Router::new()
            .route("/status", get(handlers::cardano_status))
            .route("/readiness", get(handlers::cardano_readiness))
            .route("/dolos-status", get(handlers::dolos_status))
            .route("/dolos/health", get(handlers::dolos_health))
            .route("/dolos/version", get(handlers::dolos_version))
            .route("/address/{address}/balance", get(handlers::address_balance))
            .route("/address/{address}/utxos", get(handlers::address_utxos))
            .route("/txs/build", post(handlers::build_tx))
            .route("/txs/build/send-ada", post(handlers::build_send_ada));

        Router::new()
            .route("/health", get(handlers::liveness))
            .nest("/cardano", cardano)
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
