//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the page handler
//! - Wire up middleware (tracing, timeout, classification, locale routing)
//! - Bind server to listener
//! - Shut down gracefully on Ctrl+C

use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, routing::get, Router};
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ServerConfig;
use crate::http::pages::{page_handler, PageSet};
use crate::i18n::{i18n_middleware, RoutingPolicy};
use crate::routing::{classify_middleware, Classifier, RouteClassifier};

/// Build the Axum router with all middleware layers.
///
/// Layers run outermost first: trace → timeout → classification → locale routing → handler.
#[allow(deprecated)]
pub fn build_router(config: &ServerConfig) -> Router {
    let i18n = Arc::new(config.i18n.clone());
    let policy = RoutingPolicy::new(i18n.clone());
    let classifier: Arc<dyn Classifier> = Arc::new(RouteClassifier::new(i18n));

    Router::new()
        .route("/", get(page_handler))
        .route("/{*path}", get(page_handler))
        .with_state(PageSet::from_config(&config.content))
        .layer(middleware::from_fn_with_state(policy, i18n_middleware))
        .layer(middleware::from_fn_with_state(classifier, classify_middleware))
        .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
        .layer(TraceLayer::new_for_http())
}

/// HTTP server for the locale router.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServerConfig) -> Self {
        let router = build_router(&config);
        Self { router, config }
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            default_locale = %self.config.i18n.default_locale,
            routing = ?self.config.i18n.routing,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
