//! HTTP server for Sentinel's contract analysis API

#![allow(clippy::must_use_candidate)]

mod cors;
mod handler;
mod health;
mod invoker;
mod task;
pub mod tasks;

use std::net::SocketAddr;

use axum::Router;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use sentinel_config::Config;
use sentinel_core::ResponseEnvelope;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

pub use invoker::{InvokeError, Invoker, Prompt};
pub use task::Task;

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server and its upstream clients from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if an upstream HTTP client cannot be constructed
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let invoker = Invoker::from_config(config)?;
        Ok(Self::with_invoker(config, invoker))
    }

    /// Build the server around an existing invoker
    pub fn with_invoker(config: &Config, invoker: Invoker) -> Self {
        let mut app = Router::new();

        // Health check
        if config.server.health.enabled {
            app = app.route(&config.server.health.path, axum::routing::get(health::health_handler));
        }

        // Analysis routes
        app = app.merge(handler::analysis_router(invoker));

        // Apply middleware layers (innermost first)

        // Panics become error envelopes like any other failure
        app = app.layer(CatchPanicLayer::custom(panic_response));

        // Tracing
        app = app.layer(TraceLayer::new_for_http());

        // CORS
        if config.server.cors.enabled {
            app = app.layer(cors::cors_layer(&config.server.cors));
        }

        Self {
            router: app,
            listen_address: config.server.listen_address(),
        }
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}

#[allow(clippy::needless_pass_by_value)]
fn panic_response(panic: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let message = panic
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| panic.downcast_ref::<&str>().map(|s| (*s).to_owned()))
        .unwrap_or_else(|| "internal error".to_owned());

    tracing::error!(error = %message, "request handler panicked");

    (StatusCode::OK, axum::Json(ResponseEnvelope::error(message))).into_response()
}
