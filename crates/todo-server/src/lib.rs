#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

//! HTTP server for the todo API
//!
//! Every route is mounted inside a fault boundary: whatever a handler
//! returns, panics with, or the framework rejects, the client receives a
//! JSON error envelope with a meaningful status code.

mod boundary;
mod cors;
mod extract;
pub mod fault;
mod health;

use std::net::SocketAddr;

use axum::Router;
use todo_config::{Config, DEFAULT_PORT};
use tower_http::trace::TraceLayer;

pub use boundary::fault_boundary;
pub use extract::ValidJson;
pub use fault::Fault;

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration with no API routes mounted
    pub fn new(config: &Config) -> Self {
        Self::with_routes(config, Router::new())
    }

    /// Build the server from configuration, mounting `routes` inside the
    /// fault boundary next to the health check
    pub fn with_routes(config: &Config, routes: Router) -> Self {
        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)));

        let mut app = routes;

        // Health check
        if config.server.health.enabled {
            app = app.route(&config.server.health.path, axum::routing::get(health::health_handler));
        }

        // Apply middleware layers (innermost first)

        // Fault boundary (innermost, sees handler output first)
        app = fault_boundary(app);

        // Tracing
        app = app.layer(TraceLayer::new_for_http());

        // CORS
        if let Some(ref cors_config) = config.server.cors {
            app = app.layer(cors::cors_layer(cors_config));
        }

        Self {
            router: app,
            listen_address,
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
