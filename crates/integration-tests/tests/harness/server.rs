//! Test server wrapper that starts the todo server on a random port

use std::net::SocketAddr;

use axum::Router;
use todo_client::TodoClient;
use todo_config::Config;
use todo_server::Server;
use tokio_util::sync::CancellationToken;

/// A running test server instance
pub struct TestServer {
    addr: SocketAddr,
    shutdown: CancellationToken,
    client: reqwest::Client,
}

impl TestServer {
    /// Start a test server with only the built-in routes
    pub async fn start(config: Config) -> anyhow::Result<Self> {
        Self::start_with_routes(config, Router::new()).await
    }

    /// Start a test server with `routes` mounted inside the fault boundary
    ///
    /// Binds to port 0 for automatic port assignment
    pub async fn start_with_routes(config: Config, routes: Router) -> anyhow::Result<Self> {
        let server = Server::with_routes(&config, routes);
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        // Bind the listener here so we know the actual port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        tokio::spawn(async move {
            axum::serve(listener, server.into_router())
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        let client = reqwest::Client::new();

        Ok(Self { addr, shutdown, client })
    }

    /// Absolute URL for a path on the running test server
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// Raw HTTP client for wire-level assertions
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Typed gateway pointed at this server
    pub fn api(&self) -> TodoClient {
        TodoClient::new(&self.url("")).expect("valid test server URL")
    }

    /// Server address
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
