//! HTTP Server
//!
//! Binds a TCP listener and serves the todo router until stopped.

use crate::handler;
use crate::middleware::request_tracing;
use crate::state::AppState;
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use todo_core::application::{shutdown_channel, ShutdownSender};
use todo_core::error::{AppError, Result};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{error, info};

const DEFAULT_HTTP_HOST: &str = "127.0.0.1";
const DEFAULT_HTTP_PORT: u16 = 8787;

/// HTTP Server Configuration
#[derive(Debug, Clone)]
pub struct HttpServerConfig {
    pub host: String,
    /// 0 picks a free port
    pub port: u16,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HTTP_HOST.to_string(),
            port: DEFAULT_HTTP_PORT,
        }
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handler::new_list))
        .route("/healthz", get(handler::health))
        .route(
            "/{list_id}",
            get(handler::show_list).post(handler::submit_action),
        )
        .layer(axum::middleware::from_fn(request_tracing))
        .with_state(state)
}

/// HTTP Server
pub struct HttpServer {
    config: HttpServerConfig,
    state: AppState,
}

impl HttpServer {
    pub fn new(config: HttpServerConfig, state: AppState) -> Self {
        Self { config, state }
    }

    /// Bind and start serving in a background task
    pub async fn start(self) -> Result<HttpServerHandle> {
        let addr = format!("{}:{}", self.config.host, self.config.port);

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| AppError::Config(format!("Failed to bind {}: {}", addr, e)))?;
        let local_addr = listener.local_addr()?;

        info!(address = %local_addr, "HTTP server listening");

        let (shutdown, mut token) = shutdown_channel();
        let app = router(self.state);

        let task = tokio::spawn(async move {
            let result = axum::serve(listener, app)
                .with_graceful_shutdown(async move { token.wait().await })
                .await;
            if let Err(e) = &result {
                error!(error = %e, "HTTP server terminated with error");
            }
            result
        });

        Ok(HttpServerHandle {
            local_addr,
            shutdown,
            task,
        })
    }
}

/// Handle to a running server
pub struct HttpServerHandle {
    local_addr: SocketAddr,
    shutdown: ShutdownSender,
    task: JoinHandle<std::io::Result<()>>,
}

impl HttpServerHandle {
    /// Address actually bound (resolves port 0)
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stop accepting connections and wait for in-flight requests
    pub async fn stop(self) -> Result<()> {
        self.shutdown.shutdown();
        self.task
            .await
            .map_err(|e| AppError::Internal(format!("HTTP server task panicked: {}", e)))??;
        info!("HTTP server stopped");
        Ok(())
    }
}
