/// Axum webserver implementation
///
/// Startup, graceful shutdown and the handle used by embedded callers
use axum::{middleware, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tower_http::cors::CorsLayer;

use crate::{
    config::{ApiConfig, PaginationConfig, WebserverConfig},
    logger::{self, LogTag},
    webserver::{middleware as mw, routes, state::AppState},
};

/// A running backend; dropping it does not stop the server, call `stop`
pub struct ServerHandle {
    addr: SocketAddr,
    shutdown: Arc<Notify>,
    task: JoinHandle<Result<(), String>>,
}

impl ServerHandle {
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Base URL for the dispatcher, without the `/api` prefix
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Trigger graceful shutdown and wait for the server task
    pub async fn stop(self) -> Result<(), String> {
        logger::debug(LogTag::Webserver, "Triggering webserver shutdown...");
        self.shutdown.notify_one();
        self.wait().await
    }

    /// Wait until the server exits on its own
    pub async fn wait(self) -> Result<(), String> {
        self.task
            .await
            .map_err(|e| format!("Webserver task failed: {}", e))?
    }
}

/// Bind and start serving in a background task
///
/// Port 0 binds an ephemeral port; read it back from `ServerHandle::addr`.
pub async fn start_server(
    webserver: &WebserverConfig,
    api: &ApiConfig,
    pagination: &PaginationConfig,
) -> Result<ServerHandle, String> {
    let state = Arc::new(AppState::from_config(webserver, api, pagination));
    start_with_state(&webserver.host, webserver.port, state).await
}

pub async fn start_with_state(host: &str, port: u16, state: Arc<AppState>) -> Result<ServerHandle, String> {
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .map_err(|e| format!("Invalid bind address: {}", e))?;

    let listener = TcpListener::bind(&addr).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::AddrInUse => format!(
            "Failed to bind to {}: Address already in use\n\
             \n\
             Another backend may already be running; pick a different port with\n\
             [webserver] port in the config file, or use port 0 for an ephemeral one.",
            addr
        ),
        std::io::ErrorKind::PermissionDenied => format!(
            "Failed to bind to {}: Permission denied\n\
             \n\
             Port {} requires elevated privileges on this system.\n\
             Consider using a port above 1024.",
            addr, port
        ),
        _ => format!("Failed to bind to {}: {}", addr, e),
    })?;
    let addr = listener
        .local_addr()
        .map_err(|e| format!("Failed to read bound address: {}", e))?;

    logger::info(
        LogTag::Webserver,
        &format!(
            "Mock backend listening on http://{} ({} enterprises, delay {}ms)",
            addr,
            state.store.len::<crate::domain::Enterprise>(),
            state.mock_delay.as_millis()
        ),
    );

    let app = build_app(state);
    let shutdown = Arc::new(Notify::new());
    let signal = Arc::clone(&shutdown);

    let task = tokio::spawn(async move {
        let shutdown_signal = async move {
            signal.notified().await;
            logger::debug(
                LogTag::Webserver,
                "Received shutdown signal, stopping webserver...",
            );
        };

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
            .map_err(|e| format!("Server error: {}", e))?;

        logger::debug(LogTag::Webserver, "Webserver stopped gracefully");
        Ok(())
    });

    Ok(ServerHandle {
        addr,
        shutdown,
        task,
    })
}

/// Build the Axum application with all routes and middleware
pub fn build_app(state: Arc<AppState>) -> Router {
    routes::create_router(Arc::clone(&state))
        .layer(middleware::from_fn_with_state(state, mw::mock_delay))
        .layer(middleware::from_fn(mw::request_log))
        .layer(CorsLayer::permissive())
}
