/// Webserver middleware
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::{
    logger::{self, LogTag},
    webserver::state::AppState,
};

/// Hold every request for the configured mock delay
pub async fn mock_delay(State(state): State<Arc<AppState>>, request: Request, next: Next) -> Response {
    if !state.mock_delay.is_zero() {
        tokio::time::sleep(state.mock_delay).await;
    }
    next.run(request).await
}

/// Log method, path and latency of each request
pub async fn request_log(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = std::time::Instant::now();

    let response = next.run(request).await;

    logger::debug(
        LogTag::Webserver,
        &format!(
            "{} {} -> {} in {}ms",
            method,
            uri,
            response.status().as_u16(),
            started.elapsed().as_millis()
        ),
    );
    response
}
