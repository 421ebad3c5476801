use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::Uri,
    response::Json,
    routing::get,
    Router,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use crate::{
    apis::{ApiEnvelope, PageData, QueryParams},
    errors::ErrorCode,
    logger::{self, LogTag},
    mock::{ApiFailure, StoredRecord},
    webserver::state::AppState,
};

pub mod enterprises;
pub mod imports;
pub mod lab;
pub mod plants;
pub mod quarantine;
pub mod reports;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .fallback(unknown_route)
        .with_state(state)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health))
        .merge(enterprises::routes())
        .merge(imports::routes())
        .merge(plants::routes())
        .merge(quarantine::routes())
        .merge(lab::routes())
        .merge(reports::routes())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    uptime_seconds: u64,
}

async fn health(State(state): State<Arc<AppState>>) -> Json<ApiEnvelope<HealthResponse>> {
    Json(ApiEnvelope::success(HealthResponse {
        status: "ok",
        uptime_seconds: state.uptime_seconds(),
    }))
}

async fn unknown_route(uri: Uri) -> Json<ApiEnvelope<Value>> {
    respond::<Value>(Err(ApiFailure::new(
        ErrorCode::ResourceNotFound,
        format!("No route for {}", uri.path()),
    )))
}

/// Wrap a handler result in the response envelope
pub(crate) fn respond<T: Serialize>(result: Result<T, ApiFailure>) -> Json<ApiEnvelope<T>> {
    match result {
        Ok(data) => Json(ApiEnvelope::success(data)),
        Err(failure) => {
            logger::debug(LogTag::Mock, &format!("Answering {}", failure));
            Json(ApiEnvelope::failure(failure.code, failure.message))
        }
    }
}

/// Malformed JSON is answered in-envelope like any other invalid parameter
pub(crate) fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, ApiFailure> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ApiFailure::invalid(format!("Invalid request body: {}", rejection.body_text())))
}

/// Generic `GET /<resource>` handler
pub(crate) async fn list_records<R: StoredRecord>(
    State(state): State<Arc<AppState>>,
    Query(params): Query<QueryParams>,
) -> Json<ApiEnvelope<PageData<R>>> {
    respond(state.store.list::<R>(&params))
}

/// Generic `GET /<resource>/:id` handler
pub(crate) async fn record_detail<R: StoredRecord>(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Json<ApiEnvelope<R>> {
    respond(state.store.detail::<R>(&id))
}
