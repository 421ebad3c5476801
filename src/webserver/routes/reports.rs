use axum::{extract::State, response::Json, routing::get, Router};
use std::sync::Arc;

use crate::apis::ApiEnvelope;
use crate::domain::ReportSummary;
use crate::webserver::state::AppState;

/// Create report routes
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/reports/summary", get(get_summary))
}

async fn get_summary(State(state): State<Arc<AppState>>) -> Json<ApiEnvelope<ReportSummary>> {
    Json(ApiEnvelope::success(state.store.summary()))
}
