use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
    routing::get,
    Router,
};
use serde_json::Value;
use std::sync::Arc;

use super::{json_body, list_records, record_detail, respond};
use crate::apis::ApiEnvelope;
use crate::domain::{ImportDraft, ImportRecord};
use crate::mock::store::parse_body;
use crate::webserver::state::AppState;

/// Create import declaration routes
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/imports", get(list_records::<ImportRecord>).post(create_import))
        .route("/imports/:id", get(record_detail::<ImportRecord>))
}

async fn create_import(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Json<ApiEnvelope<ImportRecord>> {
    respond(
        json_body(body)
            .and_then(parse_body::<ImportDraft>)
            .and_then(|draft| state.store.create_import(draft)),
    )
}
