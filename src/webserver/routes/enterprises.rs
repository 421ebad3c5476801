use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Json,
    routing::get,
    Router,
};
use serde_json::Value;
use std::sync::Arc;

use super::{json_body, list_records, record_detail, respond};
use crate::apis::ApiEnvelope;
use crate::domain::{Enterprise, EnterpriseDraft, EnterpriseUpdate};
use crate::mock::store::parse_body;
use crate::webserver::state::AppState;

/// Create enterprise routes
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/enterprises",
            get(list_records::<Enterprise>).post(create_enterprise),
        )
        .route(
            "/enterprises/:id",
            get(record_detail::<Enterprise>)
                .put(update_enterprise)
                .delete(delete_enterprise),
        )
}

async fn create_enterprise(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Json<ApiEnvelope<Enterprise>> {
    respond(
        json_body(body)
            .and_then(parse_body::<EnterpriseDraft>)
            .and_then(|draft| state.store.create_enterprise(draft)),
    )
}

async fn update_enterprise(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Json<ApiEnvelope<Enterprise>> {
    respond(
        json_body(body)
            .and_then(parse_body::<EnterpriseUpdate>)
            .and_then(|update| state.store.update_enterprise(&id, update)),
    )
}

async fn delete_enterprise(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Json<ApiEnvelope<Enterprise>> {
    respond(state.store.delete_enterprise(&id))
}
