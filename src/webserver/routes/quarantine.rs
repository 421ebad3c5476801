use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Json,
    routing::{get, patch},
    Router,
};
use serde_json::Value;
use std::sync::Arc;

use super::{json_body, list_records, record_detail, respond};
use crate::apis::ApiEnvelope;
use crate::domain::{QuarantineTask, TaskStatusUpdate};
use crate::mock::store::parse_body;
use crate::webserver::state::AppState;

/// Create quarantine processing routes
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/quarantine/tasks", get(list_records::<QuarantineTask>))
        .route("/quarantine/tasks/:id", get(record_detail::<QuarantineTask>))
        .route("/quarantine/tasks/:id/status", patch(update_task_status))
}

async fn update_task_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Json<ApiEnvelope<QuarantineTask>> {
    respond(
        json_body(body)
            .and_then(parse_body::<TaskStatusUpdate>)
            .and_then(|update| state.store.update_task_status(&id, update.status)),
    )
}
