use axum::{routing::get, Router};
use std::sync::Arc;

use super::{list_records, record_detail};
use crate::domain::LabTest;
use crate::webserver::state::AppState;

/// Create laboratory test routes
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/lab/tests", get(list_records::<LabTest>))
        .route("/lab/tests/:id", get(record_detail::<LabTest>))
}
