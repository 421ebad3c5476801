use axum::{routing::get, Router};
use std::sync::Arc;

use super::{list_records, record_detail};
use crate::domain::IsolationPlant;
use crate::webserver::state::AppState;

/// Create isolation plant routes
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/plants", get(list_records::<IsolationPlant>))
        .route("/plants/:id", get(record_detail::<IsolationPlant>))
}
