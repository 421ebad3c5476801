/// Shared application state for the mock backend
use crate::config::{ApiConfig, PaginationConfig, WebserverConfig};
use crate::mock::MockStore;
use std::sync::Arc;
use std::time::Duration;

/// Shared application state passed to all route handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MockStore>,

    /// Artificial latency applied to every response
    pub mock_delay: Duration,

    pub startup_time: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    pub fn new(store: Arc<MockStore>, mock_delay: Duration) -> Self {
        Self {
            store,
            mock_delay,
            startup_time: chrono::Utc::now(),
        }
    }

    /// Seed a fresh store from configuration
    pub fn from_config(
        webserver: &WebserverConfig,
        api: &ApiConfig,
        pagination: &PaginationConfig,
    ) -> Self {
        let store = MockStore::seeded(
            webserver.fixture_seed,
            webserver.fixture_count,
            pagination.clone(),
        );
        Self::new(Arc::new(store), api.mock_delay())
    }

    pub fn uptime_seconds(&self) -> u64 {
        (chrono::Utc::now() - self.startup_time)
            .num_seconds()
            .max(0) as u64
    }
}
