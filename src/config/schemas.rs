/// Configuration schemas - all config structures defined once with defaults
///
/// Field names follow the dashboard's environment-style settings
/// (`baseURL`, `mockDelay`, `cache.maxSize`, ...) in snake_case form.
use crate::config_struct;
use std::time::Duration;

// ============================================================================
// API CONFIGURATION
// ============================================================================

config_struct! {
    /// Backend API access
    pub struct ApiConfig {
        /// Base URL prepended to every request path
        base_url: String = "http://127.0.0.1:8080".to_string(),
        /// Serve data from the built-in mock backend
        mock: bool = true,
        /// Artificial latency added by the mock backend (milliseconds)
        mock_delay_ms: u64 = 300,
        /// Per-call timeout (milliseconds)
        timeout_ms: u64 = 10_000,
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn mock_delay(&self) -> Duration {
        Duration::from_millis(self.mock_delay_ms)
    }
}

// ============================================================================
// PAGINATION CONFIGURATION
// ============================================================================

config_struct! {
    /// List paging limits
    pub struct PaginationConfig {
        default_page_size: usize = 10,
        max_page_size: usize = 100,
    }
}

impl PaginationConfig {
    /// Clamp a requested page size into `1..=max_page_size`
    pub fn clamp_page_size(&self, requested: usize) -> usize {
        requested.clamp(1, self.max_page_size.max(1))
    }
}

// ============================================================================
// CACHE CONFIGURATION
// ============================================================================

config_struct! {
    /// Request cache settings
    pub struct CacheSettings {
        enable: bool = true,
        /// Entry lifetime (milliseconds)
        ttl_ms: u64 = 300_000,
        /// Maximum number of entries before insertion-order eviction
        max_size: usize = 100,
        /// Background sweep interval (milliseconds), 0 disables the sweeper
        sweep_interval_ms: u64 = 60_000,
    }
}

// ============================================================================
// RETRY CONFIGURATION
// ============================================================================

config_struct! {
    /// Automatic retries for idempotent reads
    pub struct RetryConfig {
        /// Extra attempts after a GET transport failure (mutations never retry)
        count: u32 = 1,
        /// Pause before a retry (milliseconds)
        delay_ms: u64 = 200,
    }
}

// ============================================================================
// WEBSERVER CONFIGURATION
// ============================================================================

config_struct! {
    /// Mock backend listener
    pub struct WebserverConfig {
        host: String = "127.0.0.1".to_string(),
        port: u16 = 8080,
        /// Seed for the random fixtures (same seed, same data)
        fixture_seed: u64 = 20240601,
        /// Records generated per resource
        fixture_count: usize = 120,
    }
}

// ============================================================================
// ROOT CONFIGURATION
// ============================================================================

config_struct! {
    /// Root configuration loaded from `data/config.toml`
    pub struct Config {
        api: ApiConfig = ApiConfig::default(),
        pagination: PaginationConfig = PaginationConfig::default(),
        cache: CacheSettings = CacheSettings::default(),
        retry: RetryConfig = RetryConfig::default(),
        webserver: WebserverConfig = WebserverConfig::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_dashboard_settings() {
        let config = Config::default();
        assert_eq!(config.pagination.default_page_size, 10);
        assert_eq!(config.pagination.max_page_size, 100);
        assert_eq!(config.api.timeout(), Duration::from_millis(10_000));
        assert!(config.cache.enable);
        assert_eq!(config.cache.ttl_ms, 300_000);
        assert_eq!(config.cache.max_size, 100);
        assert_eq!(config.retry.count, 1);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [cache]
            max_size = 5

            [api]
            mock = false
            "#,
        )
        .expect("partial config should parse");

        assert_eq!(config.cache.max_size, 5);
        assert_eq!(config.cache.ttl_ms, 300_000);
        assert!(!config.api.mock);
        assert_eq!(config.api.timeout_ms, 10_000);
    }

    #[test]
    fn test_clamp_page_size() {
        let pagination = PaginationConfig::default();
        assert_eq!(pagination.clamp_page_size(0), 1);
        assert_eq!(pagination.clamp_page_size(25), 25);
        assert_eq!(pagination.clamp_page_size(500), 100);
    }
}
