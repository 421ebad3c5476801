/// Cache configuration
///
/// Built from the `[cache]` config section; tests use `custom` directly.
use crate::config::CacheSettings;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Disabled caches miss on every read and drop every write
    pub enabled: bool,

    /// Time-to-live for cached entries
    pub ttl: Duration,

    /// Maximum number of entries (oldest-inserted evicted when exceeded)
    pub capacity: usize,
}

impl CacheConfig {
    pub fn from_settings(settings: &CacheSettings) -> Self {
        Self {
            enabled: settings.enable,
            ttl: Duration::from_millis(settings.ttl_ms),
            capacity: settings.max_size.max(1),
        }
    }

    pub fn custom(ttl_ms: u64, capacity: usize) -> Self {
        Self {
            enabled: true,
            ttl: Duration::from_millis(ttl_ms),
            capacity: capacity.max(1),
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::from_settings(&CacheSettings::default())
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::from_settings(&CacheSettings::default())
    }
}
