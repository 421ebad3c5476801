//! Request cache
//!
//! A bounded key -> (value, stored_at) map with TTL expiry and
//! insertion-order eviction, shared by the request dispatcher.

pub mod config;
pub mod manager;

pub use config::CacheConfig;
pub use manager::{CacheMetrics, CacheStore};
