/// Runtime logger configuration
///
/// Set once from CLI flags at startup; read on every log call.
use super::levels::LogLevel;
use super::tags::LogTag;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Messages above this level are dropped
    pub min_level: LogLevel,
    /// Tags with debug output enabled (debug keys, lowercase)
    pub debug_tags: HashSet<String>,
    /// When non-empty, only these tags log below ERROR
    pub enabled_tags: HashSet<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            debug_tags: HashSet::new(),
            enabled_tags: HashSet::new(),
        }
    }
}

static LOGGER_CONFIG: Lazy<RwLock<LoggerConfig>> =
    Lazy::new(|| RwLock::new(LoggerConfig::default()));

pub fn get_logger_config() -> LoggerConfig {
    LOGGER_CONFIG.read().clone()
}

pub fn set_logger_config(config: LoggerConfig) {
    *LOGGER_CONFIG.write() = config;
}

/// Configure the logger from parsed CLI flags
///
/// `debug` holds tag keys (`cache`, `request`, ...); `all` enables every tag.
pub fn init_from_flags(debug: &[String], verbose: bool, quiet: bool) {
    let mut config = LoggerConfig::default();

    for tag in debug {
        config.debug_tags.insert(tag.trim().to_lowercase());
    }

    if verbose {
        config.min_level = LogLevel::Verbose;
    } else if !config.debug_tags.is_empty() {
        config.min_level = LogLevel::Debug;
    } else if quiet {
        config.min_level = LogLevel::Warning;
    }

    set_logger_config(config);
}

pub(super) fn is_debug_enabled_for_tag(config: &LoggerConfig, tag: &LogTag) -> bool {
    config.debug_tags.contains("all") || config.debug_tags.contains(&tag.to_debug_key())
}

pub(super) fn with_logger_config<R>(f: impl FnOnce(&LoggerConfig) -> R) -> R {
    f(&LOGGER_CONFIG.read())
}
