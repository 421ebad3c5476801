/// Level and tag filtering in front of the formatter
use super::config::{is_debug_enabled_for_tag, with_logger_config, LoggerConfig};
use super::levels::LogLevel;
use super::tags::LogTag;

/// Filtering rules:
/// 1. Errors are always shown
/// 2. Anything above the minimum level is dropped
/// 3. Debug requires debug mode for the tag
/// 4. Verbose requires the global verbose level
/// 5. A non-empty `enabled_tags` set restricts the remaining tags
pub(super) fn should_log(config: &LoggerConfig, tag: &LogTag, level: LogLevel) -> bool {
    if level == LogLevel::Error {
        return true;
    }

    if level > config.min_level {
        return false;
    }

    if level == LogLevel::Debug {
        return is_debug_enabled_for_tag(config, tag) || config.min_level == LogLevel::Verbose;
    }

    if level == LogLevel::Verbose {
        return config.min_level == LogLevel::Verbose;
    }

    if !config.enabled_tags.is_empty() && !config.enabled_tags.contains(&tag.to_debug_key()) {
        return false;
    }

    true
}

pub(super) fn log_internal(tag: LogTag, level: LogLevel, message: &str) {
    if !with_logger_config(|config| should_log(config, &tag, level)) {
        return;
    }

    super::format::format_and_log(&tag, level, message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_requires_tag() {
        let mut config = LoggerConfig::default();
        config.min_level = LogLevel::Debug;
        config.debug_tags.insert("cache".to_string());

        assert!(should_log(&config, &LogTag::Cache, LogLevel::Debug));
        assert!(!should_log(&config, &LogTag::Request, LogLevel::Debug));
        assert!(should_log(&config, &LogTag::Request, LogLevel::Info));
        assert!(!should_log(&config, &LogTag::Cache, LogLevel::Verbose));
    }

    #[test]
    fn test_errors_bypass_filters() {
        let mut config = LoggerConfig::default();
        config.min_level = LogLevel::Warning;
        config.enabled_tags.insert("mock".to_string());

        assert!(should_log(&config, &LogTag::Cache, LogLevel::Error));
        assert!(!should_log(&config, &LogTag::Cache, LogLevel::Warning));
        assert!(should_log(&config, &LogTag::Mock, LogLevel::Warning));
        assert!(!should_log(&config, &LogTag::Mock, LogLevel::Info));
    }
}
