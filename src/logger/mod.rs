//! Tagged console logger for the quarantine console
//!
//! - Standard log levels (Error/Warning/Info/Debug/Verbose)
//! - Per-tag debug control (`--debug cache`, `--debug request`, ...)
//! - Colored, wrapped console output on stderr so table output on stdout stays clean
//!
//! ## Usage
//!
//! ```rust
//! use quarantine_console::logger::{self, LogTag};
//!
//! logger::info(LogTag::Cache, "Cache sweeper started");
//! logger::debug(LogTag::Request, "GET /api/enterprises served from cache"); // Only with --debug request
//! ```

mod config;
mod core;
mod format;
mod levels;
mod tags;

pub use config::{get_logger_config, init_from_flags, set_logger_config, LoggerConfig};
pub use format::print_stdout_safe;
pub use levels::LogLevel;
pub use tags::LogTag;

/// Log at ERROR level (always shown)
pub fn error(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Error, message);
}

/// Log at WARNING level
pub fn warning(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Warning, message);
}

/// Log at INFO level (standard operations)
pub fn info(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Info, message);
}

/// Log at DEBUG level
///
/// Only shown when debug mode is enabled for the tag (`--debug <tag>`).
pub fn debug(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Debug, message);
}

/// Log at VERBOSE level, only shown with `--verbose`
pub fn verbose(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Verbose, message);
}
