/// Configuration utilities - loading, saving and global access helpers
///
/// Library types receive their config sections by value; the global
/// instance exists for the binary entry points.
use super::schemas::Config;
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use std::path::Path;

/// Global configuration instance, set once by `load_config`
pub static CONFIG: OnceCell<RwLock<Config>> = OnceCell::new();

/// Default configuration file path
pub const CONFIG_FILE_PATH: &str = "data/config.toml";

/// Read a configuration file, falling back to defaults when it is missing
pub fn read_config_file(path: &str) -> Result<Config, String> {
    if !Path::new(path).exists() {
        return Ok(Config::default());
    }

    let contents = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config file '{}': {}", path, e))?;

    toml::from_str::<Config>(&contents)
        .map_err(|e| format!("Failed to parse config file '{}': {}", path, e))
}

/// Load configuration from `path` and initialize the global CONFIG
pub fn load_config(path: &str) -> Result<(), String> {
    let config = read_config_file(path)?;

    CONFIG
        .set(RwLock::new(config))
        .map_err(|_| "Config already initialized".to_string())
}

/// Execute a function with read access to the configuration
///
/// Falls back to defaults when `load_config` was never called.
pub fn with_config<F, R>(f: F) -> R
where
    F: FnOnce(&Config) -> R,
{
    match CONFIG.get() {
        Some(lock) => f(&lock.read()),
        None => f(&Config::default()),
    }
}

/// Get a clone of the entire configuration
pub fn get_config_clone() -> Config {
    with_config(|cfg| cfg.clone())
}

/// Write a configuration to disk as pretty TOML
pub fn save_config(config: &Config, path: &str) -> Result<(), String> {
    let contents =
        toml::to_string_pretty(config).map_err(|e| format!("Failed to serialize config: {}", e))?;

    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }
    }

    std::fs::write(path, contents)
        .map_err(|e| format!("Failed to write config file '{}': {}", path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = read_config_file("/nonexistent/quarantine/config.toml")
            .expect("missing file falls back to defaults");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_read_back() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");
        let path = path.to_str().expect("utf8 path");

        let mut config = Config::default();
        config.cache.max_size = 7;
        config.api.base_url = "http://localhost:9999".to_string();

        save_config(&config, path).expect("save");
        let loaded = read_config_file(path).expect("read");
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[cache\nmax_size = ").expect("write");

        let err = read_config_file(path.to_str().expect("utf8 path")).unwrap_err();
        assert!(err.contains("Failed to parse config file"));
    }
}
