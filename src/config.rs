//! Configuration system
//!
//! - `schemas` - every config section with its defaults
//! - `utils` - loading from TOML, saving and global access helpers
//! - `macros` - the `config_struct!` macro

pub mod macros;
pub mod schemas;
pub mod utils;

pub use schemas::*;
pub use utils::{get_config_clone, load_config, read_config_file, save_config, with_config, CONFIG_FILE_PATH};
