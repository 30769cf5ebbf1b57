//! Configuration file loading for askema
//!
//! This module handles file I/O and merging of configuration from multiple
//! sources. The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./askema.toml` or `./.askema.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/askema/config.toml`
//! 4. Fallback: `~/.config/askema/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{FileConfig, FileOllamaConfig};
pub use loader::ConfigLoader;
