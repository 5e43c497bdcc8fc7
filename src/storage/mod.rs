pub mod collections;
pub mod config;
pub mod store;

use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::path::PathBuf;

pub use collections::{CART_KEY, RECENT_KEY, WISHLIST_KEY, load_collection, save_collection};
pub use config::{Config, ConfigStorage, GeneralConfig, TomlConfigStorage};
pub use store::{FileStore, KeyValueStore, MemoryStore};

/// Ensure XDG data and config directories exist
/// Returns (data_dir, config_dir)
///
/// - Data: $XDG_DATA_HOME/scent (default: ~/.local/share/scent)
/// - Config: $XDG_CONFIG_HOME/scent (default: ~/.config/scent)
pub fn ensure_directories() -> Result<(PathBuf, PathBuf)> {
    let home = env::var("HOME").context("HOME environment variable not set")?;
    let home_path = PathBuf::from(home);

    let data_dir = match env::var("XDG_DATA_HOME") {
        Ok(xdg_data) => PathBuf::from(xdg_data).join("scent"),
        Err(_) => home_path.join(".local/share/scent"),
    };

    let config_dir = match env::var("XDG_CONFIG_HOME") {
        Ok(xdg_config) => PathBuf::from(xdg_config).join("scent"),
        Err(_) => home_path.join(".config/scent"),
    };

    for dir in [&data_dir, &config_dir] {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {:?}", dir))?;
    }

    log::debug!("Data directory: {:?}", data_dir);
    log::debug!("Config directory: {:?}", config_dir);

    Ok((data_dir, config_dir))
}
