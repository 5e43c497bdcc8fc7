use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
}

/// General configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Simulated payment processing time before the cart is cleared
    #[serde(default = "default_checkout_delay_ms")]
    pub checkout_delay_ms: u64,

    /// Simulated send time for the contact form
    #[serde(default = "default_contact_delay_ms")]
    pub contact_delay_ms: u64,

    /// How long flash messages stay visible in the storefront
    #[serde(default = "default_flash_message_duration_ms")]
    pub flash_message_duration_ms: u64,

    /// Minimum level written to the log file
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Minimum level shown as a flash message
    #[serde(default = "default_flash_level")]
    pub flash_level: String,

    /// Log file path (default: scent.log in the data directory)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl GeneralConfig {
    pub fn checkout_delay(&self) -> Duration {
        Duration::from_millis(self.checkout_delay_ms)
    }

    pub fn contact_delay(&self) -> Duration {
        Duration::from_millis(self.contact_delay_ms)
    }

    pub fn flash_duration(&self) -> Duration {
        Duration::from_millis(self.flash_message_duration_ms)
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            checkout_delay_ms: default_checkout_delay_ms(),
            contact_delay_ms: default_contact_delay_ms(),
            flash_message_duration_ms: default_flash_message_duration_ms(),
            log_level: default_log_level(),
            flash_level: default_flash_level(),
            log_file: None,
        }
    }
}

fn default_checkout_delay_ms() -> u64 {
    2000
}

fn default_contact_delay_ms() -> u64 {
    1500
}

fn default_flash_message_duration_ms() -> u64 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_flash_level() -> String {
    "info".to_string()
}

/// Trait for configuration storage
pub trait ConfigStorage: Send + Sync {
    /// Load configuration from file
    fn load(&self) -> Result<Config>;

    /// Create default configuration file if it doesn't exist
    fn create_default(&self) -> Result<()>;
}

/// TOML-based implementation of ConfigStorage
pub struct TomlConfigStorage {
    path: PathBuf,
}

impl TomlConfigStorage {
    pub fn new(path: PathBuf) -> Self {
        TomlConfigStorage { path }
    }

    fn ensure_parent(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }
        Ok(())
    }
}

impl ConfigStorage for TomlConfigStorage {
    fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            log::info!(
                "Config file not found at {:?}, creating default configuration",
                self.path
            );
            self.create_default()?;
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read config from {:?}", self.path))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {:?}", self.path))?;

        log::info!("Loaded configuration from {:?}", self.path);
        log::debug!(
            "Config: checkout_delay_ms={}, contact_delay_ms={}",
            config.general.checkout_delay_ms,
            config.general.contact_delay_ms
        );

        Ok(config)
    }

    fn create_default(&self) -> Result<()> {
        self.ensure_parent()?;

        // Commented example shipped with the binary
        let example_config = include_str!("../../scent.toml.example");

        fs::write(&self.path, example_config)
            .with_context(|| format!("Failed to create default config at {:?}", self.path))?;

        log::info!("Created default configuration at {:?}", self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = GeneralConfig::default();
        assert_eq!(config.checkout_delay_ms, 2000);
        assert_eq!(config.contact_delay_ms, 1500);
        assert_eq!(config.flash_message_duration_ms, 3000);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.checkout_delay(), Duration::from_secs(2));
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [general]
            checkout_delay_ms = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.general.checkout_delay_ms, 10);
        assert_eq!(config.general.contact_delay_ms, 1500);
        assert_eq!(config.general.flash_level, "info");
    }

    #[test]
    fn test_example_config_parses() {
        let config: Config = toml::from_str(include_str!("../../scent.toml.example")).unwrap();
        assert_eq!(config.general.checkout_delay_ms, 2000);
    }

    #[test]
    fn test_missing_file_writes_example() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scent").join("scent.toml");
        let storage = TomlConfigStorage::new(path.clone());

        let config = storage.load().unwrap();
        assert_eq!(config.general.contact_delay_ms, 1500);
        assert!(path.exists());

        fs::write(&path, "[general]\ncheckout_delay_ms = 5\n").unwrap();
        assert_eq!(storage.load().unwrap().general.checkout_delay_ms, 5);
    }
}
