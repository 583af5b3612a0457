//! Configuration loading utilities
//!
//! Provides helper functions for loading configuration from various sources
//! with proper error handling and validation.

use crate::{Result, config::Settings};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// File name of the configuration file inside the user's config directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Default configuration file location, `<config dir>/cpanel-requests/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("cpanel-requests").join(CONFIG_FILE_NAME))
}

/// Configuration loader with multiple source support
#[derive(Debug)]
pub struct ConfigLoader {
    /// Default settings
    defaults: Settings,
}

impl ConfigLoader {
    /// Create new configuration loader
    pub fn new() -> Self {
        Self {
            defaults: Settings::default(),
        }
    }

    /// Load configuration with precedence order:
    /// 1. Environment variables (highest priority)
    /// 2. Configuration file, the given one or the default location
    /// 3. Default values (lowest priority)
    pub fn load(&self, config_file: Option<&Path>) -> Result<Settings> {
        let mut settings = self.defaults.clone();

        match config_file {
            Some(path) if path.exists() => {
                info!("Loading configuration from file: {:?}", path);
                settings = Settings::from_file(path)?;
            }
            Some(path) => {
                warn!("Configuration file not found: {:?}, using defaults", path);
            }
            None => {
                if let Some(path) = default_config_path().filter(|path| path.exists()) {
                    info!("Loading configuration from file: {:?}", path);
                    settings = Settings::from_file(&path)?;
                }
            }
        }

        debug!("Applying environment variable overrides");
        settings = settings.merge_with_env()?;

        settings.validate()?;

        info!("Configuration loaded successfully");
        debug!("Final configuration: {:?}", settings);

        Ok(settings)
    }

    /// Load configuration from environment only
    pub fn from_env_only(&self) -> Result<Settings> {
        let settings = Settings::from_env()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Get default configuration
    pub fn defaults(&self) -> &Settings {
        &self.defaults
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, http::Protocol};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let loader = ConfigLoader::new();
        let settings = loader.defaults();

        assert_eq!(settings.connection.port, 2083);
        assert_eq!(settings.storage.cookie_lifetime_secs, 3600);
    }

    #[test]
    fn test_load_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[connection]
host = "cpanel.example.com"
protocol = "http"

[auth]
username = "foo"
token = "TOKEN123"

[storage]
cookie_lifetime_secs = "7200"
        "#
        )
        .unwrap();

        let settings = Settings::from_file(temp_file.path()).unwrap();

        assert_eq!(settings.connection.host, "cpanel.example.com");
        assert_eq!(settings.connection.protocol, Protocol::Http);
        assert_eq!(settings.connection.port, 2083);
        assert_eq!(settings.auth.username.as_deref(), Some("foo"));
        assert_eq!(settings.auth.token.as_deref(), Some("TOKEN123"));
        assert_eq!(settings.storage.cookie_lifetime_secs, 7200);
        assert_eq!(settings.logging.level, "info");
    }

    #[test]
    fn test_load_invalid_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[connection]\nport = \"not a port\"").unwrap();

        let result = Settings::from_file(temp_file.path());
        assert!(matches!(result, Err(Error::ConfigParse(_))));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let loader = ConfigLoader::new();

        let settings = loader
            .load(Some(&temp_dir.path().join("missing.toml")))
            .unwrap();
        assert_eq!(settings.connection.protocol, Protocol::Https);
    }

    #[test]
    fn test_default_config_path() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with("cpanel-requests/config.toml"));
        }
    }
}
