//! Configuration settings structure
//!
//! Defines the main settings structure and loading logic for the cPanel client.

use super::serde_helpers::{deserialize_flexible_u64, deserialize_optional_trimmed};
use crate::{Error, Result, http::Protocol};
use serde::{Deserialize, Serialize};
use std::{fmt, path::Path, path::PathBuf, time::Duration};
use url::Url;

/// Main configuration settings for the cPanel client
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Connection configuration
    pub connection: ConnectionSettings,
    /// Credentials
    pub auth: AuthSettings,
    /// Cookie and log file storage
    pub storage: StorageSettings,
    /// Logging configuration
    pub logging: LoggingSettings,
}

/// Where and how to reach the cPanel instance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionSettings {
    /// cPanel host name
    pub host: String,
    /// cPanel port
    pub port: u16,
    /// URI scheme
    pub protocol: Protocol,
    /// Request timeout in seconds
    #[serde(deserialize_with = "deserialize_flexible_u64")]
    pub timeout_secs: u64,
}

/// Credentials for either interactive or token authorization
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    /// cPanel user name
    #[serde(deserialize_with = "deserialize_optional_trimmed")]
    pub username: Option<String>,
    /// Password for interactive login
    pub password: Option<String>,
    /// Base32 secret for two-factor authentication
    #[serde(deserialize_with = "deserialize_optional_trimmed")]
    pub otp_secret: Option<String>,
    /// API token; takes precedence over the password when set
    #[serde(deserialize_with = "deserialize_optional_trimmed")]
    pub token: Option<String>,
}

/// Storage locations for cookie and log files
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory holding session cookie files
    pub cookie_directory: PathBuf,
    /// Directory holding request log files
    pub log_directory: PathBuf,
    /// Age in seconds after which cookie files are removed by cleanup
    #[serde(deserialize_with = "deserialize_flexible_u64")]
    pub cookie_lifetime_secs: u64,
    /// Write failed requests to a per-client log file
    pub request_log: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level
    pub level: String,
    /// Enable verbose logging
    pub verbose: bool,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: Protocol::Https.default_port(),
            protocol: Protocol::Https,
            timeout_secs: 30,
        }
    }
}

impl ConnectionSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Base URI built from protocol, host and port
    pub fn base_uri(&self) -> Result<Url> {
        build_base_uri(self.protocol, &self.host, self.port)
    }
}

/// Build `{protocol}://{host}:{port}`
pub(crate) fn build_base_uri(protocol: Protocol, host: &str, port: u16) -> Result<Url> {
    let mut uri = Url::parse(&format!("{}://{}", protocol.as_str(), host.trim()))?;
    uri.set_port(Some(port))
        .map_err(|_| Error::config(format!("Cannot set port {} on {}", port, uri)))?;
    Ok(uri)
}

impl fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn redact(value: &Option<String>) -> Option<&'static str> {
            value.as_ref().map(|_| "***")
        }

        f.debug_struct("AuthSettings")
            .field("username", &self.username)
            .field("password", &redact(&self.password))
            .field("otp_secret", &redact(&self.otp_secret))
            .field("token", &redact(&self.token))
            .finish()
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        let base = std::env::temp_dir().join("cpanel_requests").join("temp");
        Self {
            cookie_directory: base.join("cookies"),
            log_directory: base.join("logs"),
            cookie_lifetime_secs: crate::resource::DEFAULT_COOKIE_LIFETIME.as_secs(),
            request_log: false,
        }
    }
}

impl StorageSettings {
    /// Keep cookie and log files below one directory
    pub fn in_directory(directory: impl AsRef<Path>) -> Self {
        let directory = directory.as_ref();
        Self {
            cookie_directory: directory.join("cookies"),
            log_directory: directory.join("logs"),
            ..Self::default()
        }
    }

    pub fn cookie_lifetime(&self) -> Duration {
        Duration::from_secs(self.cookie_lifetime_secs)
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            verbose: false,
        }
    }
}

impl Settings {
    /// Create new settings with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load settings from environment variables
    pub fn from_env() -> Result<Self> {
        Self::default().merge_with_env()
    }

    /// Override settings with `CPANEL_*` environment variables
    pub fn merge_with_env(self) -> Result<Self> {
        self.merge_with_vars(|name| std::env::var(name).ok())
    }

    /// Override settings with values from the given variable lookup
    pub fn merge_with_vars<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("CPANEL_HOST") {
            self.connection.host = host;
        }

        if let Some(port) = lookup("CPANEL_PORT") {
            self.connection.port = port
                .trim()
                .parse()
                .map_err(|e| Error::Config(format!("Invalid port: {}", e)))?;
        }

        if let Some(protocol) = lookup("CPANEL_PROTOCOL") {
            self.connection.protocol = protocol.parse()?;
        }

        let non_blank = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(username) = non_blank("CPANEL_USERNAME") {
            self.auth.username = Some(username.trim().to_string());
        }
        if let Some(password) = non_blank("CPANEL_PASSWORD") {
            self.auth.password = Some(password);
        }
        if let Some(secret) = non_blank("CPANEL_OTP_SECRET") {
            self.auth.otp_secret = Some(secret.trim().to_string());
        }
        if let Some(token) = non_blank("CPANEL_TOKEN") {
            self.auth.token = Some(token.trim().to_string());
        }

        if let Some(directory) = non_blank("CPANEL_COOKIE_DIR") {
            self.storage.cookie_directory = PathBuf::from(directory);
        }
        if let Some(directory) = non_blank("CPANEL_LOG_DIR") {
            self.storage.log_directory = PathBuf::from(directory);
        }

        Ok(self)
    }

    /// Check settings for consistency
    pub fn validate(&self) -> Result<()> {
        if self.connection.host.trim().is_empty() {
            return Err(Error::config("Host must not be empty"));
        }
        if self.connection.port == 0 {
            return Err(Error::config("Port must not be 0"));
        }
        if (self.auth.token.is_some() || self.auth.password.is_some())
            && self.auth.username.is_none()
        {
            return Err(Error::config("A username is required for authorization"));
        }
        Ok(())
    }
}
