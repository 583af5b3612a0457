//! Configuration management for the cPanel client
//!
//! Settings come from an optional TOML file and `CPANEL_*` environment
//! variables and are shared by the library and the command line tool.

pub mod loader;
pub mod serde_helpers;
pub mod settings;

pub use loader::{ConfigLoader, default_config_path};
pub use settings::{AuthSettings, ConnectionSettings, LoggingSettings, Settings, StorageSettings};
