//! Configuration management for notify-sdk
//!
//! Settings are layered, lowest to highest priority:
//! 1. Built-in defaults
//! 2. An optional TOML file (`--config` or `NOTIFY_CONFIG_FILE`)
//! 3. `NOTIFY_*` environment variables

pub mod error;
pub mod loader;
pub mod settings;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use settings::{LoggerSettings, NotificationConfig, Settings, DEFAULT_NOTIFICATION_ENDPOINT};
