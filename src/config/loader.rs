//! Configuration loader for notify-sdk
//!
//! This module provides the `ConfigLoader` struct that handles loading
//! configuration from multiple sources with proper precedence.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};

use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Environment variable for a specific configuration file
const CONFIG_FILE_ENV: &str = "NOTIFY_CONFIG_FILE";

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "NOTIFY";

/// Separator for nested configuration keys in environment variables
const ENV_SEPARATOR: &str = "__";

/// Configuration loader that handles layered configuration loading
///
/// Sources, in order of priority:
/// 1. Built-in defaults
/// 2. An optional TOML file
/// 3. `NOTIFY_*` environment variables (highest priority)
#[derive(Debug, Default)]
pub struct ConfigLoader {
    /// Specific configuration file path
    config_file: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new configuration loader
    ///
    /// Reads `NOTIFY_CONFIG_FILE` to pick up a configuration file.
    pub fn new() -> Self {
        let config_file = std::env::var(CONFIG_FILE_ENV)
            .ok()
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        Self { config_file }
    }

    /// Use an explicit configuration file, overriding `NOTIFY_CONFIG_FILE`
    pub fn with_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Get the configuration file path, if any
    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    /// Load configuration from all sources
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the configured file does not exist
    /// - configuration parsing fails
    /// - configuration validation fails
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let config = self.build_config()?;
        let settings: Settings = config.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {}", e))
        })?;

        settings.validate()?;

        Ok(settings)
    }

    /// Build the config::Config instance from all sources
    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = Config::builder();

        let builder = match self.config_file {
            Some(ref config_file) => Self::add_file_source(builder, config_file)?,
            None => builder,
        };

        // NOTIFY_NOTIFICATION__ENDPOINT -> notification.endpoint
        let builder = Self::add_env_source(builder);

        builder.build().map_err(ConfigError::from)
    }

    fn add_file_source(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
        path: &Path,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::file_not_found(path.display().to_string()));
        }

        Ok(builder.add_source(File::from(path).format(FileFormat::Toml).required(true)))
    }

    /// Environment variables with prefix `NOTIFY_` map to configuration keys,
    /// with `__` separating nested keys.
    fn add_env_source(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> config::ConfigBuilder<config::builder::DefaultState> {
        builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .ignore_empty(true)
                .try_parsing(true),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::DEFAULT_NOTIFICATION_ENDPOINT;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Tests touching NOTIFY_* variables run one at a time
    static TEST_MUTEX: Mutex<()> = Mutex::new(());

    const MANAGED_VARS: &[&str] = &[
        "NOTIFY_CONFIG_FILE",
        "NOTIFY_NOTIFICATION__ENDPOINT",
        "NOTIFY_NOTIFICATION__REJECT_ERROR_STATUS",
        "NOTIFY_LOGGER__LEVEL",
    ];

    /// Restores environment variables on drop
    struct EnvGuard {
        vars_to_restore: Vec<(String, Option<String>)>,
    }

    impl EnvGuard {
        /// Snapshot and clear every variable these tests manage
        fn clean() -> Self {
            let mut guard = Self {
                vars_to_restore: Vec::new(),
            };
            for key in MANAGED_VARS {
                guard.remove(key);
            }
            guard
        }

        fn set(&mut self, key: &str, value: &str) {
            let original = std::env::var(key).ok();
            self.vars_to_restore.push((key.to_string(), original));
            unsafe {
                std::env::set_var(key, value);
            }
        }

        fn remove(&mut self, key: &str) {
            let original = std::env::var(key).ok();
            self.vars_to_restore.push((key.to_string(), original));
            unsafe {
                std::env::remove_var(key);
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, original_value) in self.vars_to_restore.iter().rev() {
                unsafe {
                    match original_value {
                        Some(value) => std::env::set_var(key, value),
                        None => std::env::remove_var(key),
                    }
                }
            }
        }
    }

    fn write_config(content: &str) -> (TempDir, PathBuf) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("notify.toml");
        fs::write(&path, content).expect("Failed to write config file");
        (temp_dir, path)
    }

    #[test]
    fn test_load_defaults_without_sources() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let _env = EnvGuard::clean();

        let loader = ConfigLoader::new();
        assert!(loader.config_file().is_none());

        let settings = loader.load().expect("defaults should load");
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.notification.endpoint, DEFAULT_NOTIFICATION_ENDPOINT);
    }

    #[test]
    fn test_env_overrides_endpoint() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::clean();
        env.set(
            "NOTIFY_NOTIFICATION__ENDPOINT",
            "http://notify.example:8080/v1/notification/send/sync",
        );

        let settings = ConfigLoader::new().load().expect("should load");
        assert_eq!(
            settings.notification.endpoint,
            "http://notify.example:8080/v1/notification/send/sync"
        );
    }

    #[test]
    fn test_empty_env_override_is_ignored() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::clean();
        env.set("NOTIFY_NOTIFICATION__ENDPOINT", "");

        let settings = ConfigLoader::new().load().expect("should load");
        assert_eq!(settings.notification.endpoint, DEFAULT_NOTIFICATION_ENDPOINT);
    }

    #[test]
    fn test_file_source_is_loaded() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let _env = EnvGuard::clean();
        let (_dir, path) = write_config(
            r#"
            [notification]
            endpoint = "https://notify.internal/send"
            reject_error_status = true

            [logger]
            level = "debug"
            format = "json"
            "#,
        );

        let settings = ConfigLoader::new().with_file(&path).load().expect("should load");
        assert_eq!(settings.notification.endpoint, "https://notify.internal/send");
        assert!(settings.notification.reject_error_status);
        assert_eq!(settings.logger.level, "debug");
        assert_eq!(settings.logger.format, "json");
    }

    #[test]
    fn test_config_file_env_var() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::clean();
        let (_dir, path) = write_config("[notification]\nendpoint = \"https://from-file/send\"\n");
        env.set("NOTIFY_CONFIG_FILE", path.to_str().unwrap());

        let loader = ConfigLoader::new();
        assert_eq!(loader.config_file(), Some(path.as_path()));
        let settings = loader.load().expect("should load");
        assert_eq!(settings.notification.endpoint, "https://from-file/send");
    }

    #[test]
    fn test_env_takes_priority_over_file() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::clean();
        let (_dir, path) = write_config("[notification]\nendpoint = \"https://from-file/send\"\n");
        env.set("NOTIFY_NOTIFICATION__ENDPOINT", "https://from-env/send");
        env.set("NOTIFY_NOTIFICATION__REJECT_ERROR_STATUS", "true");

        let settings = ConfigLoader::new().with_file(&path).load().expect("should load");
        assert_eq!(settings.notification.endpoint, "https://from-env/send");
        assert!(settings.notification.reject_error_status);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let _env = EnvGuard::clean();

        let result = ConfigLoader::new()
            .with_file("/nonexistent/notify.toml")
            .load();
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_invalid_endpoint_fails_validation() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::clean();
        env.set("NOTIFY_NOTIFICATION__ENDPOINT", "localhost-without-scheme");

        let result = ConfigLoader::new().load();
        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    }
}
