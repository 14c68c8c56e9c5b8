//! CLI module for notify-sdk
//!
//! This module provides the `notify` command-line interface:
//! - Argument parsing with clap
//! - Configuration loading with CLI overrides
//! - Command dispatch to handlers

pub mod executor;
pub mod handlers;
pub mod parser;
pub mod validation;

pub use executor::execute_command;
pub use parser::{Cli, Commands, LogLevel, SendArgs};

use crate::config::{ConfigLoader, Settings};
use crate::error::AppResult;
use crate::logger::{LoggerConfig, init_logger};

/// Load settings from files and environment, then apply CLI overrides
pub fn load_settings(cli: &Cli) -> AppResult<Settings> {
    let mut loader = ConfigLoader::new();
    if let Some(ref path) = cli.config {
        loader = loader.with_file(path);
    }
    apply_overrides(cli, loader.load()?)
}

/// Apply command-line overrides on top of loaded settings
pub fn apply_overrides(cli: &Cli, mut settings: Settings) -> AppResult<Settings> {
    if let Some(ref endpoint) = cli.endpoint {
        settings.notification.endpoint = endpoint.clone();
    }
    if let Some(level) = cli.requested_log_level() {
        settings.logger.level = level.as_str().to_string();
    }

    settings.validate()?;
    Ok(settings)
}

/// Logger configuration derived from settings
pub fn logger_config(settings: &Settings) -> AppResult<LoggerConfig> {
    Ok(settings.logger.clone().into_logger_config()?)
}

/// Install the global logger described by `settings`
pub fn init_logging(settings: &Settings) -> AppResult<()> {
    init_logger(logger_config(settings)?)?;
    Ok(())
}
