//! CLI argument parsing with clap

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::{Map, Value};
use std::path::PathBuf;

use super::validation;
use crate::services::notifications::{DeliveryType, Mode, NotificationRequest};

/// Send template-based notifications through the notification service
#[derive(Parser, Debug)]
#[command(name = "notify")]
#[command(about = "Send template-based notifications through the notification service")]
#[command(long_about = "
notify builds the notification service's send envelope from command-line
arguments and posts it to the configured endpoint.

EXAMPLES:
    # Send a one-time password by email
    notify send --delivery-type otp --subject 'OTP Code' \\
        --template-id otp_template --param otp=1234 --to a@x.com

    # Print the envelope instead of sending it
    notify send --template-id welcome --to a@x.com --dry-run

    # Target another notification service
    notify --endpoint https://notify.internal/v1/notification/send/sync send ...

The endpoint can also be set with NOTIFY_NOTIFICATION__ENDPOINT or in a TOML
file passed with --config.
")]
#[command(version = crate::build::CLAP_LONG_VERSION)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (TOML)
    #[arg(short, long, global = true, value_name = "FILE", value_parser = validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Notification service endpoint, overriding configuration
    #[arg(long, global = true, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Log level override
    #[arg(long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send one notification
    ///
    /// Examples:
    ///   notify send --template-id welcome --to a@x.com
    ///   notify send --mode phone --delivery-type whatsapp --template-id reminder --to +15550100
    Send(SendArgs),
}

/// Arguments of the `send` subcommand
#[derive(Args, Debug, Clone)]
pub struct SendArgs {
    /// Transport mode: email, phone or device [default: email]
    #[arg(long, value_parser = validation::parse_mode)]
    pub mode: Option<Mode>,

    /// Delivery type: message, otp, whatsapp or call [default: message]
    #[arg(long, value_parser = validation::parse_delivery_type)]
    pub delivery_type: Option<DeliveryType>,

    /// Subject line for email delivery
    #[arg(long)]
    pub subject: Option<String>,

    /// Template registered on the notification service
    #[arg(long, value_name = "ID")]
    pub template_id: Option<String>,

    /// Template parameter as key=value (repeatable). The value is sent as a
    /// string; write key:=value to send it as JSON instead.
    #[arg(long = "param", value_name = "KEY=VALUE", value_parser = validation::parse_template_param)]
    pub params: Vec<(String, Value)>,

    /// Template parameters as a JSON object; --param entries override its keys
    #[arg(long, value_name = "JSON", value_parser = validation::parse_params_json)]
    pub params_json: Option<Map<String, Value>>,

    /// Recipient address or device id (repeatable, order is kept). Without
    /// any --to the envelope carries no recipient list.
    #[arg(long = "to", value_name = "ID")]
    pub recipients: Vec<String>,

    /// Print the envelope and endpoint without sending
    #[arg(long)]
    pub dry_run: bool,
}

impl SendArgs {
    /// Build the notification request these arguments describe
    pub fn to_request(&self) -> NotificationRequest {
        let mut template_params = self.params_json.clone();
        for (key, value) in &self.params {
            template_params
                .get_or_insert_with(Map::new)
                .insert(key.clone(), value.clone());
        }

        NotificationRequest::new(
            self.mode,
            self.delivery_type,
            self.subject.clone(),
            self.template_id.clone(),
            template_params,
            (!self.recipients.is_empty()).then(|| self.recipients.clone()),
        )
    }
}

/// Log level options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl Cli {
    /// Level requested on the command line, if any
    ///
    /// `--log-level` wins over `--verbose` (debug) and `--quiet` (error).
    pub fn requested_log_level(&self) -> Option<LogLevel> {
        self.log_level.or(if self.verbose {
            Some(LogLevel::Debug)
        } else if self.quiet {
            Some(LogLevel::Error)
        } else {
            None
        })
    }
}
