//! notify-sdk
//!
//! Client for a template-based notification service: builds the send
//! envelope for email, phone and device notifications and posts it to the
//! service over HTTP.

use shadow_rs::shadow;
shadow!(build);

pub mod cli;
pub mod config;
pub mod error;
pub mod external;
pub mod logger;
pub mod services;

pub use config::NotificationConfig;
pub use error::{AppError, AppResult};
pub use services::notifications::{
    DeliveryType, Mode, NotificationRequest, NotificationRequestBuilder, NotificationSender,
};

pub fn pkg_version() -> &'static str {
    build::PKG_VERSION
}

pub fn clap_long_version() -> &'static str {
    build::CLAP_LONG_VERSION
}
