//! Send command handler
//!
//! Handles the send command including dry-run rendering.

use crate::cli::parser::SendArgs;
use crate::config::Settings;
use crate::error::AppResult;
use crate::services::notifications::{NotificationRequest, NotificationSender};

/// Handler for the send command
pub struct SendCommandHandler {
    sender: NotificationSender,
}

impl SendCommandHandler {
    /// Create a handler posting through the shared HTTP client
    pub fn new(settings: Settings) -> Self {
        Self {
            sender: NotificationSender::from_config(settings.notification),
        }
    }

    pub fn with_sender(sender: NotificationSender) -> Self {
        Self { sender }
    }

    /// Execute the send command
    ///
    /// With `dry_run`, prints the target endpoint and envelope and returns
    /// without touching the network. Otherwise prints the downstream
    /// response body.
    pub async fn execute(&self, args: &SendArgs) -> AppResult<()> {
        let request = args.to_request();

        let output = if args.dry_run {
            self.render_dry_run(&request)?
        } else {
            self.send(&request).await?
        };

        println!("{output}");
        Ok(())
    }

    /// Send the request and render the response body as pretty JSON
    pub async fn send(&self, request: &NotificationRequest) -> AppResult<String> {
        let body = self.sender.send_notifications(request).await?;
        Ok(serde_json::to_string_pretty(&body)?)
    }

    /// Render what would be sent
    pub fn render_dry_run(&self, request: &NotificationRequest) -> AppResult<String> {
        let envelope = serde_json::to_string_pretty(&request.envelope())?;
        Ok(format!("POST {}\n{}", self.sender.endpoint(), envelope))
    }
}
