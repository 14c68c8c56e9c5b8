//! Sends notification envelopes to the downstream service.

use std::sync::Arc;

use reqwest::Method;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use super::request::NotificationRequest;
use crate::config::NotificationConfig;
use crate::error::{AppError, AppResult};
use crate::external::{HttpRequest, HttpTransport, ReqwestTransport};

/// Posts notification requests through an [`HttpTransport`]
///
/// Cheap to clone; clones share the transport. Every send makes exactly one
/// POST attempt with no timeout and no retry.
///
/// # Example
/// ```ignore
/// let sender = NotificationSender::from_config(NotificationConfig::default());
/// let request = NotificationRequest::builder()
///     .delivery_type(DeliveryType::Otp)
///     .subject("OTP Code")
///     .template_id("otp_template")
///     .template_param("otp", "1234")
///     .recipient("a@x.com")
///     .build();
/// let body = sender.send_notifications(&request).await?;
/// ```
#[derive(Clone)]
pub struct NotificationSender {
    config: NotificationConfig,
    transport: Arc<dyn HttpTransport>,
}

impl NotificationSender {
    pub fn new(config: NotificationConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self { config, transport }
    }

    /// Sender using the shared reqwest client
    pub fn from_config(config: NotificationConfig) -> Self {
        Self::new(config, Arc::new(ReqwestTransport::new()))
    }

    pub fn config(&self) -> &NotificationConfig {
        &self.config
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    /// Build the HTTP request for `request` without sending it
    pub fn build_http_request(&self, request: &NotificationRequest) -> AppResult<HttpRequest> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        Ok(HttpRequest {
            method: Method::POST,
            url: self.config.endpoint.clone(),
            headers,
            body: serde_json::to_value(request.envelope())?,
        })
    }

    /// Send one notification and return the downstream response body
    ///
    /// Any response counts as success unless `reject_error_status` is set, in
    /// which case a non-2xx status becomes [`AppError::Downstream`]. When no
    /// response is obtained the transport error is returned unchanged inside
    /// [`AppError::Transport`].
    pub async fn send_notifications(&self, request: &NotificationRequest) -> AppResult<Value> {
        let http_request = self.build_http_request(request)?;

        tracing::debug!(
            endpoint = %self.config.endpoint,
            transport = self.transport.name(),
            mode = %request.mode(),
            delivery_type = %request.delivery_type(),
            recipients = request.recipient_ids().map_or(0, <[String]>::len),
            "Sending notification"
        );

        let response = match self.transport.post(http_request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(
                    endpoint = %self.config.endpoint,
                    error = %e,
                    "Sending notification failed"
                );
                return Err(AppError::Transport { source: e });
            }
        };

        if self.config.reject_error_status && !response.status.is_success() {
            tracing::error!(
                endpoint = %self.config.endpoint,
                status = response.status.as_u16(),
                response = %response.body,
                "Notification service rejected the request"
            );
            return Err(AppError::Downstream {
                status: response.status.as_u16(),
                body: response.body,
            });
        }

        tracing::info!(
            endpoint = %self.config.endpoint,
            status = response.status.as_u16(),
            response = %response.body,
            "Notification sent successfully"
        );
        Ok(response.body)
    }

    /// Send in the background and report the outcome to `callback`
    ///
    /// Returns immediately. The callback runs exactly once with the same
    /// result [`send_notifications`](Self::send_notifications) would have
    /// returned.
    ///
    /// Outside a tokio runtime nothing is sent: the callback is invoked
    /// right away with [`AppError::Internal`] and `None` is returned.
    pub fn send_with_callback<F>(
        &self,
        request: NotificationRequest,
        callback: F,
    ) -> Option<JoinHandle<()>>
    where
        F: FnOnce(AppResult<Value>) + Send + 'static,
    {
        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(e) => {
                tracing::error!(error = %e, "No tokio runtime available for notification send");
                callback(Err(AppError::Internal {
                    source: anyhow::Error::new(e)
                        .context("notification send requires a tokio runtime"),
                }));
                return None;
            }
        };

        let sender = self.clone();
        Some(runtime.spawn(async move {
            let result = sender.send_notifications(&request).await;
            callback(result);
        }))
    }
}

impl std::fmt::Debug for NotificationSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationSender")
            .field("config", &self.config)
            .field("transport", &self.transport.name())
            .finish()
    }
}
