//! Wire shape of the send request.
//!
//! The envelope borrows from its [`NotificationRequest`](super::NotificationRequest)
//! and only lives long enough to be serialized.

use serde::Serialize;
use serde_json::{Map, Value};

use super::request::{DeliveryType, Mode};

/// API identifier expected by the downstream service
pub const ENVELOPE_ID: &str = "notification.message.send";
pub const ENVELOPE_VERSION: &str = "1.0";
/// Fixed placeholder, not a timestamp
pub const ENVELOPE_ETS: &str = "11234";

#[derive(Debug, Clone, Serialize)]
pub struct Envelope<'a> {
    pub id: &'static str,
    pub ver: &'static str,
    pub ets: &'static str,
    pub params: EnvelopeParams,
    pub request: EnvelopeRequest<'a>,
}

impl<'a> Envelope<'a> {
    /// Envelope carrying exactly one notification
    pub fn single(notification: NotificationDescriptor<'a>) -> Self {
        Self {
            id: ENVELOPE_ID,
            ver: ENVELOPE_VERSION,
            ets: ENVELOPE_ETS,
            params: EnvelopeParams::default(),
            request: EnvelopeRequest {
                notifications: vec![notification],
            },
        }
    }
}

/// Always empty strings
#[derive(Debug, Clone, Default, Serialize)]
pub struct EnvelopeParams {
    pub did: &'static str,
    pub key: &'static str,
    pub msgid: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnvelopeRequest<'a> {
    pub notifications: Vec<NotificationDescriptor<'a>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDescriptor<'a> {
    pub mode: Mode,
    pub delivery_type: DeliveryType,
    pub config: DeliveryConfig<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ids: Option<&'a [String]>,
    pub template: TemplateRef<'a>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeliveryConfig<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<&'a str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TemplateRef<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<&'a Map<String, Value>>,
}
