//! Notification request value object and its builder.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::envelope::{DeliveryConfig, Envelope, NotificationDescriptor, TemplateRef};
use crate::error::{AppError, AppResult};

/// Transport mode of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Email,
    Phone,
    Device,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Email, Mode::Phone, Mode::Device];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Email => "email",
            Mode::Phone => "phone",
            Mode::Device => "device",
        }
    }

    /// Parse an optional name, falling back to `email` when absent or blank
    pub fn parse_or_default(value: Option<&str>) -> AppResult<Self> {
        match value.map(str::trim) {
            None | Some("") => Ok(Self::default()),
            Some(name) => name.parse(),
        }
    }
}

impl FromStr for Mode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "email" => Ok(Mode::Email),
            "phone" => Ok(Mode::Phone),
            "device" => Ok(Mode::Device),
            _ => Err(AppError::validation(
                "mode",
                format!("unknown mode '{s}', expected one of: email, phone, device"),
            )),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Message semantics of a notification, independent of its mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryType {
    #[default]
    Message,
    Otp,
    Whatsapp,
    Call,
}

impl DeliveryType {
    pub const ALL: [DeliveryType; 4] = [
        DeliveryType::Message,
        DeliveryType::Otp,
        DeliveryType::Whatsapp,
        DeliveryType::Call,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryType::Message => "message",
            DeliveryType::Otp => "otp",
            DeliveryType::Whatsapp => "whatsapp",
            DeliveryType::Call => "call",
        }
    }

    /// Parse an optional name, falling back to `message` when absent or blank
    pub fn parse_or_default(value: Option<&str>) -> AppResult<Self> {
        match value.map(str::trim) {
            None | Some("") => Ok(Self::default()),
            Some(name) => name.parse(),
        }
    }
}

impl FromStr for DeliveryType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "message" => Ok(DeliveryType::Message),
            "otp" => Ok(DeliveryType::Otp),
            "whatsapp" => Ok(DeliveryType::Whatsapp),
            "call" => Ok(DeliveryType::Call),
            _ => Err(AppError::validation(
                "delivery_type",
                format!(
                    "unknown delivery type '{s}', expected one of: message, otp, whatsapp, call"
                ),
            )),
        }
    }
}

impl fmt::Display for DeliveryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One notification to be delivered through a template
///
/// Nothing is validated here: an empty recipient list or a missing template
/// id is accepted and left for the downstream service to judge.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationRequest {
    mode: Mode,
    delivery_type: DeliveryType,
    subject: Option<String>,
    template_id: Option<String>,
    template_params: Option<Map<String, Value>>,
    recipient_ids: Option<Vec<String>>,
}

impl NotificationRequest {
    /// Positional constructor; absent mode and delivery type take their defaults
    pub fn new(
        mode: Option<Mode>,
        delivery_type: Option<DeliveryType>,
        subject: Option<String>,
        template_id: Option<String>,
        template_params: Option<Map<String, Value>>,
        recipient_ids: Option<Vec<String>>,
    ) -> Self {
        Self {
            mode: mode.unwrap_or_default(),
            delivery_type: delivery_type.unwrap_or_default(),
            subject,
            template_id,
            template_params,
            recipient_ids,
        }
    }

    pub fn builder() -> NotificationRequestBuilder {
        NotificationRequestBuilder::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn delivery_type(&self) -> DeliveryType {
        self.delivery_type
    }

    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    pub fn template_id(&self) -> Option<&str> {
        self.template_id.as_deref()
    }

    pub fn template_params(&self) -> Option<&Map<String, Value>> {
        self.template_params.as_ref()
    }

    /// Recipients in the order given; `None` when no list was supplied
    pub fn recipient_ids(&self) -> Option<&[String]> {
        self.recipient_ids.as_deref()
    }

    /// Wrap this request in the fixed send envelope
    pub fn envelope(&self) -> Envelope<'_> {
        Envelope::single(NotificationDescriptor {
            mode: self.mode,
            delivery_type: self.delivery_type,
            config: DeliveryConfig {
                subject: self.subject.as_deref(),
            },
            ids: self.recipient_ids.as_deref(),
            template: TemplateRef {
                id: self.template_id.as_deref(),
                params: self.template_params.as_ref(),
            },
        })
    }
}

/// Fluent builder for [`NotificationRequest`]
#[derive(Debug, Clone, Default)]
pub struct NotificationRequestBuilder {
    mode: Option<Mode>,
    delivery_type: Option<DeliveryType>,
    subject: Option<String>,
    template_id: Option<String>,
    template_params: Option<Map<String, Value>>,
    recipient_ids: Option<Vec<String>>,
}

impl NotificationRequestBuilder {
    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn delivery_type(mut self, delivery_type: DeliveryType) -> Self {
        self.delivery_type = Some(delivery_type);
        self
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn template_id(mut self, template_id: impl Into<String>) -> Self {
        self.template_id = Some(template_id.into());
        self
    }

    /// Replace all template parameters
    pub fn template_params(mut self, params: Map<String, Value>) -> Self {
        self.template_params = Some(params);
        self
    }

    /// Add or overwrite one template parameter
    pub fn template_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.template_params
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn recipient(mut self, id: impl Into<String>) -> Self {
        self.recipient_ids.get_or_insert_with(Vec::new).push(id.into());
        self
    }

    pub fn recipients<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.recipient_ids
            .get_or_insert_with(Vec::new)
            .extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn build(self) -> NotificationRequest {
        NotificationRequest::new(
            self.mode,
            self.delivery_type,
            self.subject,
            self.template_id,
            self.template_params,
            self.recipient_ids,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn envelope_json(request: &NotificationRequest) -> Value {
        serde_json::to_value(request.envelope()).expect("envelope serializes")
    }

    #[test]
    fn test_scenario_otp_email_envelope() {
        let mut params = Map::new();
        params.insert("otp".to_string(), json!("1234"));
        let request = NotificationRequest::new(
            Some(Mode::Email),
            Some(DeliveryType::Otp),
            Some("OTP Code".to_string()),
            Some("otp_template".to_string()),
            Some(params),
            Some(vec!["a@x.com".to_string()]),
        );

        assert_eq!(
            envelope_json(&request),
            json!({
                "id": "notification.message.send",
                "ver": "1.0",
                "ets": "11234",
                "params": { "did": "", "key": "", "msgid": "" },
                "request": {
                    "notifications": [{
                        "mode": "email",
                        "deliveryType": "otp",
                        "config": { "subject": "OTP Code" },
                        "ids": ["a@x.com"],
                        "template": { "id": "otp_template", "params": { "otp": "1234" } }
                    }]
                }
            })
        );
    }

    #[test]
    fn test_absent_mode_and_delivery_type_take_defaults() {
        let request = NotificationRequest::new(
            None,
            None,
            None,
            Some("welcome".to_string()),
            None,
            Some(vec!["+15550100".to_string()]),
        );

        assert_eq!(request.mode(), Mode::Email);
        assert_eq!(request.delivery_type(), DeliveryType::Message);
        let notification = &envelope_json(&request)["request"]["notifications"][0];
        assert_eq!(notification["mode"], "email");
        assert_eq!(notification["deliveryType"], "message");
    }

    #[test]
    fn test_absent_optionals_are_omitted() {
        let request = NotificationRequest::new(None, None, None, None, None, None);
        let notification = &envelope_json(&request)["request"]["notifications"][0];

        assert_eq!(
            notification,
            &json!({
                "mode": "email",
                "deliveryType": "message",
                "config": {},
                "template": {}
            })
        );
        assert!(notification.get("ids").is_none());
    }

    #[test]
    fn test_empty_recipient_list_is_kept() {
        let request = NotificationRequest::new(None, None, None, None, None, Some(Vec::new()));
        let notification = &envelope_json(&request)["request"]["notifications"][0];

        assert_eq!(notification["ids"], json!([]));
        assert_eq!(request.recipient_ids(), Some(&[][..]));
    }

    #[test]
    fn test_builder_without_recipients_omits_ids() {
        let request = NotificationRequest::builder().template_id("welcome").build();

        assert!(request.recipient_ids().is_none());
        assert!(envelope_json(&request)["request"]["notifications"][0]
            .get("ids")
            .is_none());
    }

    #[test]
    fn test_builder_matches_positional_constructor() {
        let built = NotificationRequest::builder()
            .mode(Mode::Phone)
            .delivery_type(DeliveryType::Whatsapp)
            .template_id("reminder")
            .template_param("name", "Ada")
            .template_param("count", 3)
            .recipient("+15550100")
            .recipients(["+15550101", "+15550100"])
            .build();

        let mut params = Map::new();
        params.insert("name".to_string(), json!("Ada"));
        params.insert("count".to_string(), json!(3));
        let positional = NotificationRequest::new(
            Some(Mode::Phone),
            Some(DeliveryType::Whatsapp),
            None,
            Some("reminder".to_string()),
            Some(params),
            Some(vec![
                "+15550100".to_string(),
                "+15550101".to_string(),
                "+15550100".to_string(),
            ]),
        );

        assert_eq!(built, positional);
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("PHONE".parse::<Mode>().unwrap(), Mode::Phone);
        assert_eq!(Mode::parse_or_default(None).unwrap(), Mode::Email);
        assert_eq!(Mode::parse_or_default(Some("")).unwrap(), Mode::Email);
        assert_eq!(Mode::parse_or_default(Some("device")).unwrap(), Mode::Device);
        assert!(matches!(
            "fax".parse::<Mode>(),
            Err(AppError::Validation { ref field, .. }) if field == "mode"
        ));
    }

    #[test]
    fn test_delivery_type_parsing() {
        assert_eq!("Call".parse::<DeliveryType>().unwrap(), DeliveryType::Call);
        assert_eq!(
            DeliveryType::parse_or_default(Some("  ")).unwrap(),
            DeliveryType::Message
        );
        assert!("sms".parse::<DeliveryType>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for mode in Mode::ALL {
            assert_eq!(mode.to_string().parse::<Mode>().unwrap(), mode);
        }
        for delivery_type in DeliveryType::ALL {
            assert_eq!(
                delivery_type.to_string().parse::<DeliveryType>().unwrap(),
                delivery_type
            );
        }
    }

    fn arb_mode() -> impl Strategy<Value = Option<Mode>> {
        prop::option::of(prop::sample::select(Mode::ALL.to_vec()))
    }

    fn arb_delivery_type() -> impl Strategy<Value = Option<DeliveryType>> {
        prop::option::of(prop::sample::select(DeliveryType::ALL.to_vec()))
    }

    fn arb_params() -> impl Strategy<Value = Option<Map<String, Value>>> {
        prop::option::of(
            prop::collection::btree_map("[a-z_]{1,8}", ".{0,12}", 0..6).prop_map(|entries| {
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Value::String(v)))
                    .collect::<Map<String, Value>>()
            }),
        )
    }

    proptest! {
        #[test]
        fn prop_envelope_mirrors_inputs(
            mode in arb_mode(),
            delivery_type in arb_delivery_type(),
            subject in prop::option::of(".{0,20}"),
            template_id in prop::option::of("[a-z_]{1,16}"),
            params in arb_params(),
            ids in prop::option::of(prop::collection::vec("[a-z0-9@.+]{0,16}", 0..8)),
        ) {
            let request = NotificationRequest::new(
                mode,
                delivery_type,
                subject.clone(),
                template_id.clone(),
                params.clone(),
                ids.clone(),
            );
            let json = envelope_json(&request);
            let notification = &json["request"]["notifications"][0];

            prop_assert_eq!(
                notification["mode"].as_str(),
                Some(mode.unwrap_or(Mode::Email).as_str())
            );
            prop_assert_eq!(
                notification["deliveryType"].as_str(),
                Some(delivery_type.unwrap_or(DeliveryType::Message).as_str())
            );

            let sent_ids: Option<Vec<String>> = notification
                .get("ids")
                .map(|value| serde_json::from_value(value.clone()).unwrap());
            prop_assert_eq!(sent_ids, ids);

            prop_assert_eq!(
                notification["template"].get("id").and_then(Value::as_str),
                template_id.as_deref()
            );
            prop_assert_eq!(
                notification["template"].get("params").and_then(Value::as_object),
                params.as_ref()
            );
            prop_assert_eq!(
                notification["config"].get("subject").and_then(Value::as_str),
                subject.as_deref()
            );
            prop_assert_eq!(json["request"]["notifications"].as_array().map(Vec::len), Some(1));
        }
    }
}
