//! Template-based notification delivery.
//!
//! A [`NotificationRequest`] describes one notification (mode, delivery type,
//! template and recipients). [`NotificationSender`] wraps it in the fixed
//! send envelope and posts it to the downstream notification service.

mod envelope;
mod request;
mod sender;

pub use envelope::{
    DeliveryConfig, Envelope, EnvelopeParams, EnvelopeRequest, NotificationDescriptor,
    TemplateRef, ENVELOPE_ETS, ENVELOPE_ID, ENVELOPE_VERSION,
};
pub use request::{DeliveryType, Mode, NotificationRequest, NotificationRequestBuilder};
pub use sender::NotificationSender;
