//! Outbound HTTP plumbing.
//!
//! `HttpTransport` is the seam between notification logic and the network.
//! `ReqwestTransport` is the production implementation backed by the shared
//! [`client::HTTP_CLIENT`].

pub mod client;
mod transport;

pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, TransportError};
