//! HTTP plumbing for the Push Notifications API.

pub mod client;
pub mod form;
#[cfg(test)]
pub(crate) mod mock;
pub mod transport;

pub use client::build_http_client;
pub use form::{FormParams, encode_form, join_response_lines};
pub use transport::{HttpTransport, Transport};
