//! Form POST capability.
//!
//! The contact form only needs to know whether the endpoint accepted the
//! submission, so a [`Response`] carries the HTTP status and nothing else; the
//! body is never read.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use futures::future::LocalBoxFuture;

/// Error returned by [`Transport::post_form`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The request could not be constructed.
    #[error("failed to build request: {0}")]
    Build(String),
    /// The request was sent but no response arrived.
    #[error("request failed: {0}")]
    Network(String),
}

/// Status line of a completed request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
}

impl Response {
    #[must_use]
    pub fn new(status: u16) -> Self {
        Self { status }
    }

    /// Whether the status is in the 2xx range (`fetch`'s `Response.ok`).
    #[must_use]
    pub fn is_success(self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends URL-encoded form bodies.
pub trait Transport {
    /// POST `body` to `url` with `Content-Type:
    /// application/x-www-form-urlencoded`.
    fn post_form(&self, url: &str, body: String) -> LocalBoxFuture<'static, Result<Response, TransportError>>;
}
