//! HTTP transport seam and submission error model.
//!
//! ERROR HANDLING
//! ==============
//! Two kinds of failure reach the user. Transport failures (network error,
//! non-2xx status, unparsable body) get a generic per-form alert; business
//! failures (well-formed reply with a non-success status) show the server's
//! message. Neither is retried.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use futures::future::LocalBoxFuture;
use serde::de::DeserializeOwned;

use crate::state::submission::Encoding;

/// A failed submission or lookup.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SubmitError {
    /// The request never produced a response.
    #[error("request failed: {0}")]
    Network(String),
    /// The server answered outside the 2xx range.
    #[error("server responded with status {0}")]
    HttpStatus(u16),
    /// The response body was not the expected JSON.
    #[error("malformed response: {0}")]
    Malformed(String),
    /// The form could not be serialized.
    #[error("could not read form: {0}")]
    Form(String),
    /// The server rejected the request.
    #[error("{message}")]
    Business {
        message: String,
        errors: Option<serde_json::Value>,
    },
}

/// Body of a POST, either pre-encoded form fields or the platform's
/// multipart container.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RequestBody<M> {
    UrlEncoded(String),
    Multipart(M),
}

impl<M> RequestBody<M> {
    pub fn encoding(&self) -> Encoding {
        match self {
            Self::UrlEncoded(_) => Encoding::UrlEncoded,
            Self::Multipart(_) => Encoding::Multipart,
        }
    }
}

/// Status and raw body of an HTTP response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub type TransportFuture = LocalBoxFuture<'static, Result<HttpReply, SubmitError>>;

/// Issues HTTP requests. Futures are `'static` so callers can spawn them
/// onto the browser's local executor.
pub trait Transport {
    /// Multipart container the platform sends (e.g. `web_sys::FormData`).
    type Multipart;

    fn post(&self, url: &str, body: RequestBody<Self::Multipart>) -> TransportFuture;

    fn get(&self, url: &str) -> TransportFuture;
}

impl<T: Transport + ?Sized> Transport for &T {
    type Multipart = T::Multipart;

    fn post(&self, url: &str, body: RequestBody<Self::Multipart>) -> TransportFuture {
        (**self).post(url, body)
    }

    fn get(&self, url: &str) -> TransportFuture {
        (**self).get(url)
    }
}

/// Decode a JSON reply, treating non-2xx statuses as transport failures
/// regardless of body.
///
/// # Errors
///
/// Returns [`SubmitError::HttpStatus`] for non-2xx replies and
/// [`SubmitError::Malformed`] when the body does not decode as `T`.
pub fn decode_reply<T: DeserializeOwned>(reply: &HttpReply) -> Result<T, SubmitError> {
    if !reply.is_success() {
        return Err(SubmitError::HttpStatus(reply.status));
    }
    serde_json::from_str(&reply.body).map_err(|err| SubmitError::Malformed(err.to_string()))
}
