//! Error types for the booking API client.
//!
//! # Design
//! `HttpRequestError` is the one error derived from a response: any non-2xx
//! status, with the verb and endpoint that produced it. Everything else in
//! `ApiError` is a failure the server never answered (transport), a payload
//! that could not be encoded or decoded, or a 2xx body that did not carry
//! what the operation needs.

use crate::http::HttpMethod;

/// A request completed with a non-2xx status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{method} {endpoint} failed: {status} {status_text}")]
pub struct HttpRequestError {
    pub method: HttpMethod,
    pub endpoint: String,
    pub status: u16,
    pub status_text: String,
}

/// Errors returned by `RestClient` and `BookerApi`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Http(#[from] HttpRequestError),

    /// The request never produced a response.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// A JSON response did not match the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// A 2xx response whose body lacks what the operation returns.
    #[error("unexpected response body: {0}")]
    UnexpectedBody(String),

    /// The auth endpoint answered with a reason instead of a token.
    #[error("authentication rejected: {reason}")]
    AuthRejected { reason: String },
}

impl ApiError {
    /// HTTP status code, when the error came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http(e) => Some(e.status),
            _ => None,
        }
    }
}
