//! HTTP transport types and the blocking transport that executes them.
//!
//! # Design
//! Requests and responses are described as plain data. `RestClient` builds
//! `HttpRequest` values and normalizes `HttpResponse` values without touching
//! the network; a `Transport` performs the actual round-trip in between.
//! Swapping the transport is how the client is exercised without a server.
//!
//! `UreqTransport` opens a fresh `ureq::Agent` for every call and lets it go
//! out of scope before returning, so no connection state outlives a request
//! regardless of whether the call succeeded.

use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// `url` is absolute: the client has already joined its base URL with the
/// endpoint path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A 2xx response body after normalization: JSON when it parses, raw text
/// otherwise. An empty body is `Text("")`.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
}

impl ResponseBody {
    pub fn parse(body: String) -> Self {
        match serde_json::from_str(&body) {
            Ok(value) => ResponseBody::Json(value),
            Err(_) => ResponseBody::Text(body),
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            ResponseBody::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseBody::Json(_) => None,
            ResponseBody::Text(text) => Some(text),
        }
    }

    /// The JSON value, or `UnexpectedBody` if the server sent plain text.
    pub fn into_json(self) -> Result<Value, ApiError> {
        match self {
            ResponseBody::Json(value) => Ok(value),
            ResponseBody::Text(text) => Err(ApiError::UnexpectedBody(text)),
        }
    }

    pub fn decode<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        let value = self.into_json()?;
        serde_json::from_value(value).map_err(|e| ApiError::Deserialization(e.to_string()))
    }
}

/// Executes one `HttpRequest`.
///
/// Implementations must hand back every status code as data. Only failures
/// below HTTP (DNS, connect, TLS, I/O) are errors.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}

/// Blocking transport backed by `ureq`, one agent per call.
#[derive(Debug, Clone, Copy, Default)]
pub struct UreqTransport;

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        // Status codes are interpreted by the client, not by ureq.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();

        let HttpRequest {
            method,
            url,
            headers,
            body,
        } = request;

        let result = match (method, body) {
            (HttpMethod::Get, _) => with_headers(agent.get(&url), &headers).call(),
            (HttpMethod::Delete, _) => with_headers(agent.delete(&url), &headers).call(),
            (HttpMethod::Post, Some(body)) => {
                with_headers(agent.post(&url), &headers).send(body.as_bytes())
            }
            (HttpMethod::Post, None) => with_headers(agent.post(&url), &headers).send_empty(),
            (HttpMethod::Put, Some(body)) => {
                with_headers(agent.put(&url), &headers).send(body.as_bytes())
            }
            (HttpMethod::Put, None) => with_headers(agent.put(&url), &headers).send_empty(),
            (HttpMethod::Patch, Some(body)) => {
                with_headers(agent.patch(&url), &headers).send(body.as_bytes())
            }
            (HttpMethod::Patch, None) => with_headers(agent.patch(&url), &headers).send_empty(),
        };

        let mut response = result.map_err(|e| ApiError::Transport(format!("{method} {url}: {e}")))?;
        let status = response.status();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Transport(format!("{method} {url}: reading body: {e}")))?;

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: reason_phrase(status),
            body,
        })
    }
}

/// Canonical reason for `status`, or "Unknown" for unregistered codes.
fn reason_phrase(status: ureq::http::StatusCode) -> String {
    status.canonical_reason().unwrap_or("Unknown").to_string()
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}
