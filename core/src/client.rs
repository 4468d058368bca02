//! REST client core: one method per verb over a configurable base URL.
//!
//! # Design
//! `RestClient` holds a `base_url` and a `Transport`, and carries no other
//! state between calls. Every verb goes through the same three steps:
//! `build_request` (pure), `Transport::execute` (I/O), and `parse_response`
//! (pure). Non-2xx statuses become `HttpRequestError`; 2xx bodies are decoded
//! as JSON with a raw-text fallback.

use serde::Serialize;

use crate::error::{ApiError, HttpRequestError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, ResponseBody, Transport, UreqTransport};

const APPLICATION_JSON: &str = "application/json";

/// Blocking client for a JSON REST API.
///
/// Tokens travel as a `token` cookie, never as a bearer header.
#[derive(Debug, Clone)]
pub struct RestClient<T = UreqTransport> {
    base_url: String,
    transport: T,
}

impl RestClient<UreqTransport> {
    pub fn new(base_url: &str) -> Self {
        Self::with_transport(base_url, UreqTransport)
    }
}

impl<T: Transport> RestClient<T> {
    pub fn with_transport(base_url: &str, transport: T) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn get(&self, endpoint: &str, token: Option<&str>) -> Result<ResponseBody, ApiError> {
        self.send(HttpMethod::Get, endpoint, None, token)
    }

    pub fn post<B>(&self, endpoint: &str, body: &B, token: Option<&str>) -> Result<ResponseBody, ApiError>
    where
        B: Serialize + ?Sized,
    {
        self.send(HttpMethod::Post, endpoint, Some(to_json(body)?), token)
    }

    pub fn put<B>(&self, endpoint: &str, body: &B, token: Option<&str>) -> Result<ResponseBody, ApiError>
    where
        B: Serialize + ?Sized,
    {
        self.send(HttpMethod::Put, endpoint, Some(to_json(body)?), token)
    }

    pub fn patch<B>(&self, endpoint: &str, body: &B, token: Option<&str>) -> Result<ResponseBody, ApiError>
    where
        B: Serialize + ?Sized,
    {
        self.send(HttpMethod::Patch, endpoint, Some(to_json(body)?), token)
    }

    pub fn delete(&self, endpoint: &str, token: Option<&str>) -> Result<ResponseBody, ApiError> {
        self.send(HttpMethod::Delete, endpoint, None, token)
    }

    /// Build the request for one call without sending it.
    pub fn build_request(
        &self,
        method: HttpMethod,
        endpoint: &str,
        body: Option<String>,
        token: Option<&str>,
    ) -> HttpRequest {
        let mut headers = vec![
            ("Accept".to_string(), APPLICATION_JSON.to_string()),
            ("Content-Type".to_string(), APPLICATION_JSON.to_string()),
        ];
        if let Some(token) = token {
            headers.push(("Cookie".to_string(), format!("token={token}")));
        }
        HttpRequest {
            method,
            url: format!("{}{endpoint}", self.base_url),
            headers,
            body,
        }
    }

    fn send(
        &self,
        method: HttpMethod,
        endpoint: &str,
        body: Option<String>,
        token: Option<&str>,
    ) -> Result<ResponseBody, ApiError> {
        let request = self.build_request(method, endpoint, body, token);
        tracing::debug!("{method} {}", request.url);
        let response = self.transport.execute(request)?;
        parse_response(method, endpoint, response)
    }
}

/// Map a response to its normalized body, or to `HttpRequestError` when the
/// status is outside 2xx.
pub fn parse_response(
    method: HttpMethod,
    endpoint: &str,
    response: HttpResponse,
) -> Result<ResponseBody, ApiError> {
    if !response.is_success() {
        return Err(HttpRequestError {
            method,
            endpoint: endpoint.to_string(),
            status: response.status,
            status_text: response.status_text,
        }
        .into());
    }
    Ok(ResponseBody::parse(response.body))
}

fn to_json<B: Serialize + ?Sized>(body: &B) -> Result<String, ApiError> {
    serde_json::to_string(body).map_err(|e| ApiError::Serialization(e.to_string()))
}
