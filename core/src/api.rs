//! Booking operations on top of `RestClient`.
//!
//! # Design
//! Each method is one round trip. Reads and writes propagate every failure
//! to the caller; writes also log it first. Deletion is cleanup, so it never
//! fails: the outcome comes back as a `Cleanup` value instead.

use serde_json::Value;

use crate::client::RestClient;
use crate::error::ApiError;
use crate::http::{ResponseBody, Transport, UreqTransport};
use crate::types::{Booking, BookingFilter, BookingPatch, BookingRef, CreatedBooking, Credentials};

mod endpoints {
    pub const AUTH: &str = "/auth";
    pub const PING: &str = "/ping";

    pub fn booking(filter: Option<&str>) -> String {
        match filter {
            Some(query) if !query.is_empty() => format!("/booking?{query}"),
            _ => "/booking".to_string(),
        }
    }

    pub fn booking_by_id(id: &str) -> String {
        format!("/booking/{id}")
    }
}

/// Outcome of a best-effort delete.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cleanup {
    Deleted,
    /// The service no longer knows the id (404, or 405 as restful-booker
    /// answers for unknown bookings).
    AlreadyGone,
    Failed,
}

impl Cleanup {
    pub fn is_deleted(self) -> bool {
        self == Cleanup::Deleted
    }
}

/// Client for the booking service's endpoints.
#[derive(Debug, Clone)]
pub struct BookerApi<T = UreqTransport> {
    client: RestClient<T>,
}

impl BookerApi<UreqTransport> {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: RestClient::new(base_url),
        }
    }
}

impl<T: Transport> BookerApi<T> {
    pub fn with_client(client: RestClient<T>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &RestClient<T> {
        &self.client
    }

    pub fn get_auth_token(&self, username: &str, password: &str) -> Result<String, ApiError> {
        let credentials = Credentials::new(username, password);
        let body = self.client.post(endpoints::AUTH, &credentials, None)?.into_json()?;
        if let Some(token) = body.get("token").and_then(Value::as_str) {
            return Ok(token.to_string());
        }
        match body.get("reason").and_then(Value::as_str) {
            Some(reason) => Err(ApiError::AuthRejected {
                reason: reason.to_string(),
            }),
            None => Err(ApiError::UnexpectedBody(body.to_string())),
        }
    }

    pub fn ping(&self) -> Result<(), ApiError> {
        self.client.get(endpoints::PING, None).map(|_| ())
    }

    pub fn get_all_booking_ids(&self) -> Result<Vec<BookingRef>, ApiError> {
        self.client.get(&endpoints::booking(None), None)?.decode()
    }

    /// `query` is a raw query string such as `firstname=Test&lastname=User`.
    pub fn get_filtered_booking_ids(&self, query: &str) -> Result<Vec<BookingRef>, ApiError> {
        self.client.get(&endpoints::booking(Some(query)), None)?.decode()
    }

    pub fn find_booking_ids(&self, filter: &BookingFilter) -> Result<Vec<BookingRef>, ApiError> {
        self.get_filtered_booking_ids(&filter.to_query())
    }

    pub fn get_booking_by_id(&self, id: &str) -> Result<ResponseBody, ApiError> {
        self.client.get(&endpoints::booking_by_id(id), None)
    }

    pub fn post_booking(&self, booking: &Booking, token: &str) -> Result<CreatedBooking, ApiError> {
        self.client
            .post(&endpoints::booking(None), booking, Some(token))
            .and_then(ResponseBody::decode)
            .inspect_err(|e| tracing::error!("Failed to create booking: {e}"))
    }

    pub fn put_booking(&self, id: &str, booking: &Booking, token: &str) -> Result<ResponseBody, ApiError> {
        self.client
            .put(&endpoints::booking_by_id(id), booking, Some(token))
            .inspect_err(|e| tracing::error!("Failed to update booking {id}: {e}"))
    }

    pub fn patch_booking(&self, id: &str, patch: &BookingPatch, token: &str) -> Result<ResponseBody, ApiError> {
        self.client
            .patch(&endpoints::booking_by_id(id), patch, Some(token))
            .inspect_err(|e| tracing::error!("Failed to patch booking {id}: {e}"))
    }

    pub fn delete_booking(&self, id: &str, token: &str) -> Cleanup {
        match self.client.delete(&endpoints::booking_by_id(id), Some(token)) {
            Ok(_) => Cleanup::Deleted,
            Err(ApiError::Http(e)) if matches!(e.status, 404 | 405) => {
                tracing::warn!("Booking {id} already gone: {e}");
                Cleanup::AlreadyGone
            }
            Err(e) => {
                tracing::warn!("Failed to delete booking {id}: {e}");
                Cleanup::Failed
            }
        }
    }
}
