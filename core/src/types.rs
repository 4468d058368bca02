//! Domain DTOs for the booking API.
//!
//! # Design
//! These types mirror the mock server's schema but are defined independently,
//! so integration tests catch drift between the two crates. Responses that
//! tests validate field by field (`CreatedBooking::booking`, get/put/patch
//! bodies) stay as raw JSON until the schema has been asserted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Check-in and check-out dates, serialized as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookingDates {
    pub checkin: NaiveDate,
    pub checkout: NaiveDate,
}

/// A reservation as the service stores it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Booking {
    pub firstname: String,
    pub lastname: String,
    pub totalprice: i64,
    pub depositpaid: bool,
    pub bookingdates: BookingDates,
    pub additionalneeds: String,
}

/// Partial update payload. Only the fields present are sent; the service
/// leaves the rest unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookingPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub totalprice: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depositpaid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookingdates: Option<BookingDates>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additionalneeds: Option<String>,
}

/// One element of a list response.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct BookingRef {
    pub bookingid: u64,
}

/// Response to `POST /booking`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreatedBooking {
    pub bookingid: u64,
    pub booking: Value,
}

/// Username and password accepted by `POST /auth`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Query filters for `GET /booking`. Unset fields are left out of the query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingFilter {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub checkin: Option<NaiveDate>,
    pub checkout: Option<NaiveDate>,
}

impl BookingFilter {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Render as a URL-encoded query string without the leading `?`.
    pub fn to_query(&self) -> String {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        if let Some(firstname) = &self.firstname {
            query.append_pair("firstname", firstname);
        }
        if let Some(lastname) = &self.lastname {
            query.append_pair("lastname", lastname);
        }
        if let Some(checkin) = self.checkin {
            query.append_pair("checkin", &checkin.to_string());
        }
        if let Some(checkout) = self.checkout {
            query.append_pair("checkout", &checkout.to_string());
        }
        query.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn booking_dates_serialize_as_plain_dates() {
        let dates = BookingDates {
            checkin: date("2025-11-25"),
            checkout: date("2025-11-29"),
        };
        let json = serde_json::to_value(dates).unwrap();
        assert_eq!(json["checkin"], "2025-11-25");
        assert_eq!(json["checkout"], "2025-11-29");
    }

    #[test]
    fn booking_rejects_missing_field() {
        let result: Result<Booking, _> = serde_json::from_str(
            r#"{"firstname":"A","lastname":"B","totalprice":1,"depositpaid":true,
                "bookingdates":{"checkin":"2025-01-01","checkout":"2025-01-02"}}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn patch_serializes_only_present_fields() {
        let patch = BookingPatch {
            depositpaid: Some(true),
            ..Default::default()
        };
        assert_eq!(serde_json::to_string(&patch).unwrap(), r#"{"depositpaid":true}"#);
    }

    #[test]
    fn empty_patch_serializes_to_empty_object() {
        assert_eq!(serde_json::to_string(&BookingPatch::default()).unwrap(), "{}");
    }

    #[test]
    fn filter_query_encodes_values() {
        let filter = BookingFilter {
            firstname: Some("Mary Ann".to_string()),
            lastname: Some("O'Neil&Co".to_string()),
            checkin: Some(date("2025-11-25")),
            checkout: None,
        };
        assert_eq!(
            filter.to_query(),
            "firstname=Mary+Ann&lastname=O%27Neil%26Co&checkin=2025-11-25"
        );
    }

    #[test]
    fn empty_filter_renders_empty_query() {
        let filter = BookingFilter::default();
        assert!(filter.is_empty());
        assert_eq!(filter.to_query(), "");
    }

    #[test]
    fn created_booking_keeps_raw_booking() {
        let created: CreatedBooking =
            serde_json::from_str(r#"{"bookingid":12,"booking":{"firstname":"X"}}"#).unwrap();
        assert_eq!(created.bookingid, 12);
        assert_eq!(created.booking["firstname"], "X");
    }
}
