//! Shape assertions for booking payloads returned by the service.

use std::fmt;

use serde_json::Value;

/// JSON type a booking field must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    String,
    Number,
    Boolean,
    Object,
}

impl Kind {
    fn of(value: &Value) -> &'static str {
        match value {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    fn matches(self, value: &Value) -> bool {
        match self {
            Kind::String => value.is_string(),
            Kind::Number => value.is_number(),
            Kind::Boolean => value.is_boolean(),
            Kind::Object => value.is_object(),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Kind::String => "string",
            Kind::Number => "number",
            Kind::Boolean => "boolean",
            Kind::Object => "object",
        }
    }
}

const BOOKING_SHAPE: &[(&str, Kind)] = &[
    ("firstname", Kind::String),
    ("lastname", Kind::String),
    ("totalprice", Kind::Number),
    ("depositpaid", Kind::Boolean),
    ("bookingdates", Kind::Object),
    ("bookingdates.checkin", Kind::String),
    ("bookingdates.checkout", Kind::String),
    ("additionalneeds", Kind::String),
];

/// One field that is missing or has the wrong type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeMismatch {
    pub path: &'static str,
    pub expected: Kind,
    /// JSON type found, or `None` when the field is absent.
    pub actual: Option<&'static str>,
}

impl fmt::Display for ShapeMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: expected {}, got {}",
            self.path,
            self.expected.name(),
            self.actual.unwrap_or("nothing")
        )
    }
}

/// Every booking field of `candidate` that is absent or mistyped. Extra
/// fields are allowed.
pub fn booking_shape_mismatches(candidate: &Value) -> Vec<ShapeMismatch> {
    BOOKING_SHAPE
        .iter()
        .filter_map(|&(path, expected)| {
            let found = lookup(candidate, path);
            match found {
                Some(value) if expected.matches(value) => None,
                // Children of a missing or mistyped object are reported through the parent.
                None if path.contains('.')
                    && !lookup(candidate, parent(path)).is_some_and(Value::is_object) =>
                {
                    None
                }
                _ => Some(ShapeMismatch {
                    path,
                    expected,
                    actual: found.map(Kind::of),
                }),
            }
        })
        .collect()
}

/// Fail the calling test unless `candidate` has the booking shape.
#[track_caller]
pub fn expect_valid_booking_schema(candidate: &Value) {
    let mismatches = booking_shape_mismatches(candidate);
    if mismatches.is_empty() {
        return;
    }
    let diff: Vec<String> = mismatches.iter().map(|m| format!("  - {m}")).collect();
    panic!(
        "booking schema mismatch:\n{}\nexpected shape: {}\nactual: {candidate:#}",
        diff.join("\n"),
        expected_shape()
    );
}

fn expected_shape() -> String {
    let fields: Vec<String> = BOOKING_SHAPE
        .iter()
        .map(|(path, kind)| format!("{path}: {}", kind.name()))
        .collect();
    format!("{{ {} }}", fields.join(", "))
}

fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |current, key| current.get(key))
}

fn parent(path: &str) -> &str {
    path.rsplit_once('.').map_or(path, |(head, _)| head)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn valid() -> Value {
        json!({
            "firstname": "Test",
            "lastname": "User",
            "totalprice": 369,
            "depositpaid": true,
            "bookingdates": {"checkin": "2025-11-25", "checkout": "2025-11-29"},
            "additionalneeds": "breakfast"
        })
    }

    #[test]
    fn valid_booking_has_no_mismatches() {
        assert!(booking_shape_mismatches(&valid()).is_empty());
        expect_valid_booking_schema(&valid());
    }

    #[test]
    fn extra_fields_are_allowed() {
        let mut booking = valid();
        booking["bookingid"] = json!(1);
        assert!(booking_shape_mismatches(&booking).is_empty());
    }

    #[test]
    fn missing_and_mistyped_fields_are_listed() {
        let mut booking = valid();
        booking.as_object_mut().unwrap().remove("additionalneeds");
        booking["totalprice"] = json!("369");
        booking["bookingdates"]["checkout"] = json!(null);

        let mismatches = booking_shape_mismatches(&booking);
        let rendered: Vec<String> = mismatches.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec![
                "totalprice: expected number, got string",
                "bookingdates.checkout: expected string, got null",
                "additionalneeds: expected string, got nothing",
            ]
        );
    }

    #[test]
    fn missing_dates_object_is_reported_once() {
        let mut booking = valid();
        booking.as_object_mut().unwrap().remove("bookingdates");
        let mismatches = booking_shape_mismatches(&booking);
        assert_eq!(mismatches.len(), 1);
        assert_eq!(mismatches[0].path, "bookingdates");
        assert_eq!(mismatches[0].actual, None);
    }

    #[test]
    fn non_object_candidate_fails_every_top_level_field() {
        let mismatches = booking_shape_mismatches(&json!("Not Found"));
        assert_eq!(mismatches.len(), 6);
    }

    #[test]
    #[should_panic(expected = "depositpaid: expected boolean, got string")]
    fn assertion_panics_with_diff() {
        let mut booking = valid();
        booking["depositpaid"] = json!("yes");
        expect_valid_booking_schema(&booking);
    }
}
