//! The booking suite, written against a `WorkerFixture` so it runs the same
//! way on the mock service and on a live one.
//!
//! Order matters when running the whole suite: the filter scenario looks up
//! the fixture's booking by its original name, so it runs before the update.

use booker_core::{
    expect_valid_booking_schema, Booking, BookingFilter, BookingPatch, Cleanup, Transport, WorkerFixture,
};
use serde_json::{json, Value};

pub fn run_all<T: Transport>(fixture: &WorkerFixture<T>) {
    returns_server_status(fixture);
    lists_all_booking_ids(fixture);
    lists_filtered_booking_ids(fixture);
    returns_booking_by_id(fixture);
    creates_and_deletes_booking(fixture);
    updates_existing_booking(fixture);
    updates_single_value(fixture);
}

pub fn returns_server_status<T: Transport>(fixture: &WorkerFixture<T>) {
    fixture.api().ping().unwrap();
}

pub fn lists_all_booking_ids<T: Transport>(fixture: &WorkerFixture<T>) {
    let ids = fixture.api().get_all_booking_ids().unwrap();
    assert!(!ids.is_empty());
}

pub fn lists_filtered_booking_ids<T: Transport>(fixture: &WorkerFixture<T>) {
    let ids = fixture
        .api()
        .find_booking_ids(&BookingFilter {
            firstname: Some("Test".to_string()),
            lastname: Some("User".to_string()),
            ..Default::default()
        })
        .unwrap();
    assert!(!ids.is_empty());
    let own: u64 = fixture.booking_id().parse().unwrap();
    assert!(
        ids.iter().any(|r| r.bookingid == own),
        "booking {own} missing from {ids:?}"
    );
}

pub fn returns_booking_by_id<T: Transport>(fixture: &WorkerFixture<T>) {
    let booking = fetch(fixture, fixture.booking_id());
    expect_valid_booking_schema(&booking);
}

pub fn creates_and_deletes_booking<T: Transport>(fixture: &WorkerFixture<T>) {
    let api = fixture.api();
    let new_booking = booking(json!({
        "firstname": "New",
        "lastname": "Booking",
        "totalprice": 123,
        "depositpaid": false,
        "bookingdates": {"checkin": "2025-11-25", "checkout": "2025-11-29"},
        "additionalneeds": "dinner"
    }));

    let created = api.post_booking(&new_booking, fixture.token()).unwrap();
    expect_valid_booking_schema(&created.booking);
    assert_eq!(booking(created.booking.clone()), new_booking);
    assert_ne!(created.bookingid.to_string(), fixture.booking_id());

    let id = created.bookingid.to_string();
    assert_eq!(booking(fetch(fixture, &id)), new_booking);

    assert_eq!(api.delete_booking(&id, fixture.token()), Cleanup::Deleted);
    let err = api.get_booking_by_id(&id).unwrap_err();
    assert_eq!(err.status(), Some(404), "{err}");
}

pub fn updates_existing_booking<T: Transport>(fixture: &WorkerFixture<T>) {
    let replacement = booking(json!({
        "firstname": "Updated",
        "lastname": "Booking",
        "totalprice": 456,
        "depositpaid": false,
        "bookingdates": {"checkin": "2025-11-28", "checkout": "2025-11-30"},
        "additionalneeds": "air conditioned room"
    }));

    let updated = fixture
        .api()
        .put_booking(fixture.booking_id(), &replacement, fixture.token())
        .unwrap()
        .into_json()
        .unwrap();
    expect_valid_booking_schema(&updated);
    assert_eq!(booking(updated), replacement);
    assert_eq!(booking(fetch(fixture, fixture.booking_id())), replacement);
}

pub fn updates_single_value<T: Transport>(fixture: &WorkerFixture<T>) {
    let before = booking(fetch(fixture, fixture.booking_id()));
    let patch = BookingPatch {
        depositpaid: Some(true),
        ..Default::default()
    };

    let updated = fixture
        .api()
        .patch_booking(fixture.booking_id(), &patch, fixture.token())
        .unwrap()
        .into_json()
        .unwrap();
    expect_valid_booking_schema(&updated);

    let after = booking(fetch(fixture, fixture.booking_id()));
    assert!(after.depositpaid);
    assert_eq!(
        after,
        Booking {
            depositpaid: true,
            ..before
        }
    );
}

fn fetch<T: Transport>(fixture: &WorkerFixture<T>, id: &str) -> Value {
    fixture.api().get_booking_by_id(id).unwrap().into_json().unwrap()
}

fn booking(value: Value) -> Booking {
    serde_json::from_value(value).unwrap()
}
