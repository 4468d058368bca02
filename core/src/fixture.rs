//! Per-worker authenticated fixture.
//!
//! # Design
//! A `WorkerFixture` belongs to one isolated execution unit. `open` logs in
//! and creates a single booking from fixed sample data; the resulting
//! `WorkerContext` is lent to every test in the unit. Teardown deletes that
//! booking exactly once: through `close`, or from `Drop` when the unit exits
//! any other way (early return, panic in a test).
//!
//! Nothing is shared between fixtures, so units can run on parallel threads
//! each with their own.

use std::mem;

use chrono::NaiveDate;

use crate::api::{BookerApi, Cleanup};
use crate::error::ApiError;
use crate::http::{Transport, UreqTransport};
use crate::types::{Booking, BookingDates, Credentials};

/// Credentials plus the token they were exchanged for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthCredentials {
    pub username: String,
    pub password: String,
    pub token: String,
}

/// What a test receives from the fixture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerContext {
    pub auth: AuthCredentials,
    pub booking_id: String,
}

/// The booking every fixture creates on open.
pub fn sample_booking() -> Booking {
    Booking {
        firstname: "Test".to_string(),
        lastname: "User".to_string(),
        totalprice: 369,
        depositpaid: true,
        bookingdates: BookingDates {
            checkin: ymd(2025, 11, 25),
            checkout: ymd(2025, 11, 29),
        },
        additionalneeds: "breakfast".to_string(),
    }
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("sample dates are valid calendar dates")
}

enum State {
    Active(WorkerContext),
    TornDown,
}

/// Owns one authenticated booking for the lifetime of a worker.
pub struct WorkerFixture<T: Transport = UreqTransport> {
    api: BookerApi<T>,
    state: State,
}

impl<T: Transport> WorkerFixture<T> {
    /// Log in and create the worker's booking. Either failure is fatal: no
    /// fixture is returned and nothing is left to clean up.
    pub fn open(api: BookerApi<T>, credentials: &Credentials) -> Result<Self, ApiError> {
        let token = api.get_auth_token(&credentials.username, &credentials.password)?;
        let created = api.post_booking(&sample_booking(), &token)?;
        let context = WorkerContext {
            auth: AuthCredentials {
                username: credentials.username.clone(),
                password: credentials.password.clone(),
                token,
            },
            booking_id: created.bookingid.to_string(),
        };
        tracing::info!("Worker fixture opened with booking {}", context.booking_id);
        Ok(Self {
            api,
            state: State::Active(context),
        })
    }

    /// Open a fixture, run `f` against it, and tear it down on every exit
    /// path. Returns the closure's result together with the teardown
    /// outcome; a panic in `f` still tears down, through `Drop`.
    pub fn scope<R>(
        api: BookerApi<T>,
        credentials: &Credentials,
        f: impl FnOnce(&Self) -> R,
    ) -> Result<(R, Cleanup), ApiError> {
        let fixture = Self::open(api, credentials)?;
        let result = f(&fixture);
        let cleanup = fixture.close();
        Ok((result, cleanup))
    }

    pub fn api(&self) -> &BookerApi<T> {
        &self.api
    }

    pub fn context(&self) -> &WorkerContext {
        match &self.state {
            State::Active(context) => context,
            // Only `teardown` leaves Active, and it runs from `close` or `drop`.
            State::TornDown => unreachable!("worker fixture used after teardown"),
        }
    }

    pub fn token(&self) -> &str {
        &self.context().auth.token
    }

    pub fn booking_id(&self) -> &str {
        &self.context().booking_id
    }

    /// Delete the worker's booking. Best effort: the outcome is reported,
    /// never raised.
    pub fn close(mut self) -> Cleanup {
        self.teardown()
            .expect("close takes the fixture by value, so it is still active")
    }

    fn teardown(&mut self) -> Option<Cleanup> {
        let State::Active(context) = mem::replace(&mut self.state, State::TornDown) else {
            return None;
        };
        let outcome = self
            .api
            .delete_booking(&context.booking_id, &context.auth.token);
        tracing::info!(
            "Worker fixture closed, booking {}: {outcome:?}",
            context.booking_id
        );
        Some(outcome)
    }
}

impl<T: Transport> Drop for WorkerFixture<T> {
    fn drop(&mut self) {
        self.teardown();
    }
}
