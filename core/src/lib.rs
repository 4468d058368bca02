//! Blocking API client and test harness for the restful-booker service.
//!
//! # Overview
//! `RestClient` issues JSON requests against a base URL through a pluggable
//! `Transport`. `BookerApi` names the booking operations on top of it, and
//! `WorkerFixture` gives each isolated test worker one authenticated booking
//! that is deleted when the worker is done.
//!
//! # Design
//! - Requests and responses are plain data (`HttpRequest` / `HttpResponse`);
//!   only the transport performs I/O, so everything above it is tested
//!   without a server.
//! - `BookerApi` is an ordinary value. Workers construct or clone their own;
//!   there is no process-wide instance.
//! - Cleanup never fails loudly: deletes report a `Cleanup` outcome.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod fixture;
pub mod http;
pub mod schema;
pub mod types;

pub use api::{BookerApi, Cleanup};
pub use client::RestClient;
pub use config::Config;
pub use error::{ApiError, HttpRequestError};
pub use fixture::{AuthCredentials, WorkerContext, WorkerFixture};
pub use http::{HttpMethod, HttpRequest, HttpResponse, ResponseBody, Transport, UreqTransport};
pub use schema::{booking_shape_mismatches, expect_valid_booking_schema};
pub use types::{Booking, BookingDates, BookingFilter, BookingPatch, BookingRef, CreatedBooking, Credentials};
