use std::{
    collections::{HashMap, HashSet},
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use axum_extra::{headers::Cookie, TypedHeader};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const DEFAULT_USERNAME: &str = "admin";
pub const DEFAULT_PASSWORD: &str = "password123";

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookingDates {
    pub checkin: NaiveDate,
    pub checkout: NaiveDate,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Booking {
    pub firstname: String,
    pub lastname: String,
    pub totalprice: i64,
    pub depositpaid: bool,
    pub bookingdates: BookingDates,
    pub additionalneeds: String,
}

#[derive(Deserialize)]
pub struct BookingPatch {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub totalprice: Option<i64>,
    pub depositpaid: Option<bool>,
    pub bookingdates: Option<BookingDates>,
    pub additionalneeds: Option<String>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookingRef {
    pub bookingid: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreatedBooking {
    pub bookingid: u64,
    pub booking: Booking,
}

#[derive(Deserialize)]
pub struct AuthRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct BookingQuery {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub checkin: Option<NaiveDate>,
    pub checkout: Option<NaiveDate>,
}

impl BookingQuery {
    fn matches(&self, booking: &Booking) -> bool {
        self.firstname.as_ref().is_none_or(|name| &booking.firstname == name)
            && self.lastname.as_ref().is_none_or(|name| &booking.lastname == name)
            && self.checkin.is_none_or(|date| booking.bookingdates.checkin >= date)
            && self.checkout.is_none_or(|date| booking.bookingdates.checkout >= date)
    }
}

pub struct Store {
    bookings: RwLock<HashMap<u64, Booking>>,
    // Grows with every successful /auth; tokens are never revoked.
    tokens: RwLock<HashSet<String>>,
    next_id: AtomicU64,
    username: String,
    password: String,
}

pub type Db = Arc<Store>;

type Rejection = (StatusCode, &'static str);

const FORBIDDEN: Rejection = (StatusCode::FORBIDDEN, "Forbidden");
const NOT_FOUND: Rejection = (StatusCode::NOT_FOUND, "Not Found");
// restful-booker answers writes to unknown ids this way rather than 404.
const UNKNOWN_BOOKING: Rejection = (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed");

pub fn app() -> Router {
    app_with_credentials(DEFAULT_USERNAME, DEFAULT_PASSWORD)
}

pub fn app_with_credentials(username: &str, password: &str) -> Router {
    let db: Db = Arc::new(Store {
        bookings: RwLock::new(HashMap::new()),
        tokens: RwLock::new(HashSet::new()),
        next_id: AtomicU64::new(1),
        username: username.to_string(),
        password: password.to_string(),
    });
    Router::new()
        .route("/auth", post(create_token))
        .route("/ping", get(ping))
        .route("/booking", get(list_bookings).post(create_booking))
        .route(
            "/booking/{id}",
            get(get_booking)
                .put(update_booking)
                .patch(patch_booking)
                .delete(delete_booking),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn create_token(State(db): State<Db>, Json(input): Json<AuthRequest>) -> Json<Value> {
    if input.username != db.username || input.password != db.password {
        tracing::debug!("rejected credentials for {}", input.username);
        return Json(json!({ "reason": "Bad credentials" }));
    }
    let token = Uuid::new_v4().simple().to_string();
    db.tokens.write().await.insert(token.clone());
    Json(json!({ "token": token }))
}

async fn ping() -> (StatusCode, &'static str) {
    (StatusCode::CREATED, "Created")
}

async fn list_bookings(
    State(db): State<Db>,
    Query(query): Query<BookingQuery>,
) -> Json<Vec<BookingRef>> {
    let bookings = db.bookings.read().await;
    let mut ids: Vec<u64> = bookings
        .iter()
        .filter(|(_, booking)| query.matches(booking))
        .map(|(id, _)| *id)
        .collect();
    ids.sort_unstable();
    Json(ids.into_iter().map(|bookingid| BookingRef { bookingid }).collect())
}

async fn get_booking(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Booking>, Rejection> {
    let bookings = db.bookings.read().await;
    bookings.get(&id).cloned().map(Json).ok_or(NOT_FOUND)
}

async fn create_booking(State(db): State<Db>, Json(booking): Json<Booking>) -> Json<CreatedBooking> {
    let bookingid = db.next_id.fetch_add(1, Ordering::Relaxed);
    db.bookings.write().await.insert(bookingid, booking.clone());
    tracing::info!("created booking {bookingid}");
    Json(CreatedBooking { bookingid, booking })
}

async fn update_booking(
    State(db): State<Db>,
    cookie: Option<TypedHeader<Cookie>>,
    Path(id): Path<u64>,
    Json(input): Json<Booking>,
) -> Result<Json<Booking>, Rejection> {
    authorize(&db, cookie.as_deref()).await?;
    let mut bookings = db.bookings.write().await;
    let booking = bookings.get_mut(&id).ok_or(UNKNOWN_BOOKING)?;
    *booking = input;
    Ok(Json(booking.clone()))
}

async fn patch_booking(
    State(db): State<Db>,
    cookie: Option<TypedHeader<Cookie>>,
    Path(id): Path<u64>,
    Json(input): Json<BookingPatch>,
) -> Result<Json<Booking>, Rejection> {
    authorize(&db, cookie.as_deref()).await?;
    let mut bookings = db.bookings.write().await;
    let booking = bookings.get_mut(&id).ok_or(UNKNOWN_BOOKING)?;
    if let Some(firstname) = input.firstname {
        booking.firstname = firstname;
    }
    if let Some(lastname) = input.lastname {
        booking.lastname = lastname;
    }
    if let Some(totalprice) = input.totalprice {
        booking.totalprice = totalprice;
    }
    if let Some(depositpaid) = input.depositpaid {
        booking.depositpaid = depositpaid;
    }
    if let Some(bookingdates) = input.bookingdates {
        booking.bookingdates = bookingdates;
    }
    if let Some(additionalneeds) = input.additionalneeds {
        booking.additionalneeds = additionalneeds;
    }
    Ok(Json(booking.clone()))
}

async fn delete_booking(
    State(db): State<Db>,
    cookie: Option<TypedHeader<Cookie>>,
    Path(id): Path<u64>,
) -> Result<(StatusCode, &'static str), Rejection> {
    authorize(&db, cookie.as_deref()).await?;
    db.bookings.write().await.remove(&id).ok_or(UNKNOWN_BOOKING)?;
    tracing::info!("deleted booking {id}");
    Ok((StatusCode::CREATED, "Created"))
}

async fn authorize(db: &Store, cookie: Option<&Cookie>) -> Result<(), Rejection> {
    let token = cookie.and_then(|cookie| cookie.get("token")).ok_or(FORBIDDEN)?;
    if db.tokens.read().await.contains(token) {
        Ok(())
    } else {
        Err(FORBIDDEN)
    }
}
