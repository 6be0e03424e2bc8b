//! Booking route handlers

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{get, patch, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::pricing::{format_price, PriceResult};
use crate::AppState;

use super::models::{
    BookingDraft, BookingRecord, BookingStats, BookingStatus, DriverAssignment, StatusChange,
};

/// Query parameters for a customer's booking history
#[derive(Debug, Deserialize)]
pub struct CustomerBookingsQuery {
    pub email: String,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    10
}

const MAX_LIMIT: usize = 100;

/// Query parameters for booking statistics
#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    #[serde(default)]
    pub email: Option<String>,
}

/// Response for a newly created booking
#[derive(Debug, Serialize)]
pub struct CreatedBookingResponse {
    pub id: Uuid,
    pub price: PriceResult,
    pub formatted_price: String,
    pub status: BookingStatus,
}

impl From<&BookingRecord> for CreatedBookingResponse {
    fn from(record: &BookingRecord) -> Self {
        Self {
            id: record.id,
            price: record.price.clone(),
            formatted_price: format_price(&record.price),
            status: record.status,
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/bookings", post(create).get(list_for_customer))
        .route("/api/bookings/stats", get(stats))
        .route("/api/bookings/:id", get(detail))
        .route("/api/bookings/:id/status", patch(update_status))
        .route("/api/bookings/:id/driver", post(assign_driver))
}

/// Create a booking dated no earlier than today (Dakar runs on UTC)
pub async fn create(
    State(state): State<AppState>,
    body: std::result::Result<Json<BookingDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedBookingResponse>)> {
    let Json(draft) = body?;
    let today = Utc::now().date_naive();
    let record = state.bookings.create_booking(draft, today).await?;
    Ok((StatusCode::CREATED, Json((&record).into())))
}

pub async fn detail(
    State(state): State<AppState>,
    id: std::result::Result<Path<Uuid>, PathRejection>,
) -> Result<Json<BookingRecord>> {
    let Path(id) = id?;
    let record = state
        .bookings
        .get_booking(id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(record))
}

pub async fn list_for_customer(
    State(state): State<AppState>,
    query: std::result::Result<Query<CustomerBookingsQuery>, QueryRejection>,
) -> Result<Json<Vec<BookingRecord>>> {
    let Query(query) = query?;
    let limit = query.limit.clamp(1, MAX_LIMIT);
    let records = state.bookings.customer_bookings(&query.email, limit).await?;
    Ok(Json(records))
}

pub async fn update_status(
    State(state): State<AppState>,
    id: std::result::Result<Path<Uuid>, PathRejection>,
    body: std::result::Result<Json<StatusChange>, JsonRejection>,
) -> Result<Json<BookingRecord>> {
    let (Path(id), Json(change)) = (id?, body?);
    let record = state.bookings.update_status(id, change).await?;
    Ok(Json(record))
}

pub async fn assign_driver(
    State(state): State<AppState>,
    id: std::result::Result<Path<Uuid>, PathRejection>,
    body: std::result::Result<Json<DriverAssignment>, JsonRejection>,
) -> Result<Json<BookingRecord>> {
    let (Path(id), Json(assignment)) = (id?, body?);
    let record = state
        .bookings
        .assign_driver(id, &assignment.driver_id, &assignment.vehicle_id)
        .await?;
    Ok(Json(record))
}

/// Counts over every booking, or one customer's when `email` is given
pub async fn stats(
    State(state): State<AppState>,
    query: std::result::Result<Query<StatsQuery>, QueryRejection>,
) -> Result<Json<BookingStats>> {
    let Query(query) = query?;
    let stats = state.bookings.booking_stats(query.email.as_deref()).await?;
    Ok(Json(stats))
}
