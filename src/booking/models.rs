//! Booking records and drafts.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pricing::vocabulary::{ServiceType, TripOption, VehicleType, Zone};
use crate::pricing::PriceResult;

/// Contact details of the person booking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    DriverAssigned,
    InProgress,
    Completed,
    Cancelled,
}

impl BookingStatus {
    /// Still waiting to be driven: pending, confirmed or with a driver assigned
    pub fn is_open(self) -> bool {
        matches!(
            self,
            BookingStatus::Pending | BookingStatus::Confirmed | BookingStatus::DriverAssigned
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    Cash,
    MobileMoney,
    BankTransfer,
    Card,
}

/// Booking as submitted by the booking form
#[derive(Debug, Clone, Deserialize)]
pub struct BookingDraft {
    pub customer: Customer,
    pub pickup_location: String,
    /// Required unless the service is the airport transfer
    #[serde(default)]
    pub destination: String,
    pub service_type: String,
    pub vehicle_type: String,
    #[serde(default = "default_trip_option")]
    pub trip_option: String,
    pub passengers: u32,
    #[serde(default)]
    pub luggage: u32,
    pub scheduled_date: NaiveDate,
    pub scheduled_time: NaiveTime,
    #[serde(default)]
    pub return_date: Option<NaiveDate>,
    #[serde(default)]
    pub return_time: Option<NaiveTime>,
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default)]
    pub special_requests: Option<String>,
}

fn default_trip_option() -> String {
    TripOption::OneWay.slug().to_string()
}

/// Persisted booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRecord {
    pub id: Uuid,
    pub customer: Customer,
    pub pickup_location: String,
    pub zone: Zone,
    pub destination: String,
    pub service_type: ServiceType,
    pub vehicle_type: VehicleType,
    pub trip_option: TripOption,
    pub passengers: u32,
    pub luggage: u32,
    /// Fixed amount, or the quote marker when a human has to price the trip
    pub price: PriceResult,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: Option<PaymentMethod>,
    pub scheduled_date: NaiveDate,
    pub scheduled_time: NaiveTime,
    pub return_date: Option<NaiveDate>,
    pub return_time: Option<NaiveTime>,
    pub special_requests: Option<String>,
    #[serde(default)]
    pub driver_id: Option<String>,
    #[serde(default)]
    pub vehicle_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Status fields an operator may change; absent fields are left as they are
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct StatusChange {
    #[serde(default)]
    pub status: Option<BookingStatus>,
    #[serde(default)]
    pub payment_status: Option<PaymentStatus>,
}

impl StatusChange {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.payment_status.is_none()
    }
}

/// Driver and vehicle put on a booking
#[derive(Debug, Clone, Deserialize)]
pub struct DriverAssignment {
    pub driver_id: String,
    pub vehicle_id: String,
}

/// Booking counts by lifecycle stage.
///
/// In-progress bookings count toward `total` only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BookingStats {
    pub total: usize,
    pub pending: usize,
    pub completed: usize,
    pub cancelled: usize,
}

impl BookingStats {
    pub fn tally<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = BookingStatus>,
    {
        let mut stats = Self::default();
        for status in statuses {
            stats.total += 1;
            match status {
                s if s.is_open() => stats.pending += 1,
                BookingStatus::Completed => stats.completed += 1,
                BookingStatus::Cancelled => stats.cancelled += 1,
                _ => {}
            }
        }
        stats
    }
}
