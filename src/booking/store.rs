//! Persistence seam for booking records.
//!
//! Production bookings live in a hosted document store; the in-memory
//! implementation backs local runs and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::models::{BookingRecord, BookingStatus, StatusChange};

/// Errors raised by a booking store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Booking store unavailable: {0}")]
    Unavailable(String),

    #[error("Booking store I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Persist a new booking and return its id
    async fn create_booking(&self, record: BookingRecord) -> Result<Uuid, StoreError>;

    /// Find a booking by id
    async fn get_booking(&self, id: Uuid) -> Result<Option<BookingRecord>, StoreError>;

    /// Bookings of one customer, newest first
    async fn list_for_customer(
        &self,
        email: &str,
        limit: usize,
    ) -> Result<Vec<BookingRecord>, StoreError>;

    /// Every booking, newest first
    async fn list_all(&self) -> Result<Vec<BookingRecord>, StoreError>;

    /// Apply a status change and stamp `updated_at`; `None` when the id is unknown
    async fn update_status(
        &self,
        id: Uuid,
        change: StatusChange,
        at: DateTime<Utc>,
    ) -> Result<Option<BookingRecord>, StoreError>;

    /// Record the driver and vehicle and move the booking to `driver_assigned`
    async fn assign_driver(
        &self,
        id: Uuid,
        driver_id: &str,
        vehicle_id: &str,
        at: DateTime<Utc>,
    ) -> Result<Option<BookingRecord>, StoreError>;
}

/// Booking store kept in process memory
#[derive(Debug, Default)]
pub struct InMemoryBookingStore {
    records: RwLock<HashMap<Uuid, BookingRecord>>,
}

impl InMemoryBookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn modify<F>(&self, id: Uuid, apply: F) -> Option<BookingRecord>
    where
        F: FnOnce(&mut BookingRecord) + Send,
    {
        let mut records = self.records.write().await;
        let record = records.get_mut(&id)?;
        apply(record);
        Some(record.clone())
    }
}

fn newest_first(records: &mut [BookingRecord]) {
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

#[async_trait]
impl BookingStore for InMemoryBookingStore {
    async fn create_booking(&self, record: BookingRecord) -> Result<Uuid, StoreError> {
        let id = record.id;
        self.records.write().await.insert(id, record);
        Ok(id)
    }

    async fn get_booking(&self, id: Uuid) -> Result<Option<BookingRecord>, StoreError> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn list_for_customer(
        &self,
        email: &str,
        limit: usize,
    ) -> Result<Vec<BookingRecord>, StoreError> {
        let records = self.records.read().await;
        let mut found: Vec<BookingRecord> = records
            .values()
            .filter(|r| r.customer.email.eq_ignore_ascii_case(email))
            .cloned()
            .collect();
        newest_first(&mut found);
        found.truncate(limit);
        Ok(found)
    }

    async fn list_all(&self) -> Result<Vec<BookingRecord>, StoreError> {
        let mut all: Vec<BookingRecord> = self.records.read().await.values().cloned().collect();
        newest_first(&mut all);
        Ok(all)
    }

    async fn update_status(
        &self,
        id: Uuid,
        change: StatusChange,
        at: DateTime<Utc>,
    ) -> Result<Option<BookingRecord>, StoreError> {
        Ok(self
            .modify(id, |record| {
                if let Some(status) = change.status {
                    record.status = status;
                }
                if let Some(payment_status) = change.payment_status {
                    record.payment_status = payment_status;
                }
                record.updated_at = at;
            })
            .await)
    }

    async fn assign_driver(
        &self,
        id: Uuid,
        driver_id: &str,
        vehicle_id: &str,
        at: DateTime<Utc>,
    ) -> Result<Option<BookingRecord>, StoreError> {
        Ok(self
            .modify(id, |record| {
                record.driver_id = Some(driver_id.to_string());
                record.vehicle_id = Some(vehicle_id.to_string());
                record.status = BookingStatus::DriverAssigned;
                record.updated_at = at;
            })
            .await)
    }
}
